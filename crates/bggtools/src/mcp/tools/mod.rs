mod bgg;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn internal_error(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    }
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "bggtools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "bgg_get_game".to_string(),
            description: "Get detailed information about a board game from BoardGameGeek: name, description, player counts, playing time, year published and images. Accepts a game ID (e.g., '13') or a BoardGameGeek URL.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "gameId": {
                        "type": "string",
                        "description": "BoardGameGeek game ID or URL (e.g., '13' or 'https://boardgamegeek.com/boardgame/13/catan')"
                    }
                },
                "required": ["gameId"]
            }),
        },
        Tool {
            name: "bgg_search_games".to_string(),
            description: "Search BoardGameGeek for board games by name. Returns matching IDs, names and publication years.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "searchQuery": {
                        "type": "string",
                        "description": "The search term to look for games"
                    }
                },
                "required": ["searchQuery"]
            }),
        },
        Tool {
            name: "bgg_forum_threads".to_string(),
            description: "List threads from one of a game's forums (general, news, reviews, rules, sessions, strategy, variants, crowdfunding). Finds the forum by title, fetches one page of threads and sorts them.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "gameId": {
                        "type": "string",
                        "description": "BoardGameGeek game ID or URL"
                    },
                    "forumType": {
                        "type": "string",
                        "enum": ["general", "news", "reviews", "rules", "sessions", "strategy", "variants", "crowdfunding"],
                        "description": "The type of forum to get threads from (default: general)"
                    },
                    "page": {
                        "type": "number",
                        "description": "Page number of threads to retrieve (default: 1)"
                    },
                    "count": {
                        "type": "number",
                        "description": "Number of threads per page (default: 50)"
                    },
                    "sortBy": {
                        "type": "string",
                        "enum": ["mostRecent", "newest", "mostActive", "alphabetical"],
                        "description": "How to sort the forum threads (default: mostRecent)"
                    },
                    "sortOrder": {
                        "type": "string",
                        "enum": ["desc", "asc"],
                        "description": "Sort direction (default: desc). desc puts the newest or busiest thread first and lists subjects A to Z; asc reverses both"
                    }
                },
                "required": ["gameId"]
            }),
        },
        Tool {
            name: "bgg_read_thread".to_string(),
            description: "Read all articles in a BoardGameGeek forum thread, including author, dates, edit count and HTML body. Accepts a thread ID or thread URL.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "threadId": {
                        "type": "string",
                        "description": "The ID or URL of the thread to retrieve"
                    }
                },
                "required": ["threadId"]
            }),
        },
        Tool {
            name: "bgg_hot_items".to_string(),
            description: "Get the BoardGameGeek hotness list, ranked.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "kind": {
                        "type": "string",
                        "description": "Item type (default: boardgame; also rpg, videogame, boardgameperson, rpgperson, boardgamecompany, rpgcompany, videogamecompany)"
                    }
                }
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    client: &reqwest::Client,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    let Some(operation) = bgg::operation_for_tool(&params.name) else {
        return Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        });
    };

    bgg::handle_bgg_tool(operation, params.arguments, client, global).await
}
