use crate::prelude::{eprintln, *};
use bggtools_core::bgg::Operation;

use super::{CallToolResult, Content, JsonRpcError};

/// Operation tag served by an MCP tool name
pub fn operation_for_tool(name: &str) -> Option<&'static str> {
    match name {
        "bgg_get_game" => Some("getGame"),
        "bgg_search_games" => Some("searchGames"),
        "bgg_forum_threads" => Some("getForumThreads"),
        "bgg_read_thread" => Some("getThread"),
        "bgg_hot_items" => Some("getHotItems"),
        _ => None,
    }
}

/// Tool arguments are the camelCase parameters of an input item, without the
/// `operation` tag, which the tool name supplies.
fn parse_arguments(
    operation: &str,
    arguments: Option<serde_json::Value>,
) -> Result<Operation, JsonRpcError> {
    let mut object = match arguments {
        Some(serde_json::Value::Object(map)) => map,
        None | Some(serde_json::Value::Null) => serde_json::Map::new(),
        Some(other) => {
            return Err(JsonRpcError {
                code: -32602,
                message: format!("Invalid arguments: expected an object, found {other}"),
                data: None,
            })
        }
    };
    object.insert(
        "operation".to_string(),
        serde_json::Value::String(operation.to_string()),
    );

    serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

pub async fn handle_bgg_tool(
    operation: &str,
    arguments: Option<serde_json::Value>,
    client: &reqwest::Client,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let operation = parse_arguments(operation, arguments)?;

    if global.verbose {
        eprintln!("Calling {operation}");
    }

    let data = crate::bgg::execute(client, global, &operation)
        .await
        .map_err(|e| JsonRpcError {
            code: -32603,
            message: format!("Tool execution error: {e}"),
            data: None,
        })?;

    // Convert to JSON and wrap in MCP result format
    let json_string = serde_json::to_string_pretty(&data).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}
