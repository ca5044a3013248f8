use crate::prelude::*;
use bggtools_core::bgg::{BggRequest, Operation};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;

pub mod batch;
pub mod forum_threads;
pub mod get_game;
pub mod hot;
pub mod read_thread;
pub mod search;

/// Create the HTTP client used for every request of one invocation
pub fn create_client(global: &crate::Global) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();

    if let Some(token) = global.api_token.as_deref().filter(|t| !t.is_empty()) {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::InvalidToken(e.to_string()))?,
        );
    }

    reqwest::Client::builder()
        .user_agent(concat!("bggtools/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Perform one GET against the XML API and return the raw body
pub async fn fetch_xml(
    client: &reqwest::Client,
    global: &crate::Global,
    request: &BggRequest,
) -> Result<String> {
    let url = request.url(&global.api_base);
    debug!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!("Rate limited on {url}");
        return Err(Error::RateLimited.into());
    }
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            url,
        }
        .into());
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(format!("{url}: {e}")))?;
    debug!("Received {} bytes from {url}", body.len());

    Ok(body)
}

/// Run one input item and return its output record
pub async fn execute(
    client: &reqwest::Client,
    global: &crate::Global,
    operation: &Operation,
) -> Result<serde_json::Value> {
    info!("Executing {operation}");

    let value = match operation {
        Operation::GetGame { game_id } => {
            serde_json::to_value(get_game::get_game_data(client, global, game_id).await?)?
        }
        Operation::SearchGames { search_query } => {
            serde_json::to_value(search::search_data(client, global, search_query).await?)?
        }
        Operation::GetForumThreads {
            game_id,
            forum_type,
            page,
            count,
            sort_by,
            sort_order,
        } => {
            let query = forum_threads::ForumQuery {
                game_id: game_id.clone(),
                kind: *forum_type,
                page: *page,
                count: *count,
                sort_by: *sort_by,
                sort_order: *sort_order,
            };
            serde_json::to_value(forum_threads::forum_threads_data(client, global, &query).await?)?
        }
        Operation::GetThread { thread_id } => {
            serde_json::to_value(read_thread::read_thread_data(client, global, thread_id).await?)?
        }
        Operation::GetHotItems { kind } => {
            serde_json::to_value(hot::hot_items_data(client, global, kind.as_deref()).await?)?
        }
    };

    Ok(value)
}

/// Render an optional timestamp for text output
pub fn format_date(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Shorten text to at most `max_len` characters
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_len).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
pub(crate) fn test_global() -> crate::Global {
    crate::Global {
        api_base: bggtools_core::bgg::BGG_API_BASE.to_string(),
        api_token: None,
        verbose: false,
    }
}
