//! BoardGameGeek XML API2 transformations
//!
//! Each submodule maps one endpoint's XML response into flat records. All
//! functions take the raw response body and return owned, serializable data.

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::BggError;
use crate::xml::{api_error, XmlNode};

pub mod forum;
pub mod game;
pub mod hot;
pub mod operation;
pub mod request;
pub mod sort;
pub mod thread;

pub use forum::{
    find_forum, parse_forum_list, parse_forum_threads, Forum, ForumKind, ForumPage, ForumThread,
    ForumThreadsOutput,
};
pub use game::{parse_game, parse_search_results, Game, SearchOutput, SearchResultItem};
pub use hot::{parse_hot_items, HotOutput, HotnessItem};
pub use operation::{parse_operations, settle, Operation};
pub use request::{hot_kind, BggRequest};
pub use sort::{sort_threads, SortBy, SortOrder};
pub use thread::{parse_thread, strip_html, ThreadArticle, ThreadOutput};

pub const BGG_API_BASE: &str = "https://boardgamegeek.com/xmlapi2";

/// Parse a response body and reject BoardGameGeek error documents
pub fn parse_document(xml: &str) -> Result<XmlNode, BggError> {
    let root = XmlNode::parse(xml)?;
    match api_error(&root) {
        Some(message) => Err(BggError::Api(message)),
        None => Ok(root),
    }
}

/// Parse the date formats used across the API.
///
/// Forum listings use RFC 2822 (`Sat, 01 Jan 2022 12:00:00 +0000`) while
/// thread articles use RFC 3339 (`2022-01-01T12:00:00-05:00`).
pub fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Extract a numeric object ID from either a bare ID or a BoardGameGeek URL.
///
/// `kind` is the URL path segment preceding the ID (`boardgame`, `thread`).
/// Returns the trimmed input unchanged when it is neither.
pub fn extract_object_id(input: &str, kind: &str) -> String {
    let input = input.trim();
    if input.chars().all(|c| c.is_ascii_digit()) {
        return input.to_string();
    }

    let pattern = format!(r"/{}/(\d+)", regex::escape(kind));
    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| input.to_string())
}
