//! Input items and the per-item error boundary
//!
//! An [`Operation`] is the full parameter set of one input item, selected by
//! its `operation` tag. The shell runs each item independently and passes the
//! outcome through [`settle`], which decides between emitting an error record
//! and aborting the whole run.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BggError;

use super::forum::ForumKind;
use super::sort::{SortBy, SortOrder};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_COUNT: u32 = 50;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_count() -> u32 {
    DEFAULT_COUNT
}

/// Accept IDs written either as JSON strings or numbers
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Operation {
    GetGame {
        #[serde(default, deserialize_with = "id_string")]
        game_id: String,
    },
    SearchGames {
        #[serde(default)]
        search_query: String,
    },
    GetForumThreads {
        #[serde(default, deserialize_with = "id_string")]
        game_id: String,
        #[serde(default)]
        forum_type: ForumKind,
        #[serde(default = "default_page")]
        page: u32,
        #[serde(default = "default_count")]
        count: u32,
        #[serde(default)]
        sort_by: SortBy,
        #[serde(default)]
        sort_order: SortOrder,
    },
    GetThread {
        #[serde(default, deserialize_with = "id_string")]
        thread_id: String,
    },
    GetHotItems {
        #[serde(default)]
        kind: Option<String>,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::GetGame { game_id } => write!(f, "getGame({game_id})"),
            Operation::SearchGames { search_query } => write!(f, "searchGames({search_query})"),
            Operation::GetForumThreads {
                game_id,
                forum_type,
                page,
                ..
            } => write!(f, "getForumThreads({game_id}, {forum_type}, page {page})"),
            Operation::GetThread { thread_id } => write!(f, "getThread({thread_id})"),
            Operation::GetHotItems { kind } => {
                write!(f, "getHotItems({})", kind.as_deref().unwrap_or("boardgame"))
            }
        }
    }
}

/// Parse input items from either a JSON array or JSON lines
pub fn parse_operations(input: &str) -> Result<Vec<Operation>, BggError> {
    let invalid = |e: serde_json::Error| BggError::InvalidValue {
        field: "input item",
        value: e.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(invalid);
    }

    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(invalid))
        .collect()
}

/// Apply the error boundary to the outcome of one item.
///
/// With `continue_on_fail` a failure becomes `{"error": "<message>"}` and the
/// run goes on; otherwise the error is handed back to abort the run.
pub fn settle<E: fmt::Display>(
    result: Result<serde_json::Value, E>,
    continue_on_fail: bool,
) -> Result<serde_json::Value, E> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if continue_on_fail => Ok(serde_json::json!({ "error": err.to_string() })),
        Err(err) => Err(err),
    }
}
