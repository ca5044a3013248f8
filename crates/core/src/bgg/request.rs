use crate::error::BggError;

use super::extract_object_id;

/// One of the fixed GET calls the tool makes against the XML API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BggRequest {
    Thing { id: String },
    Search { query: String },
    ForumList { game_id: String },
    Forum { forum_id: String, page: u32, count: u32 },
    Thread { thread_id: String },
    Hot { kind: String },
}

fn required(value: &str, name: &'static str) -> Result<String, BggError> {
    let value = value.trim();
    if value.is_empty() {
        Err(BggError::MissingParameter(name))
    } else {
        Ok(value.to_string())
    }
}

/// Item type of the hot list, `boardgame` when unset or blank
pub fn hot_kind(kind: Option<&str>) -> &str {
    kind.map(str::trim)
        .filter(|k| !k.is_empty())
        .unwrap_or("boardgame")
}

impl BggRequest {
    /// Game details. Accepts a bare ID or a `/boardgame/<id>` URL.
    pub fn thing(game_id: &str) -> Result<Self, BggError> {
        let id = required(game_id, "Game ID")?;
        Ok(BggRequest::Thing {
            id: extract_object_id(&id, "boardgame"),
        })
    }

    pub fn search(query: &str) -> Result<Self, BggError> {
        Ok(BggRequest::Search {
            query: required(query, "Search query")?,
        })
    }

    pub fn forum_list(game_id: &str) -> Result<Self, BggError> {
        let id = required(game_id, "Game ID")?;
        Ok(BggRequest::ForumList {
            game_id: extract_object_id(&id, "boardgame"),
        })
    }

    /// A page of a forum's threads. Page is clamped to at least 1.
    pub fn forum(forum_id: &str, page: u32, count: u32) -> Result<Self, BggError> {
        Ok(BggRequest::Forum {
            forum_id: required(forum_id, "Forum ID")?,
            page: page.max(1),
            count,
        })
    }

    pub fn thread(thread_id: &str) -> Result<Self, BggError> {
        let id = required(thread_id, "Thread ID")?;
        Ok(BggRequest::Thread {
            thread_id: extract_object_id(&id, "thread"),
        })
    }

    pub fn hot(kind: Option<&str>) -> Self {
        BggRequest::Hot {
            kind: hot_kind(kind).to_string(),
        }
    }

    /// Full request URL relative to `base`
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            BggRequest::Thing { id } => format!("{base}/thing?id={id}"),
            BggRequest::Search { query } => format!(
                "{base}/search?query={}&type=boardgame",
                urlencoding::encode(query)
            ),
            BggRequest::ForumList { game_id } => {
                format!("{base}/forumlist?type=thing&id={game_id}")
            }
            BggRequest::Forum {
                forum_id,
                page,
                count,
            } => format!("{base}/forum?id={forum_id}&page={page}&count={count}"),
            BggRequest::Thread { thread_id } => format!("{base}/thread?id={thread_id}"),
            BggRequest::Hot { kind } => {
                format!("{base}/hot?type={}", urlencoding::encode(kind))
            }
        }
    }
}
