use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BggError;
use crate::xml::XmlNode;

use super::sort::{SortBy, SortOrder};
use super::{parse_date, parse_document};

/// Forum categories a game page carries, matched against forum titles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForumKind {
    #[default]
    General,
    News,
    Reviews,
    Rules,
    Sessions,
    Strategy,
    Variants,
    Crowdfunding,
}

impl ForumKind {
    pub const ALL: [ForumKind; 8] = [
        ForumKind::General,
        ForumKind::News,
        ForumKind::Reviews,
        ForumKind::Rules,
        ForumKind::Sessions,
        ForumKind::Strategy,
        ForumKind::Variants,
        ForumKind::Crowdfunding,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            ForumKind::General => "general",
            ForumKind::News => "news",
            ForumKind::Reviews => "reviews",
            ForumKind::Rules => "rules",
            ForumKind::Sessions => "sessions",
            ForumKind::Strategy => "strategy",
            ForumKind::Variants => "variants",
            ForumKind::Crowdfunding => "crowdfunding",
        }
    }
}

impl fmt::Display for ForumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ForumKind {
    type Err = BggError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ForumKind::ALL
            .into_iter()
            .find(|k| k.keyword() == wanted)
            .ok_or_else(|| BggError::InvalidValue {
                field: "forum type",
                value: s.to_string(),
            })
    }
}

/// Forum entry from `/forumlist`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forum {
    pub id: String,
    pub title: String,
    pub no_posting: bool,
    pub description: String,
    pub num_threads: u32,
    pub num_posts: u32,
    pub last_post_date: Option<DateTime<Utc>>,
}

/// Thread summary from `/forum`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: String,
    pub subject: String,
    pub author: String,
    pub num_articles: u32,
    pub post_date: Option<DateTime<Utc>>,
    pub last_post_date: Option<DateTime<Utc>>,
}

/// A page of forum threads with navigation hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumThreadsOutput {
    pub forum_id: String,
    pub forum_title: String,
    pub thread_count: u32,
    pub post_count: u32,
    pub last_post_date: Option<DateTime<Utc>>,
    pub page: u32,
    pub threads: Vec<ForumThread>,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Identifies which page of which game forum a response belongs to, and how
/// it was requested, so page commands reproduce the same view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPage {
    pub game_id: String,
    pub kind: ForumKind,
    pub page: u32,
    pub count: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// Map a `/forumlist` response
pub fn parse_forum_list(xml: &str) -> Result<Vec<Forum>, BggError> {
    let root = parse_document(xml)?;

    Ok(root
        .children_named("forum")
        .map(|forum| Forum {
            id: forum.string("id"),
            title: forum.string("title"),
            no_posting: forum.field("noposting") == Some("1"),
            description: forum.string("description"),
            num_threads: forum.number("numthreads"),
            num_posts: forum.number("numposts"),
            last_post_date: parse_date(forum.field("lastpostdate")),
        })
        .collect())
}

/// First forum whose title contains the kind's keyword, case-insensitively
pub fn find_forum<'a>(
    forums: &'a [Forum],
    kind: ForumKind,
    game_id: &str,
) -> Result<&'a Forum, BggError> {
    forums
        .iter()
        .find(|f| f.title.to_lowercase().contains(kind.keyword()))
        .ok_or_else(|| BggError::ForumNotFound {
            forum_type: kind.to_string(),
            game_id: game_id.to_string(),
        })
}

fn thread_from_node(node: &XmlNode) -> ForumThread {
    ForumThread {
        id: node.string("id"),
        subject: node.string("subject"),
        author: node.string("author"),
        num_articles: node.number("numarticles"),
        post_date: parse_date(node.field("postdate")),
        last_post_date: parse_date(node.field("lastpostdate")),
    }
}

fn page_command(page: &ForumPage, target: u32) -> String {
    let mut command = format!(
        "bggtools forum {} --type {} --page {} --count {}",
        page.game_id, page.kind, target, page.count
    );
    if page.sort_by != SortBy::default() {
        command.push_str(&format!(" --sort-by {}", page.sort_by));
    }
    if page.sort_order != SortOrder::default() {
        command.push_str(&format!(" --order {}", page.sort_order));
    }
    command
}

/// Map a `/forum` response. Threads keep the API order; sorting is separate.
pub fn parse_forum_threads(xml: &str, page: &ForumPage) -> Result<ForumThreadsOutput, BggError> {
    let root = parse_document(xml)?;

    let threads: Vec<ForumThread> = root
        .child("threads")
        .map(|t| t.children_named("thread").map(thread_from_node).collect())
        .unwrap_or_default();

    let thread_count: u32 = root.number("numthreads");
    let total_pages = if page.count == 0 {
        0
    } else {
        thread_count.div_ceil(page.count)
    };

    let next_page_command =
        (page.page < total_pages).then(|| page_command(page, page.page + 1));
    let prev_page_command = (page.page > 1).then(|| page_command(page, page.page - 1));

    Ok(ForumThreadsOutput {
        forum_id: root.string("id"),
        forum_title: root.string("title"),
        thread_count,
        post_count: root.number("numposts"),
        last_post_date: parse_date(root.field("lastpostdate")),
        page: page.page,
        threads,
        next_page_command,
        prev_page_command,
    })
}
