//! Client-side ordering of forum threads

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BggError;

use super::forum::ForumThread;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Last activity
    #[default]
    MostRecent,
    /// Thread creation date
    Newest,
    /// Number of articles
    MostActive,
    /// Thread subject
    Alphabetical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest or busiest first. Subjects read A to Z.
    #[default]
    Desc,
    Asc,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortBy::MostRecent => "mostRecent",
            SortBy::Newest => "newest",
            SortBy::MostActive => "mostActive",
            SortBy::Alphabetical => "alphabetical",
        })
    }
}

impl FromStr for SortBy {
    type Err = BggError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "mostrecent" | "recent" => Ok(SortBy::MostRecent),
            "newest" => Ok(SortBy::Newest),
            "mostactive" | "active" => Ok(SortBy::MostActive),
            "alphabetical" => Ok(SortBy::Alphabetical),
            _ => Err(BggError::InvalidValue {
                field: "sort key",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = BggError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desc" | "descending" => Ok(SortOrder::Desc),
            "asc" | "ascending" => Ok(SortOrder::Asc),
            _ => Err(BggError::InvalidValue {
                field: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

/// Ascending comparison on the key selected by `sort_by`
fn compare(a: &ForumThread, b: &ForumThread, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::MostRecent => a.last_post_date.cmp(&b.last_post_date),
        SortBy::Newest => a.post_date.cmp(&b.post_date),
        SortBy::MostActive => a.num_articles.cmp(&b.num_articles),
        SortBy::Alphabetical => a
            .subject
            .to_lowercase()
            .cmp(&b.subject.to_lowercase())
            .then_with(|| a.subject.cmp(&b.subject)),
    }
}

/// Whether `order` puts the greatest key first for `sort_by`.
///
/// Dates and article counts lead with the greatest value under `desc`.
/// Subjects read A to Z under `desc` and Z to A under `asc`.
fn greatest_first(sort_by: SortBy, order: SortOrder) -> bool {
    match sort_by {
        SortBy::Alphabetical => order == SortOrder::Asc,
        _ => order == SortOrder::Desc,
    }
}

/// Sort threads in place. Stable, so equal keys keep the API order.
///
/// Missing dates compare lower than any present date.
pub fn sort_threads(threads: &mut [ForumThread], sort_by: SortBy, order: SortOrder) {
    let reverse = greatest_first(sort_by, order);
    threads.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by);
        if reverse {
            ordering.reverse()
        } else {
            ordering
        }
    });
}
