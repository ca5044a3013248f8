use serde::{Deserialize, Serialize};

use crate::error::BggError;
use crate::xml::parse_or_default;

use super::parse_document;

/// Entry of the `/hot` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotnessItem {
    pub id: String,
    pub rank: u32,
    pub name: String,
    pub year_published: i32,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotOutput {
    pub kind: String,
    pub items: Vec<HotnessItem>,
}

/// Map a `/hot` response, ordered by rank. Unranked items go last.
pub fn parse_hot_items(xml: &str, kind: &str) -> Result<HotOutput, BggError> {
    let root = parse_document(xml)?;

    let mut items: Vec<HotnessItem> = root
        .children_named("item")
        .map(|item| HotnessItem {
            id: item.string("id"),
            rank: item.number("rank"),
            name: item.value_of("name").unwrap_or_default().to_string(),
            year_published: parse_or_default(item.value_of("yearpublished")),
            thumbnail: item.value_of("thumbnail").unwrap_or_default().to_string(),
        })
        .collect();
    items.sort_by_key(|i| (i.rank == 0, i.rank));

    Ok(HotOutput {
        kind: kind.to_string(),
        items,
    })
}
