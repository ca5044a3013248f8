use serde::{Deserialize, Serialize};

use crate::error::BggError;
use crate::xml::{parse_or_default, XmlNode};

use super::parse_document;

/// Game details from `/thing`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub thumbnail: String,
    pub min_players: u32,
    pub max_players: u32,
    pub playing_time: u32,
    pub min_play_time: u32,
    pub max_play_time: u32,
    pub year_published: i32,
}

/// Individual search hit from `/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub year_published: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    pub items: Vec<SearchResultItem>,
}

/// Primary name of an item, falling back to the first listed name
fn primary_name(item: &XmlNode) -> String {
    item.children_named("name")
        .find(|n| n.attr("type") == Some("primary"))
        .or_else(|| item.child("name"))
        .and_then(|n| n.attr("value"))
        .unwrap_or_default()
        .to_string()
}

/// Descriptions arrive with HTML entities escaped twice, leaving `&#10;`
/// and friends in the text after XML decoding.
fn decode_description(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_string()
}

/// Map a `/thing` response to a [`Game`]. Only the first item is used.
pub fn parse_game(xml: &str) -> Result<Game, BggError> {
    let root = parse_document(xml)?;
    let item = root.child("item").ok_or(BggError::GameNotFound)?;

    Ok(Game {
        id: item.string("id"),
        item_type: item.string("type"),
        name: primary_name(item),
        description: decode_description(item.text_of("description").unwrap_or_default()),
        image: item.string("image"),
        thumbnail: item.string("thumbnail"),
        min_players: parse_or_default(item.value_of("minplayers")),
        max_players: parse_or_default(item.value_of("maxplayers")),
        playing_time: parse_or_default(item.value_of("playingtime")),
        min_play_time: parse_or_default(item.value_of("minplaytime")),
        max_play_time: parse_or_default(item.value_of("maxplaytime")),
        year_published: parse_or_default(item.value_of("yearpublished")),
    })
}

/// Map a `/search` response. A response without items is an empty result.
pub fn parse_search_results(xml: &str) -> Result<SearchOutput, BggError> {
    let root = parse_document(xml)?;

    let items = root
        .children_named("item")
        .map(|item| SearchResultItem {
            id: item.string("id"),
            item_type: item.string("type"),
            name: primary_name(item),
            year_published: parse_or_default(item.value_of("yearpublished")),
        })
        .collect();

    Ok(SearchOutput { items })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATAN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<items termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
    <item type="boardgame" id="13">
        <thumbnail>https://cf.geekdo-images.com/catan_t.jpg</thumbnail>
        <image>https://cf.geekdo-images.com/catan.jpg</image>
        <name type="alternate" sortindex="1" value="Die Siedler von Catan" />
        <name type="primary" sortindex="1" value="CATAN" />
        <description>Trade, build, settle.&amp;#10;&amp;#10;Players take turns &amp;quot;rolling&amp;quot;.</description>
        <yearpublished value="1995" />
        <minplayers value="3" />
        <maxplayers value="4" />
        <playingtime value="120" />
        <minplaytime value="60" />
        <maxplaytime value="120" />
    </item>
</items>"#;

    #[test]
    fn test_parse_game_full() {
        let game = parse_game(CATAN).unwrap();

        assert_eq!(game.id, "13");
        assert_eq!(game.item_type, "boardgame");
        assert_eq!(game.name, "CATAN");
        assert_eq!(
            game.description,
            "Trade, build, settle.\n\nPlayers take turns \"rolling\"."
        );
        assert_eq!(game.image, "https://cf.geekdo-images.com/catan.jpg");
        assert_eq!(game.thumbnail, "https://cf.geekdo-images.com/catan_t.jpg");
        assert_eq!(game.min_players, 3);
        assert_eq!(game.max_players, 4);
        assert_eq!(game.playing_time, 120);
        assert_eq!(game.min_play_time, 60);
        assert_eq!(game.max_play_time, 120);
        assert_eq!(game.year_published, 1995);
    }

    #[test]
    fn test_parse_game_missing_optional_fields() {
        let xml = r#"<items><item type="boardgame" id="99">
            <name type="primary" value="Prototype" />
        </item></items>"#;

        let game = parse_game(xml).unwrap();

        assert_eq!(game.id, "99");
        assert_eq!(game.name, "Prototype");
        assert_eq!(game.description, "");
        assert_eq!(game.image, "");
        assert_eq!(game.thumbnail, "");
        assert_eq!(game.min_players, 0);
        assert_eq!(game.min_play_time, 0);
        assert_eq!(game.max_play_time, 0);
        assert_eq!(game.year_published, 0);
    }

    #[test]
    fn test_parse_game_name_falls_back_to_first() {
        let xml = r#"<items><item type="boardgame" id="1">
            <name type="alternate" value="First" />
            <name type="alternate" value="Second" />
        </item></items>"#;

        assert_eq!(parse_game(xml).unwrap().name, "First");
    }

    #[test]
    fn test_parse_game_negative_year() {
        let xml = r#"<items><item type="boardgame" id="188">
            <name type="primary" value="Go" /><yearpublished value="-2200" />
        </item></items>"#;

        assert_eq!(parse_game(xml).unwrap().year_published, -2200);
    }

    #[test]
    fn test_parse_game_not_found() {
        let xml = r#"<items termsofuse="https://boardgamegeek.com/xmlapi/termsofuse"></items>"#;
        assert_eq!(parse_game(xml), Err(BggError::GameNotFound));
    }

    #[test]
    fn test_parse_game_serializes_type_key() {
        let game = parse_game(CATAN).unwrap();
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["type"], "boardgame");
        assert_eq!(json["min_players"], 3);
    }

    #[test]
    fn test_parse_search_results() {
        let xml = r#"<items total="2" termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
            <item type="boardgame" id="13">
                <name type="primary" value="CATAN"/>
                <yearpublished value="1995" />
            </item>
            <item type="boardgame" id="278">
                <name type="primary" value="Catan Card Game"/>
            </item>
        </items>"#;

        let output = parse_search_results(xml).unwrap();

        assert_eq!(output.items.len(), 2);
        assert_eq!(output.items[0].id, "13");
        assert_eq!(output.items[0].name, "CATAN");
        assert_eq!(output.items[0].year_published, 1995);
        assert_eq!(output.items[1].id, "278");
        assert_eq!(output.items[1].year_published, 0);
    }

    #[test]
    fn test_parse_search_results_empty() {
        let xml = r#"<items total="0" termsofuse="https://boardgamegeek.com/xmlapi/termsofuse"></items>"#;

        let output = parse_search_results(xml).unwrap();

        assert!(output.items.is_empty());
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({ "items": [] })
        );
    }
}
