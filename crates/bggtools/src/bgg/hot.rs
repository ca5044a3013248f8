use crate::prelude::{eprintln, println, *};
use bggtools_core::bgg::{hot_kind, parse_hot_items, BggRequest, HotOutput};
use colored::Colorize;

use super::{create_client, fetch_xml};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct HotOptions {
    /// Item type: boardgame, rpg, videogame, boardgameperson, ...
    #[arg(value_name = "TYPE", default_value = "boardgame")]
    pub kind: String,

    /// Only show the first N entries
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: HotOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Fetching hot {} list...", options.kind);
    }

    let client = create_client(&global)?;
    let mut output = hot_items_data(&client, &global, Some(options.kind.as_str())).await?;
    if let Some(limit) = options.limit {
        output.items.truncate(limit);
    }

    if options.json {
        println!("{}", format_hot_json(&output)?);
    } else {
        print!("{}", format_hot_text(&output));
    }

    Ok(())
}

/// Fetches the `/hot` list for an item type (boardgame when omitted)
pub async fn hot_items_data(
    client: &reqwest::Client,
    global: &crate::Global,
    kind: Option<&str>,
) -> Result<HotOutput> {
    let request = BggRequest::hot(kind);
    let body = fetch_xml(client, global, &request).await?;
    Ok(parse_hot_items(&body, hot_kind(kind))?)
}

fn format_hot_json(output: &HotOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_hot_text(output: &HotOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("THE HOTNESS: {}", output.kind.to_uppercase())
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.items.is_empty() {
        result.push_str(&format!("\n{}\n", "The hot list is empty.".yellow()));
        result.push('\n');
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["Rank", "ID", "Year", "Name"]);
    for item in &output.items {
        let year = if item.year_published == 0 {
            "-".to_string()
        } else {
            item.year_published.to_string()
        };
        table.add_row(prettytable::row![item.rank, &item.id, year, &item.name]);
    }
    result.push('\n');
    result.push_str(&table.to_string());

    result.push_str(&format!("\n{}:\n", "To see a game".bright_white().bold()));
    result.push_str(&format!("  {}\n", "bggtools game <id>".cyan()));

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bggtools_core::bgg::HotnessItem;

    fn create_test_item(rank: u32, id: &str, name: &str) -> HotnessItem {
        HotnessItem {
            id: id.to_string(),
            rank,
            name: name.to_string(),
            year_published: 2021,
            thumbnail: String::new(),
        }
    }

    #[test]
    fn test_format_hot_json() {
        let output = HotOutput {
            kind: "boardgame".to_string(),
            items: vec![create_test_item(1, "342942", "Ark Nova")],
        };

        let json = format_hot_json(&output).unwrap();

        assert!(json.contains("\"kind\": \"boardgame\""));
        assert!(json.contains("\"rank\": 1"));
        assert!(json.contains("\"name\": \"Ark Nova\""));
    }

    #[test]
    fn test_format_hot_text() {
        let output = HotOutput {
            kind: "boardgame".to_string(),
            items: vec![
                create_test_item(1, "342942", "Ark Nova"),
                create_test_item(2, "224517", "Brass: Birmingham"),
            ],
        };

        let formatted = format_hot_text(&output);

        assert!(formatted.contains("THE HOTNESS: BOARDGAME"));
        assert!(formatted.contains("Ark Nova"));
        assert!(formatted.contains("Brass: Birmingham"));
        assert!(formatted.contains("342942"));
    }

    #[test]
    fn test_format_hot_text_empty() {
        let output = HotOutput {
            kind: "rpg".to_string(),
            items: vec![],
        };

        let formatted = format_hot_text(&output);

        assert!(formatted.contains("THE HOTNESS: RPG"));
        assert!(formatted.contains("The hot list is empty."));
    }
}
