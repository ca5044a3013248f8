use crate::prelude::{eprintln, println, *};
use bggtools_core::bgg::{parse_search_results, BggRequest, SearchOutput};
use colored::Colorize;

use super::{create_client, fetch_xml};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Search term, matched against game names
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Searching for \"{}\"...", options.query);
    }

    let client = create_client(&global)?;
    let output = search_data(&client, &global, &options.query).await?;

    if options.json {
        println!("{}", format_search_json(&output)?);
    } else {
        print!("{}", format_search_text(&output, &options.query));
    }

    Ok(())
}

/// Searches `/search` for board games matching `query`
pub async fn search_data(
    client: &reqwest::Client,
    global: &crate::Global,
    query: &str,
) -> Result<SearchOutput> {
    let request = BggRequest::search(query)?;
    let body = fetch_xml(client, global, &request).await?;
    Ok(parse_search_results(&body)?)
}

fn format_search_json(output: &SearchOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_search_text(output: &SearchOutput, query: &str) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "SEARCH RESULTS FOR \"{}\" ({} found)",
            query,
            output.items.len()
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.items.is_empty() {
        result.push_str(&format!("\n{}\n", "No games matched.".yellow()));
        result.push('\n');
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID", "Year", "Name"]);
    for item in &output.items {
        let year = if item.year_published == 0 {
            "-".to_string()
        } else {
            item.year_published.to_string()
        };
        table.add_row(prettytable::row![&item.id, year, &item.name]);
    }
    result.push('\n');
    result.push_str(&table.to_string());

    result.push_str(&format!("\n{}:\n", "To see a game".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        format!("bggtools game {}", output.items[0].id).cyan()
    ));

    result.push('\n');
    result
}
