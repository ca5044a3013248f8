use crate::prelude::{eprintln, println, *};
use bggtools_core::bgg::{parse_game, BggRequest, Game};
use colored::Colorize;

use super::{create_client, fetch_xml, truncate_text};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct GameOptions {
    /// Game ID or BoardGameGeek URL (e.g. 13 or https://boardgamegeek.com/boardgame/13/catan)
    #[arg(value_name = "GAME")]
    pub game: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: GameOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Fetching game {}...", options.game);
    }

    let client = create_client(&global)?;
    let game = get_game_data(&client, &global, &options.game).await?;

    if options.json {
        println!("{}", format_game_json(&game)?);
    } else {
        print!("{}", format_game_text(&game));
    }

    Ok(())
}

/// Fetches a game from `/thing` and maps it to a [`Game`]
pub async fn get_game_data(
    client: &reqwest::Client,
    global: &crate::Global,
    game_id: &str,
) -> Result<Game> {
    let request = BggRequest::thing(game_id)?;
    let body = fetch_xml(client, global, &request).await?;
    Ok(parse_game(&body)?)
}

fn format_game_json(game: &Game) -> Result<String> {
    serde_json::to_string_pretty(game).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn or_unknown(value: u32) -> String {
    if value == 0 {
        "?".to_string()
    } else {
        value.to_string()
    }
}

fn format_game_text(game: &Game) -> String {
    let mut result = String::new();

    let year = if game.year_published == 0 {
        String::new()
    } else {
        format!(" ({})", game.year_published)
    };

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("{}{}", game.name, year).bright_cyan().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "\n{}: {} | {}: {}\n",
        "ID".green(),
        game.id.bright_white(),
        "Type".green(),
        game.item_type.bright_white()
    ));
    result.push_str(&format!(
        "{}: {}-{} | {}: {} min ({}-{})\n",
        "Players".green(),
        or_unknown(game.min_players).bright_yellow(),
        or_unknown(game.max_players).bright_yellow(),
        "Playing time".green(),
        or_unknown(game.playing_time).bright_magenta(),
        or_unknown(game.min_play_time),
        or_unknown(game.max_play_time)
    ));

    if !game.image.is_empty() {
        result.push_str(&format!(
            "{}: {}\n",
            "Image".green(),
            game.image.cyan().underline()
        ));
    }

    if !game.description.is_empty() {
        result.push_str(&format!("\n{}\n", "DESCRIPTION".bright_white().bold()));
        result.push_str(&format!("{}\n", truncate_text(&game.description, 1200)));
    }

    result.push_str(&format!("\n{}:\n", "Related commands".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        format!("bggtools forum {} --type general", game.id).cyan()
    ));
    result.push_str(&format!(
        "  {}\n",
        format!("bggtools game {} --json", game.id).cyan()
    ));

    result.push('\n');
    result
}
