use crate::prelude::*;
use clap::Parser;

mod bgg;
mod error;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Query the BoardGameGeek XML API: games, searches, forums, threads and the hot list"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// BoardGameGeek XML API2 base URL
    #[clap(
        long,
        env = "BGG_API_BASE",
        global = true,
        default_value = bggtools_core::bgg::BGG_API_BASE
    )]
    api_base: String,

    /// Application token, sent as `Authorization: Bearer <token>`
    #[clap(long, env = "BGG_API_TOKEN", global = true, hide_env_values = true)]
    api_token: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "BGG_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Get detailed information about a game
    Game(crate::bgg::get_game::GameOptions),

    /// Search for board games by name
    Search(crate::bgg::search::SearchOptions),

    /// List threads of a game forum (general, news, reviews, rules, ...)
    Forum(crate::bgg::forum_threads::ForumOptions),

    /// Read the articles of a forum thread
    Thread(crate::bgg::read_thread::ThreadOptions),

    /// Show the current hotness list
    Hot(crate::bgg::hot::HotOptions),

    /// Run a list of JSON input items, one operation each
    Batch(crate::bgg::batch::BatchOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Game(options) => crate::bgg::get_game::run(options, app.global).await,
        SubCommands::Search(options) => crate::bgg::search::run(options, app.global).await,
        SubCommands::Forum(options) => crate::bgg::forum_threads::run(options, app.global).await,
        SubCommands::Thread(options) => crate::bgg::read_thread::run(options, app.global).await,
        SubCommands::Hot(options) => crate::bgg::hot::run(options, app.global).await,
        SubCommands::Batch(options) => crate::bgg::batch::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
