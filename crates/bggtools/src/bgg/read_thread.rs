use crate::prelude::{eprintln, println, *};
use bggtools_core::bgg::{parse_thread, strip_html, BggRequest, ThreadOutput};
use colored::Colorize;

use super::{create_client, fetch_xml, format_date};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ThreadOptions {
    /// Thread ID or BoardGameGeek thread URL
    #[arg(value_name = "THREAD")]
    pub thread: String,

    /// Print article bodies as returned by the API instead of plain text
    #[arg(long)]
    pub raw: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ThreadOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Fetching thread {}...", options.thread);
    }

    let client = create_client(&global)?;
    let thread = read_thread_data(&client, &global, &options.thread).await?;

    if options.json {
        println!("{}", format_thread_json(&thread)?);
    } else {
        print!("{}", format_thread_text(&thread, options.raw));
    }

    Ok(())
}

/// Fetches a thread from `/thread` with all of its articles
pub async fn read_thread_data(
    client: &reqwest::Client,
    global: &crate::Global,
    thread_id: &str,
) -> Result<ThreadOutput> {
    let request = BggRequest::thread(thread_id)?;
    let body = fetch_xml(client, global, &request).await?;
    let thread = parse_thread(&body)?;
    debug!("Thread {} has {} articles", thread.id, thread.articles.len());
    Ok(thread)
}

fn format_thread_json(thread: &ThreadOutput) -> Result<String> {
    serde_json::to_string_pretty(thread).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_thread_text(thread: &ThreadOutput, raw: bool) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", thread.subject.bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}: {} | {}: {}\n",
        "Articles".green(),
        thread.num_articles.to_string().bright_yellow(),
        "Link".green(),
        thread.link.cyan().underline()
    ));

    for (idx, article) in thread.articles.iter().enumerate() {
        result.push_str(&format!("\n{}\n", "-".repeat(80).bright_black()));
        result.push_str(&format!(
            "{} {} {} {}",
            format!("[{}]", idx + 1).yellow().bold(),
            article.username.bright_white().bold(),
            "on".bright_black(),
            format_date(article.post_date).bright_black()
        ));
        if article.num_edits > 0 {
            result.push_str(&format!(
                " {}",
                format!(
                    "(edited {}x, last {})",
                    article.num_edits,
                    format_date(article.edit_date)
                )
                .bright_black()
            ));
        }
        result.push('\n');

        if !article.subject.is_empty() && article.subject != thread.subject {
            result.push_str(&format!("{}\n", article.subject.white().bold()));
        }

        let body = if raw {
            article.body.clone()
        } else {
            strip_html(&article.body)
        };
        result.push_str(&format!("\n{}\n", body));
    }

    if thread.articles.is_empty() {
        result.push_str(&format!("\n{}\n", "No articles in this thread.".yellow()));
    }

    result.push('\n');
    result
}
