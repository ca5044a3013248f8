use crate::prelude::{eprintln, println, *};
use bggtools_core::bgg::{
    extract_object_id, find_forum, parse_forum_list, parse_forum_threads, sort_threads,
    BggRequest, Forum, ForumKind, ForumPage, ForumThreadsOutput, SortBy, SortOrder,
};
use colored::Colorize;

use super::{create_client, fetch_xml, format_date};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ForumOptions {
    /// Game ID or BoardGameGeek URL
    #[arg(value_name = "GAME")]
    pub game: String,

    /// Forum type: general, news, reviews, rules, sessions, strategy, variants, crowdfunding
    #[arg(short = 't', long = "type", default_value = "general")]
    pub forum_type: ForumKind,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Number of threads per page
    #[arg(short, long, env = "BGG_FORUM_COUNT", default_value = "50")]
    pub count: u32,

    /// Sort key: mostRecent, newest, mostActive, alphabetical
    #[arg(short, long, default_value = "mostRecent")]
    pub sort_by: SortBy,

    /// Sort order: desc or asc
    #[arg(short, long, default_value = "desc")]
    pub order: SortOrder,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parameters of one forum lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumQuery {
    pub game_id: String,
    pub kind: ForumKind,
    pub page: u32,
    pub count: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl From<&ForumOptions> for ForumQuery {
    fn from(options: &ForumOptions) -> Self {
        ForumQuery {
            game_id: options.game.clone(),
            kind: options.forum_type,
            page: options.page,
            count: options.count,
            sort_by: options.sort_by,
            sort_order: options.order,
        }
    }
}

pub async fn run(options: ForumOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Fetching {} forum threads for game {}...",
            options.forum_type, options.game
        );
    }

    let client = create_client(&global)?;
    let query = ForumQuery::from(&options);
    let output = forum_threads_data(&client, &global, &query).await?;

    if options.json {
        println!("{}", format_forum_json(&output)?);
    } else {
        print!("{}", format_forum_text(&output, &query));
    }

    Ok(())
}

/// Resolves the game's forum of the requested kind, then fetches and sorts
/// one page of its threads
pub async fn forum_threads_data(
    client: &reqwest::Client,
    global: &crate::Global,
    query: &ForumQuery,
) -> Result<ForumThreadsOutput> {
    let list_request = BggRequest::forum_list(&query.game_id)?;
    let list_body = fetch_xml(client, global, &list_request).await?;
    let (forum, page) = resolve_forum(&list_body, query)?;

    let request = BggRequest::forum(&forum.id, page.page, page.count)?;
    let body = fetch_xml(client, global, &request).await?;

    forum_page_output(&body, &page)
}

/// Picks the forum of the requested kind out of a `/forumlist` body
fn resolve_forum(list_body: &str, query: &ForumQuery) -> Result<(Forum, ForumPage)> {
    let game_id = extract_object_id(&query.game_id, "boardgame");
    let forums = parse_forum_list(list_body)?;
    let forum = find_forum(&forums, query.kind, &game_id)?.clone();
    debug!(
        "Resolved {} forum of game {} to {} ({})",
        query.kind, game_id, forum.id, forum.title
    );

    let page = ForumPage {
        game_id,
        kind: query.kind,
        page: query.page.max(1),
        count: query.count,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    Ok((forum, page))
}

/// Maps a `/forum` body and sorts its threads
fn forum_page_output(body: &str, page: &ForumPage) -> Result<ForumThreadsOutput> {
    let mut output = parse_forum_threads(body, page)?;
    sort_threads(&mut output.threads, page.sort_by, page.sort_order);
    Ok(output)
}

fn format_forum_json(output: &ForumThreadsOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_forum_text(output: &ForumThreadsOutput, query: &ForumQuery) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "{} FORUM (Page {}, sorted by {} {})",
            output.forum_title.to_uppercase(),
            output.page,
            query.sort_by,
            query.sort_order
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}: {} | {}: {} | {}: {}\n",
        "Threads".green(),
        output.thread_count.to_string().bright_yellow(),
        "Posts".green(),
        output.post_count.to_string().bright_yellow(),
        "Last post".green(),
        format_date(output.last_post_date).bright_black()
    ));

    if output.threads.is_empty() {
        result.push_str(&format!("\n{}\n", "No threads on this page.".yellow()));
    } else {
        for (idx, thread) in output.threads.iter().enumerate() {
            result.push_str(&format!(
                "\n{} {}\n",
                format!("[{}]", idx + 1).yellow().bold(),
                thread.subject.white().bold()
            ));
            result.push_str(&format!(
                "    {}: {} | {}: {} | {}: {} | {}: {}\n",
                "By".green(),
                thread.author.bright_white(),
                "Articles".green(),
                thread.num_articles.to_string().bright_magenta(),
                "Posted".green(),
                format_date(thread.post_date).bright_black(),
                "Last post".green(),
                format_date(thread.last_post_date).bright_black()
            ));
            result.push_str(&format!(
                "    {}: {} | {}: {}\n",
                "ID".green(),
                thread.id.bright_white(),
                "Read".green(),
                format!("bggtools thread {}", thread.id).cyan()
            ));
        }
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    if let Some(next) = &output.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &output.prev_page_command {
        result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }

    result.push_str(&format!("\n{}:\n", "To change sorting".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        format!(
            "bggtools forum {} --type {} --sort-by <mostRecent|newest|mostActive|alphabetical> --order <desc|asc>",
            query.game_id, query.kind
        )
        .cyan()
    ));

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bggtools_core::bgg::ForumThread;

    fn create_test_query() -> ForumQuery {
        ForumQuery {
            game_id: "13".to_string(),
            kind: ForumKind::Reviews,
            page: 1,
            count: 50,
            sort_by: SortBy::MostActive,
            sort_order: SortOrder::Desc,
        }
    }

    fn create_test_output(threads: Vec<ForumThread>) -> ForumThreadsOutput {
        ForumThreadsOutput {
            forum_id: "66".to_string(),
            forum_title: "Reviews".to_string(),
            thread_count: 120,
            post_count: 900,
            last_post_date: None,
            page: 1,
            threads,
            next_page_command: Some(
                "bggtools forum 13 --type reviews --page 2 --count 50 --sort-by mostActive"
                    .to_string(),
            ),
            prev_page_command: None,
        }
    }

    fn create_test_thread(id: &str, subject: &str) -> ForumThread {
        ForumThread {
            id: id.to_string(),
            subject: subject.to_string(),
            author: "alice".to_string(),
            num_articles: 12,
            post_date: None,
            last_post_date: None,
        }
    }

    #[test]
    fn test_forum_query_from_options() {
        let options = ForumOptions {
            game: "13".to_string(),
            forum_type: ForumKind::Rules,
            page: 2,
            count: 25,
            sort_by: SortBy::Newest,
            order: SortOrder::Asc,
            json: false,
        };

        let query = ForumQuery::from(&options);

        assert_eq!(query.kind, ForumKind::Rules);
        assert_eq!(query.page, 2);
        assert_eq!(query.count, 25);
        assert_eq!(query.sort_by, SortBy::Newest);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_format_forum_json() {
        let output = create_test_output(vec![create_test_thread("100", "A classic")]);

        let json = format_forum_json(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["forum_id"], "66");
        assert_eq!(parsed["thread_count"], 120);
        assert_eq!(parsed["threads"][0]["num_articles"], 12);
        assert!(parsed["threads"][0]["post_date"].is_null());
    }

    #[test]
    fn test_format_forum_text() {
        let output = create_test_output(vec![
            create_test_thread("100", "A classic"),
            create_test_thread("101", "Not for me"),
        ]);

        let formatted = format_forum_text(&output, &create_test_query());

        assert!(formatted.contains("REVIEWS FORUM (Page 1, sorted by mostActive desc)"));
        assert!(formatted.contains("[1]"));
        assert!(formatted.contains("A classic"));
        assert!(formatted.contains("[2]"));
        assert!(formatted.contains("bggtools thread 101"));
        assert!(formatted.contains("unknown"));
    }

    #[test]
    fn test_format_forum_text_navigation() {
        let output = create_test_output(vec![create_test_thread("100", "A classic")]);

        let formatted = format_forum_text(&output, &create_test_query());

        assert!(formatted.contains("NAVIGATION"));
        assert!(formatted.contains("Next page"));
        assert!(formatted.contains("bggtools forum 13 --type reviews --page 2 --count 50"));
        assert!(!formatted.contains("Previous page"));
    }

    #[test]
    fn test_format_forum_text_empty() {
        let output = create_test_output(vec![]);

        let formatted = format_forum_text(&output, &create_test_query());

        assert!(formatted.contains("No threads on this page."));
    }

    const FORUM_LIST: &str = r#"<forums type="thing" id="13">
        <forum id="66" title="Reviews" noposting="0" description="" numthreads="3" numposts="20" lastpostdate="" />
        <forum id="68" title="General" noposting="0" description="" numthreads="900" numposts="7000" lastpostdate="" />
    </forums>"#;

    const REVIEWS_PAGE: &str = r#"<forum id="66" title="Reviews" numthreads="3" numposts="20" lastpostdate="">
        <threads>
            <thread id="100" subject="A classic" author="alice" numarticles="5" postdate="Mon, 01 Mar 2021 10:00:00 +0000" lastpostdate="Fri, 01 Oct 2021 10:00:00 +0000" />
            <thread id="101" subject="Not for me" author="bob" numarticles="12" postdate="Tue, 02 Mar 2021 10:00:00 +0000" lastpostdate="Sat, 01 Jan 2022 12:00:00 +0000" />
            <thread id="102" subject="Quick take" author="carol" numarticles="1" postdate="Wed, 03 Mar 2021 10:00:00 +0000" lastpostdate="Wed, 03 Mar 2021 10:00:00 +0000" />
        </threads>
    </forum>"#;

    #[test]
    fn test_forum_lookup_chain() {
        let mut query = create_test_query();
        query.game_id = "https://boardgamegeek.com/boardgame/13/catan".to_string();
        query.count = 2;

        let (forum, page) = resolve_forum(FORUM_LIST, &query).unwrap();
        assert_eq!(forum.id, "66");
        assert_eq!(page.game_id, "13");

        let request = BggRequest::forum(&forum.id, page.page, page.count).unwrap();
        assert_eq!(
            request.url(bggtools_core::bgg::BGG_API_BASE),
            "https://boardgamegeek.com/xmlapi2/forum?id=66&page=1&count=2"
        );

        let output = forum_page_output(REVIEWS_PAGE, &page).unwrap();
        let ids: Vec<&str> = output.threads.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["101", "100", "102"]);
        assert_eq!(
            output.next_page_command.as_deref(),
            Some("bggtools forum 13 --type reviews --page 2 --count 2 --sort-by mostActive")
        );
    }

    #[test]
    fn test_forum_lookup_chain_missing_forum() {
        let mut query = create_test_query();
        query.kind = ForumKind::Variants;

        let err = resolve_forum(FORUM_LIST, &query).unwrap_err();

        assert_eq!(err.to_string(), "variants forum not found for game 13");
    }

    #[tokio::test]
    async fn test_forum_threads_data_requires_game_id() {
        let global = crate::bgg::test_global();
        let client = create_client(&global).unwrap();
        let mut query = create_test_query();
        query.game_id = String::new();

        let err = forum_threads_data(&client, &global, &query)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Game ID is required");
    }
}
