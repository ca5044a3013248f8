use crate::prelude::{eprintln, println, *};
use bggtools_core::bgg::{parse_operations, settle, Operation};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use super::{create_client, execute};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BatchOptions {
    /// File with input items as a JSON array or JSON lines (stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Emit an error record for a failed item instead of aborting the run
    #[arg(long, env = "BGG_CONTINUE_ON_FAIL")]
    pub continue_on_fail: bool,

    /// Print one compact JSON record per line instead of a pretty array
    #[arg(long)]
    pub lines: bool,
}

pub async fn run(options: BatchOptions, global: crate::Global) -> Result<()> {
    let input = read_input(options.input.as_ref()).await?;
    let operations = parse_operations(&input)?;

    if global.verbose {
        eprintln!("Running {} input items...", operations.len());
    }

    let client = create_client(&global)?;
    let outputs = run_batch(&client, &global, &operations, options.continue_on_fail).await?;

    if options.lines {
        for output in &outputs {
            println!("{}", serde_json::to_string(output)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    }

    Ok(())
}

async fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .wrap_err("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Run every item in order, one output record per item.
///
/// A failing item either becomes `{"error": ...}` (with `continue_on_fail`)
/// or stops the run with that item's error.
pub async fn run_batch(
    client: &reqwest::Client,
    global: &crate::Global,
    operations: &[Operation],
    continue_on_fail: bool,
) -> Result<Vec<serde_json::Value>> {
    let mut outputs = Vec::with_capacity(operations.len());

    for (idx, operation) in operations.iter().enumerate() {
        let result = execute(client, global, operation).await;
        if let Err(err) = &result {
            warn!("Item {idx} ({operation}) failed: {err}");
        }
        outputs.push(settle(result, continue_on_fail)?);
    }

    info!("Processed {} input items", outputs.len());
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bggtools_core::bgg::{ForumKind, SortBy, SortOrder};
    use serde_json::json;

    fn failing_items() -> Vec<Operation> {
        vec![
            Operation::GetGame {
                game_id: String::new(),
            },
            Operation::SearchGames {
                search_query: "   ".to_string(),
            },
            Operation::GetForumThreads {
                game_id: String::new(),
                forum_type: ForumKind::General,
                page: 1,
                count: 50,
                sort_by: SortBy::MostRecent,
                sort_order: SortOrder::Desc,
            },
            Operation::GetThread {
                thread_id: String::new(),
            },
        ]
    }

    #[tokio::test]
    async fn test_run_batch_continue_on_fail_emits_error_records() {
        let global = crate::bgg::test_global();
        let client = create_client(&global).unwrap();

        let outputs = run_batch(&client, &global, &failing_items(), true)
            .await
            .unwrap();

        assert_eq!(
            outputs,
            vec![
                json!({ "error": "Game ID is required" }),
                json!({ "error": "Search query is required" }),
                json!({ "error": "Game ID is required" }),
                json!({ "error": "Thread ID is required" }),
            ]
        );
    }

    #[tokio::test]
    async fn test_run_batch_stops_at_first_failure() {
        let global = crate::bgg::test_global();
        let client = create_client(&global).unwrap();

        let err = run_batch(&client, &global, &failing_items(), false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Game ID is required");
    }

    #[tokio::test]
    async fn test_run_batch_empty_input() {
        let global = crate::bgg::test_global();
        let client = create_client(&global).unwrap();

        let outputs = run_batch(&client, &global, &[], false).await.unwrap();

        assert!(outputs.is_empty());
    }

    #[tokio::test]
    async fn test_read_input_from_file() {
        let path = std::env::temp_dir().join(format!("bggtools-batch-{}.jsonl", std::process::id()));
        tokio::fs::write(&path, "{\"operation\": \"getHotItems\"}\n")
            .await
            .unwrap();

        let input = read_input(Some(&path)).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(
            parse_operations(&input).unwrap(),
            vec![Operation::GetHotItems { kind: None }]
        );
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let path = PathBuf::from("/nonexistent/bggtools/items.json");

        let err = read_input(Some(&path)).await.unwrap_err();

        assert!(err.to_string().contains("Failed to read"));
    }
}
