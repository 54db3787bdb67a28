//! Query a generated emoji table from the terminal
//!
//! Run with: cargo run --bin emoji-query -- --table lib/emoji-data.json grin
//!
//! With `--copy`, the top result is "copied" (written to stdout) and recorded
//! in a JSON recents file, the same way the web picker does it.

use anyhow::{Context, Result};
use clap::Parser;
use emoji_kit::clipboard::{Clipboard, CopyOutcome, CopyService};
use emoji_kit::search::{search, SearchView};
use emoji_kit::storage::JsonFileStore;
use emoji_kit::{ClipboardError, EmojiTable};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search query; omit to list categories
    query: Vec<String>,

    /// JSON table produced by emoji-data-gen --format json
    #[arg(short, long, env = "EMOJI_TABLE", default_value = "lib/emoji-data.json")]
    table: PathBuf,

    /// Maximum results to print
    #[arg(short, long, default_value_t = 40)]
    limit: usize,

    /// Copy the top result and record it in recents
    #[arg(long)]
    copy: bool,

    /// Print the recents list and exit
    #[arg(long)]
    recents: bool,

    /// Where recents are persisted
    #[arg(long, env = "EMOJI_RECENTS_FILE", default_value = ".emoji-recents.json")]
    recents_file: PathBuf,
}

/// Stands in for the system clipboard: writes the emoji to stdout
struct StdoutClipboard;

#[async_trait::async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        writeln!(std::io::stdout(), "{}", text).map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emoji_query=warn,emoji_kit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let service = CopyService::new(StdoutClipboard, JsonFileStore::new(&args.recents_file));

    if args.recents {
        for emoji in service.recents() {
            println!("{}", emoji);
        }
        return Ok(());
    }

    let json = std::fs::read_to_string(&args.table)
        .with_context(|| format!("Failed to read table {}", args.table.display()))?;
    let table = EmojiTable::from_json(&json).context("Failed to parse emoji table")?;

    let query = args.query.join(" ");
    match search(&table, &query) {
        SearchView::Categories(sections) => {
            for section in sections {
                println!("{:<24} {:>5}  {}", section.slug, section.emojis.len(), section.title);
            }
        }
        SearchView::Results(results) => {
            if args.copy {
                let Some(top) = results.first() else {
                    anyhow::bail!("No emoji matches {:?}", query);
                };
                if service.copy_emoji(top).await == CopyOutcome::Failed {
                    anyhow::bail!("Copy failed");
                }
                return Ok(());
            }
            for emoji in results.iter().take(args.limit) {
                let name = table.meta(emoji).map(|m| m.name.as_str()).unwrap_or("");
                println!("{}  {}", emoji, name);
            }
            if results.len() > args.limit {
                eprintln!("... {} more", results.len() - args.limit);
            }
        }
    }

    Ok(())
}
