//! Emoji table generator
//!
//! Builds the picker's static lookup table from Unicode `emoji-test.txt`,
//! optionally enriched with CLDR Korean annotations.
//!
//! Run with:
//!   cargo run -p emoji-data-gen
//!   cargo run -p emoji-data-gen -- --version 16.0
//!   cargo run -p emoji-data-gen -- --url ./emoji-test.txt --no-ko --out lib/emoji-data.json

mod fetch;

use anyhow::{Context, Result};
use clap::Parser;
use emoji_kit::artifact::{self, OutputFormat};
use emoji_kit::storage::write_atomic;
use emoji_kit::{AnnotationInputs, ParseOptions};
use fetch::Source;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// "latest" isn't a stable directory name upstream; bump this when Unicode ships
const DEFAULT_UNICODE_VERSION: &str = "16.0";

const DEFAULT_ANNOTATIONS_URL: &str =
    "https://raw.githubusercontent.com/unicode-org/cldr/main/common/annotations/ko.xml";
const DEFAULT_ANNOTATIONS_DERIVED_URL: &str =
    "https://raw.githubusercontent.com/unicode-org/cldr/main/common/annotationsDerived/ko.xml";

#[derive(Parser, Debug, Clone)]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// emoji-test.txt URL or local path (overrides --version)
    #[arg(long, env = "EMOJI_TEST_URL")]
    url: Option<String>,

    /// Unicode emoji version used to build the default URL, e.g. "16.0"
    #[arg(long = "version", env = "EMOJI_VERSION", default_value = DEFAULT_UNICODE_VERSION)]
    unicode_version: String,

    /// CLDR Korean annotations (URL or path)
    #[arg(long, env = "CLDR_ANNOTATIONS_URL", default_value = DEFAULT_ANNOTATIONS_URL)]
    annotations: String,

    /// CLDR Korean derived annotations (URL or path)
    #[arg(long, env = "CLDR_ANNOTATIONS_DERIVED_URL", default_value = DEFAULT_ANNOTATIONS_DERIVED_URL)]
    annotations_derived: String,

    /// Output file
    #[arg(short, long, env = "EMOJI_OUT", default_value = "lib/emoji-data.ts")]
    out: PathBuf,

    /// Output format; inferred from the --out extension when omitted
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Keep minimally-qualified, unqualified and component entries
    #[arg(long)]
    include_non_fully_qualified: bool,

    /// Skip Korean annotations entirely
    #[arg(long)]
    no_ko: bool,
}

impl Args {
    fn registry_source(&self) -> Source {
        match &self.url {
            Some(url) => Source::from_arg(url),
            None => Source::Url(format!(
                "https://unicode.org/Public/emoji/{}/emoji-test.txt",
                self.unicode_version
            )),
        }
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_else(|| OutputFormat::from_path(&self.out))
    }
}

/// What a successful run produced
#[derive(Debug)]
struct Summary {
    out: PathBuf,
    source: String,
    emojis: usize,
    categories: usize,
    localized: usize,
}

fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Fetch an annotation file; failures are logged and yield `None`
async fn fetch_optional(client: &reqwest::Client, source: &Source) -> Option<String> {
    match source.fetch_text(client).await {
        Ok(text) => Some(text),
        Err(e) => {
            let error = format!("{:#}", e);
            tracing::warn!(source = %source, error = %error, "annotation source unavailable, continuing without it");
            None
        }
    }
}

async fn run(args: &Args) -> Result<Summary> {
    let client = fetch::http_client()?;
    let registry_source = args.registry_source();

    let pb = spinner(format!("Fetching {}", registry_source))?;
    let registry_text = registry_source
        .fetch_text(&client)
        .await
        .context("Failed to fetch emoji-test.txt");
    let registry_text = match registry_text {
        Ok(text) => text,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    let (base_xml, derived_xml) = if args.no_ko {
        (None, None)
    } else {
        pb.set_message("Fetching CLDR annotations");
        let base = Source::from_arg(&args.annotations);
        let derived = Source::from_arg(&args.annotations_derived);
        tokio::join!(fetch_optional(&client, &base), fetch_optional(&client, &derived))
    };
    pb.finish_and_clear();

    let annotations = AnnotationInputs {
        base: base_xml.as_deref(),
        derived: derived_xml.as_deref(),
    };
    let options = ParseOptions {
        only_fully_qualified: !args.include_non_fully_qualified,
    };
    let source = registry_source.to_string();
    let table = emoji_kit::generate(&registry_text, &annotations, options, &source)?;

    let rendered = artifact::render(&table, args.output_format())?;
    write_atomic(&args.out, rendered.as_bytes())
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    Ok(Summary {
        out: args.out.clone(),
        source,
        emojis: table.len(),
        categories: table.categories.len(),
        localized: table.emoji_meta.values().filter(|m| m.localized_name.is_some()).count(),
    })
}

/// The one stderr line printed for a fatal error, with its context chain
fn failure_message(err: &anyhow::Error) -> String {
    format!("Failed: {:#}", err)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emoji_data_gen=info,emoji_kit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args).await {
        Ok(summary) => {
            println!("Generated {}", summary.out.display());
            println!("   Source: {}", summary.source);
            println!("   Count: {} (deduped)", summary.emojis);
            println!("   Categories: {}", summary.categories);
            println!("   Localized: {}", summary.localized);
        }
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            std::process::exit(1);
        }
    }
}
