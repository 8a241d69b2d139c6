mod render;
mod response;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use switchbind_core::{DEFAULT_NAMESPACE, NameComparison, ParseOptions, SwitchIndex, Tokenizer};
use tracing_subscriber::EnvFilter;

use crate::render::{Format, InspectReport, LookupReport, TokensReport};
use crate::response::FileLineSource;

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "switchbind",
    version,
    about = "Inspect how switch-style command lines are tokenized and indexed"
)]
struct Cli {
    /// Output mode: "pretty" for terminal text, "json" for machine-readable
    /// JSON. Defaults to "pretty" when stdout is a TTY, "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Split an embedded command line into tokens.
    Tokenize { line: String },

    /// Classify arguments into positional values and switches.
    ///
    /// Arguments go after `--`; `@file` references are expanded from disk
    /// relative to the current directory.
    Inspect {
        /// Compare switch names case-sensitively.
        #[arg(long)]
        case_sensitive: bool,
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Look up one switch by alias key (`o|out|output`).
    Lookup {
        key: String,
        /// Namespace (prefix length) to search.
        #[arg(long, default_value_t = DEFAULT_NAMESPACE)]
        namespace: usize,
        /// Compare switch names case-sensitively.
        #[arg(long)]
        case_sensitive: bool,
        #[arg(last = true)]
        args: Vec<String>,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Tokenize { line } => cmd_tokenize(&line, format)?,
        Cmd::Inspect {
            case_sensitive,
            args,
        } => cmd_inspect(&args, case_sensitive, format)?,
        Cmd::Lookup {
            key,
            namespace,
            case_sensitive,
            args,
        } => cmd_lookup(&key, namespace, &args, case_sensitive, format)?,
    }
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_tokenize(line: &str, format: Format) -> Result<()> {
    let tokens = Tokenizer::new()
        .tokenize(line)
        .with_context(|| format!("failed to tokenize {line:?}"))?;
    render::print_tokens(&TokensReport { line, tokens }, format)
}

fn cmd_inspect(args: &[String], case_sensitive: bool, format: Format) -> Result<()> {
    let index = index_args(args, case_sensitive)?;
    render::print_inspect(&InspectReport::new(&index), format)
}

fn cmd_lookup(
    key: &str,
    namespace: usize,
    args: &[String],
    case_sensitive: bool,
    format: Format,
) -> Result<()> {
    let index = index_args(args, case_sensitive)?;
    render::print_lookup(&LookupReport::new(&index, key, namespace), format)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn index_args(args: &[String], case_sensitive: bool) -> Result<SwitchIndex> {
    let comparison = if case_sensitive {
        NameComparison::CaseSensitive
    } else {
        NameComparison::CaseInsensitive
    };
    let cwd = std::env::current_dir().context("failed to resolve the current directory")?;
    let options = ParseOptions::default()
        .with_comparison(comparison)
        .with_line_source(Arc::new(FileLineSource::new(cwd)));
    tracing::debug!(?options, args = args.len(), "indexing arguments");
    SwitchIndex::parse_with(args, options).context("failed to index arguments")
}
