//! Output rendering for the CLI commands.
//!
//! Every command builds a serializable report. `Pretty` prints it as aligned
//! text for terminals; `Json` prints the report itself.

use std::io::{self, IsTerminal};

use serde::Serialize;
use switchbind_core::{Entry, NamedArgument, SwitchIndex};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Human-readable text.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Resolve an explicit `--output` value, or detect from stdout.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Reports ─────────────────────────────────────────────────────────────

/// Result of `tokenize`.
#[derive(Debug, Serialize)]
pub(crate) struct TokensReport<'a> {
    pub(crate) line: &'a str,
    pub(crate) tokens: Vec<String>,
}

/// Result of `inspect`.
#[derive(Debug, Serialize)]
pub(crate) struct InspectReport<'a> {
    pub(crate) raw: &'a [String],
    pub(crate) positional: &'a [String],
    pub(crate) named: Vec<&'a NamedArgument>,
    pub(crate) entries: &'a [Entry],
}

impl<'a> InspectReport<'a> {
    pub(crate) fn new(index: &'a SwitchIndex) -> Self {
        Self {
            raw: index.raw_args(),
            positional: index.positional_values(),
            named: index
                .namespaces()
                .flat_map(|ns| index.named_in(ns))
                .collect(),
            entries: index.entries(),
        }
    }
}

/// Result of `lookup`.
#[derive(Debug, Serialize)]
pub(crate) struct LookupReport<'a> {
    pub(crate) key: &'a str,
    pub(crate) namespace: usize,
    pub(crate) present: bool,
    pub(crate) value: Option<&'a str>,
    pub(crate) is_set: bool,
    pub(crate) prefix: Vec<&'a str>,
    pub(crate) suffix: Vec<&'a str>,
}

impl<'a> LookupReport<'a> {
    pub(crate) fn new(index: &'a SwitchIndex, key: &'a str, namespace: usize) -> Self {
        Self {
            key,
            namespace,
            present: index.contains(key, namespace),
            value: index.value_of(key, namespace),
            is_set: index.is_set(key, namespace),
            prefix: index.prefix_of(key, namespace).collect(),
            suffix: index.suffix_of(key, namespace).collect(),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────────

/// Print `report` as pretty JSON.
pub(crate) fn print_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub(crate) fn print_tokens(report: &TokensReport<'_>, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(report),
        Format::Pretty => {
            for (i, token) in report.tokens.iter().enumerate() {
                println!("[{i}] {token}");
            }
            Ok(())
        }
    }
}

pub(crate) fn print_inspect(report: &InspectReport<'_>, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(report),
        Format::Pretty => {
            println!("positional ({}):", report.positional.len());
            for (i, value) in report.positional.iter().enumerate() {
                println!("  [{i}] {value}");
            }
            println!("named ({}):", report.named.len());
            for arg in &report.named {
                println!(
                    "  {}{} {} (#{})",
                    "-".repeat(arg.namespace),
                    arg.name,
                    describe_value(arg),
                    arg.absolute_index
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn print_lookup(report: &LookupReport<'_>, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(report),
        Format::Pretty => {
            println!("key:       {} (namespace {})", report.key, report.namespace);
            println!("present:   {}", report.present);
            println!("value:     {}", report.value.unwrap_or("<none>"));
            println!("is set:    {}", report.is_set);
            println!("prefix:    {}", report.prefix.join(" "));
            println!("suffix:    {}", report.suffix.join(" "));
            Ok(())
        }
    }
}

fn describe_value(arg: &NamedArgument) -> String {
    match (arg.turn, arg.value.as_deref()) {
        (Some(turn), _) => format!("turned {}", turn.as_str()),
        (None, Some(value)) => format!("= {value}"),
        (None, None) => "(flag)".to_string(),
    }
}
