//! Command-line interface for the cooker.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use console::style;

use crate::config::{
    ExtractConfig, ExtractMode, DEFAULT_COMMENT_MARKER, DEFAULT_FALLBACK_END_DATE,
};
use crate::cook::{cook_file, CookOptions};
use crate::diagnostics::{DiagnosticCollector, LogSink, Tee};
use crate::error::Result;
use crate::markup::TreeProvider;
use crate::output::{write_output, OutputFormat};

/// Markup Cooker - Convert tagged pseudo-markup reference data into JSON records.
#[derive(Parser, Debug)]
#[command(name = "markup-cooker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source file in pseudo-markup format
    pub source: PathBuf,

    /// Tag name of record roots (e.g., country)
    pub root_tag: String,

    /// Output file, or `.stdout` to write to standard output
    pub destination: PathBuf,

    /// Shape of leaf values
    #[arg(short, long, value_enum, default_value_t = ExtractMode::Record)]
    pub mode: ExtractMode,

    /// Character introducing comments
    #[arg(long, default_value_t = DEFAULT_COMMENT_MARKER)]
    pub comment_marker: char,

    /// End date for single-bound validity intervals (YYYYMMDD)
    #[arg(long, default_value = DEFAULT_FALLBACK_END_DATE)]
    pub fallback_end_date: String,

    /// Parser for the source text
    #[arg(short, long, value_enum, default_value_t = TreeProvider::Lenient)]
    pub parser: TreeProvider,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Build cooking options from the parsed flags.
    #[must_use]
    pub fn options(&self) -> CookOptions {
        let extract = ExtractConfig::new()
            .with_mode(self.mode)
            .with_comment_marker(self.comment_marker)
            .with_fallback_end_date(self.fallback_end_date.clone());

        CookOptions::new()
            .with_extract(extract)
            .with_provider(self.parser)
            .with_format(self.format)
            .with_pretty(self.pretty)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cook_command(&cli)
}

/// Execute a cooking run.
fn cook_command(cli: &Cli) -> Result<()> {
    // Point at the expected arguments, then let the read report the failure
    if !cli.source.exists() {
        eprintln!("{}", Cli::command().render_usage());
    }

    let options = cli.options();
    let mut sink = Tee(LogSink, DiagnosticCollector::new());
    let records = cook_file(&cli.source, &cli.root_tag, &options, &mut sink)?;
    let Tee(_, collector) = sink;

    let written = write_output(&records, &cli.destination, options.format, options.pretty)?;

    // Status goes to stderr so `.stdout` output stays clean
    eprintln!(
        "{} {} records from {}",
        style("Cooked").bold(),
        style(records.len()).cyan(),
        cli.source.display()
    );
    print_diagnostics_summary(&collector);
    if let Some(path) = written {
        eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    Ok(())
}

/// Print diagnostic counts per kind.
fn print_diagnostics_summary(collector: &DiagnosticCollector) {
    if collector.is_empty() {
        return;
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for diagnostic in collector.diagnostics() {
        *counts.entry(diagnostic.kind()).or_default() += 1;
    }

    eprintln!(
        "  Diagnostics: {}",
        style(collector.diagnostics().len()).yellow().bold()
    );
    for (kind, count) in counts {
        eprintln!("    {kind}: {count}");
    }
}
