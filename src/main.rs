//! jtdiff command-line interface.
//!
//! Loads two documents, builds a tree from each, merges the trees and prints
//! the resulting change report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jtdiff::{
    build_tree, diff, format_report, parse_file, BuildOptions, DiffConfig, DiffStats, ListMode,
    OutputFormat, OutputOptions,
};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// jtdiff - structural diff of two JSON documents
///
/// Reports every key and value that was inserted, deleted or updated between
/// the old and the new document. Key order is ignored.
#[derive(Parser)]
#[command(name = "jtdiff")]
#[command(version)]
#[command(about = "Structural diff of two JSON documents", long_about = None)]
struct Cli {
    /// Old document
    #[arg(value_name = "OLD")]
    old: PathBuf,

    /// New document
    #[arg(value_name = "NEW")]
    new: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// How list elements are placed in the tree
    #[arg(long, value_enum, default_value = "flatten")]
    list_mode: ListModeArg,

    /// Report changed scalar values as updates
    #[arg(short = 'u', long)]
    detect_updates: bool,

    /// Exit with status 1 when differences are found
    #[arg(long)]
    exit_code: bool,

    /// Verbose output (log progress to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress the summary line)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ListModeArg {
    /// Merge object elements into the list node (positions are ignored)
    Flatten,
    /// Key each element by its position
    Indexed,
}

impl From<ListModeArg> for ListMode {
    fn from(arg: ListModeArg) -> Self {
        match arg {
            ListModeArg::Flatten => ListMode::Flatten,
            ListModeArg::Indexed => ListMode::Indexed,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    debug!("Parsing {}", cli.old.display());
    let old = parse_file(&cli.old)
        .with_context(|| format!("Failed to load old document: {}", cli.old.display()))?;

    debug!("Parsing {}", cli.new.display());
    let new = parse_file(&cli.new)
        .with_context(|| format!("Failed to load new document: {}", cli.new.display()))?;

    let build_options = BuildOptions {
        list_mode: cli.list_mode.into(),
    };
    let old_tree = build_tree(&old, &build_options);
    let new_tree = build_tree(&new, &build_options);

    debug!("Computing diff");
    let diff_config = DiffConfig {
        detect_updates: cli.detect_updates,
    };
    let merged = diff(Some(old_tree), Some(&new_tree), &diff_config)?;

    let output_options = OutputOptions {
        summary: !cli.quiet,
    };
    let output_format: OutputFormat = cli.format.into();
    let output = format_report(&merged, &output_format, &output_options)
        .context("Failed to format diff report")?;

    if output.ends_with('\n') {
        print!("{}", output);
    } else if !output.is_empty() {
        println!("{}", output);
    }

    if cli.exit_code && !DiffStats::collect(&merged).is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}
