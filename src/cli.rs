//! CLI definitions for harvest
//!
//! The clap structure lives in the library so completion generation and
//! tests can reach it without going through the binary.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use crate::dialect::Dialect;
use crate::params::ParamsFormat;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "[ harvest ] - compile search queries for collectors and follow their results")]
#[command(
    long_about = "harvest - compile free-form boolean search queries into collector query
documents, and decode the result tables those collectors append to.

Queries support exact phrases in double quotes, one level of parenthesized
groups, and the AND / OR / NOT keywords.

QUICK START:
    harvest compile '\"red rust\" wheat NOT oats'    Print both query documents
    harvest compile 'wheat OR barley' --out params  Write collector parameter files
    harvest decode results.csv                      Print decoded result rows
    harvest watch results.csv                       Follow a growing result file
    harvest status results.csv                      Show collector progress

Set RUST_LOG=debug to see how each term was classified."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a query into collector query documents
    #[command(long_about = "Compile a free-form query into one query document per collector.

Without --out the documents are printed to stdout as JSON. With --out a
parameter file per dialect is written into the directory, named
<dialect>_search_params_<id>.<py|json>. --write does the same in the
configured output directory. --latest also writes the stable
<dialect>_search_params.<py|json>, replacing the previous search.

EXAMPLES:
    harvest compile 'wheat \"leaf rust\"'
    harvest compile 'crop NOT drought' --dialect feed
    harvest compile '(wheat OR barley)' --buckets
    harvest compile 'rain' --out ./params --search-id 42
    harvest compile 'rain' --out ./params --format json --all-time
    harvest compile 'rain' --write --latest")]
    Compile {
        /// Raw query text
        #[arg(help = "Query text, e.g. '\"stem rust\" wheat NOT oats'")]
        query: String,
        /// Dialects to emit (repeatable)
        #[arg(long, short, value_enum, help = "Only emit this dialect (repeatable)")]
        dialect: Vec<Dialect>,
        /// Drop the feed date window
        #[arg(long, help = "Search all time (omit the feed date window)")]
        all_time: bool,
        /// Print the normalized term buckets instead of documents
        #[arg(long, help = "Print the term buckets instead of documents")]
        buckets: bool,
        /// Write parameter files into this directory
        #[arg(long, short, help = "Write parameter files into DIR")]
        out: Option<PathBuf>,
        /// Write parameter files into the configured output directory
        #[arg(
            long,
            short,
            conflicts_with = "out",
            help = "Write parameter files into the configured output directory"
        )]
        write: bool,
        /// Identifier embedded in parameter file names
        #[arg(long, help = "Search ID for parameter files (default: unix timestamp)")]
        search_id: Option<String>,
        /// Parameter file format
        #[arg(long, short, value_enum, help = "Parameter file format (default from config)")]
        format: Option<ParamsFormat>,
        /// Also write the unsuffixed parameter file
        #[arg(long, help = "Also write <dialect>_search_params.<ext> without the search ID")]
        latest: bool,
    },

    /// Decode a collector result file
    #[command(long_about = "Decode a collector result table and print each row as a JSON line.

The trailing row is flushed even without a final newline, unless
--deferred is given, in which case it is treated as still being written.

EXAMPLES:
    harvest decode results.csv
    harvest decode results.csv --limit 20
    harvest decode results.csv --deferred")]
    Decode {
        #[arg(help = "Path to the result file")]
        file: PathBuf,
        #[arg(long, help = "Hold back a trailing row without a newline")]
        deferred: bool,
        #[arg(long, short = 'n', help = "Print at most N rows")]
        limit: Option<usize>,
    },

    /// Follow a result file as a collector writes it
    #[command(long_about = "Poll a result file and print new rows as JSON lines as they appear.

Rows are printed once each. A missing file is waited for. Stops on Ctrl-C.
A trailing row without a newline may still be mid-write, so it is only
printed on exit when --flush-on-exit is given.

EXAMPLES:
    harvest watch results.csv
    harvest watch results.csv --interval 1
    harvest watch results.csv --flush-on-exit")]
    Watch {
        #[arg(help = "Path to the result file")]
        file: PathBuf,
        #[arg(long, short, help = "Seconds between polls (default from config)")]
        interval: Option<u64>,
        #[arg(long, help = "Print an unterminated trailing row when stopping")]
        flush_on_exit: bool,
    },

    /// Show collector progress from its result file
    #[command(long_about = "Report whether a collector has started, is running, or has completed.

A collector counts as completed once its result file holds at least
the threshold number of rows.

EXAMPLES:
    harvest status results.csv
    harvest status results.csv --threshold 100
    harvest status results.csv --json

OUTPUT:
    Status: running
       Rows: 3
       Size: 1.2 KiB
       Modified: 2026-01-02T10:00:00Z")]
    Status {
        #[arg(help = "Path to the result file")]
        file: PathBuf,
        #[arg(long, short, help = "Rows needed to count as completed (default from config)")]
        threshold: Option<usize>,
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View the harvest configuration file.

Configuration is stored in ~/.config/harvest/config.toml (override with
$HARVEST_CONFIG) and holds collector defaults, decoder polling settings,
and the parameter output directory.

EXAMPLES:
    harvest config show      Display current configuration
    harvest config path      Print the config file location"
    )]
    Config(ConfigCommands),

    /// Generate shell completions (internal use)
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the current configuration in TOML format.

Missing fields are shown with their defaults.

EXAMPLE:
    harvest config show")]
    Show,
    /// Print the configuration file path
    Path,
}
