//! harvest - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use harvest::cli::{Cli, Commands, ConfigCommands};

/// Log to stderr so stdout stays machine readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            query,
            dialect,
            all_time,
            buckets,
            out,
            write,
            search_id,
            format,
            latest,
        } => commands::compile::handle(
            &query,
            &dialect,
            all_time,
            buckets,
            commands::compile::Output {
                dir: out.as_deref(),
                write,
                search_id: search_id.as_deref(),
                format,
                latest,
            },
        ),
        Commands::Decode {
            file,
            deferred,
            limit,
        } => commands::decode::handle(&file, deferred, limit),
        Commands::Watch {
            file,
            interval,
            flush_on_exit,
        } => commands::watch::handle(&file, interval, flush_on_exit),
        Commands::Status {
            file,
            threshold,
            json,
        } => commands::status::handle(&file, threshold, json),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
