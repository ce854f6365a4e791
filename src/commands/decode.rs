//! Decode command handler

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use harvest::table::{decode_file, Flush};

/// Print every decoded row of a result file as a JSON line.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, deferred: bool, limit: Option<usize>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(file, deferred, limit, &mut out)
}

pub(crate) fn run(
    file: &Path,
    deferred: bool,
    limit: Option<usize>,
    out: &mut impl Write,
) -> Result<()> {
    let flush = if deferred {
        Flush::Deferred
    } else {
        Flush::AtEof
    };
    let decoded = decode_file(file, None, flush)?;

    let limit = limit.unwrap_or(usize::MAX);
    for record in decoded.records.iter().take(limit) {
        let line = serde_json::to_string(record).context("Failed to serialize row")?;
        writeln!(out, "{}", line)?;
    }

    if decoded.dropped > 0 {
        eprintln!("Skipped {} short row(s)", decoded.dropped);
    }
    Ok(())
}
