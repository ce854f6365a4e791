//! Status command handler

use anyhow::{Context, Result};
use std::path::Path;

use harvest::{Config, ResultStream, StatusReport};

/// Display collector progress for a result file.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, threshold: Option<usize>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let threshold = threshold.unwrap_or(config.decoder.completion_threshold);
    let report = ResultStream::new(file).status(threshold)?;

    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize status")?;
        println!("{}", text);
    } else {
        println!("{}", summary(&report));
    }
    Ok(())
}

/// Human readable multi-line summary of a status report.
pub(crate) fn summary(report: &StatusReport) -> String {
    let mut lines = vec![format!("Status: {}", report.status.as_str())];
    lines.push(format!("   Rows: {}", report.row_count));
    lines.push(format!(
        "   Size: {}",
        humansize::format_size(report.file_size, humansize::BINARY)
    ));
    if let Some(modified) = &report.last_modified {
        lines.push(format!("   Modified: {}", modified));
    }
    lines.join("\n")
}
