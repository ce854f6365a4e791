//! Compile command handler

use anyhow::{Context, Result};
use chrono::Utc;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use harvest::params::{self, ParamsFormat};
use harvest::{compile, CompileOptions, CompiledQuery, Config, Dialect};

/// Where compiled documents go.
pub struct Output<'a> {
    /// Write parameter files here instead of printing documents
    pub dir: Option<&'a Path>,
    /// Write parameter files into the configured output directory
    pub write: bool,
    pub search_id: Option<&'a str>,
    pub format: Option<ParamsFormat>,
    /// Also write the unsuffixed `<dialect>_search_params.<ext>`
    pub latest: bool,
}

impl Output<'_> {
    /// Target directory, if parameter files should be written at all.
    fn directory(&self, config: &Config) -> Option<PathBuf> {
        match self.dir {
            Some(dir) => Some(dir.to_path_buf()),
            None if self.write => Some(config.output_directory()),
            None => None,
        }
    }
}

/// Compile a query and print or write the documents.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    query: &str,
    dialects: &[Dialect],
    all_time: bool,
    show_buckets: bool,
    output: Output<'_>,
) -> Result<()> {
    let config = Config::load()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_config(
        &config,
        query,
        dialects,
        all_time,
        show_buckets,
        &output,
        &mut out,
    )
}

/// Compile against an explicit config and write to `out` (for testing).
pub(crate) fn run_with_config(
    config: &Config,
    query: &str,
    dialects: &[Dialect],
    all_time: bool,
    show_buckets: bool,
    output: &Output<'_>,
    out: &mut impl Write,
) -> Result<()> {
    let mut options = CompileOptions::default().dialects(dialects);
    if all_time {
        options = options.all_time(true);
    }
    let compiled = compile(query, config, &options);

    if show_buckets {
        let json = serde_json::to_string_pretty(&compiled.buckets)
            .context("Failed to serialize term buckets")?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    match output.directory(config) {
        Some(dir) => {
            let search_id = output
                .search_id
                .map(str::to_string)
                .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());
            let format = output.format.unwrap_or(config.output.format);
            for path in write_all(config, &compiled, &dir, &search_id, format, output.latest)? {
                writeln!(out, "{}", path.display())?;
            }
        }
        None => {
            let mut documents = serde_json::Map::new();
            for spec in &compiled.specs {
                let value = spec
                    .to_value()
                    .context("Failed to serialize query documents")?;
                documents.insert(spec.dialect().name().to_string(), value);
            }
            let json = serde_json::to_string_pretty(&documents)
                .context("Failed to serialize query documents")?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

fn write_all(
    config: &Config,
    compiled: &CompiledQuery,
    dir: &Path,
    search_id: &str,
    format: ParamsFormat,
    latest: bool,
) -> Result<Vec<PathBuf>> {
    // Reject a bad ID before anything lands on disk
    params::validate_search_id(search_id)?;

    let mut paths = Vec::new();
    for spec in &compiled.specs {
        let minimum = spec.dialect().minimum_results(config);
        paths.push(params::write_params(dir, search_id, spec, format, minimum)?);
        if latest {
            paths.push(params::write_latest(dir, search_id, spec, format, minimum)?);
        }
    }
    Ok(paths)
}
