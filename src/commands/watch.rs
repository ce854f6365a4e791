//! Watch command handler

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use harvest::{Config, DecodeError, ResultStream};

/// Granularity at which the poll sleep checks for Ctrl-C
const TICK: Duration = Duration::from_millis(100);

/// Follow a result file until interrupted, printing new rows as JSON lines.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, interval: Option<u64>, flush_on_exit: bool) -> Result<()> {
    let config = Config::load()?;
    let interval = interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());

    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .ok(); // Ignore if handler already set

    eprintln!("Watching {} (Ctrl-C to stop)", file.display());

    let mut stream = ResultStream::new(file);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    follow(&mut stream, &stop, interval, flush_on_exit, &mut out)?;
    Ok(())
}

/// Poll until `stop` is set; returns the number of rows printed.
///
/// An interrupt says nothing about the writer, so an unterminated trailing
/// row stays held back unless `flush_on_exit` asks for it.
pub(crate) fn follow(
    stream: &mut ResultStream,
    stop: &AtomicBool,
    interval: Duration,
    flush_on_exit: bool,
    out: &mut impl Write,
) -> Result<usize> {
    let mut printed = 0;
    while !stop.load(Ordering::SeqCst) {
        printed += poll_once(stream, out)?;
        sleep_unless_stopped(interval, stop);
    }

    if flush_on_exit {
        stream.finish();
        printed += poll_once(stream, out)?;
    }
    debug!(printed, total = stream.emitted(), flush_on_exit, "watch stopped");
    Ok(printed)
}

/// Print rows that appeared since the last poll; returns how many.
///
/// Read failures are retried on the next poll.
pub(crate) fn poll_once(stream: &mut ResultStream, out: &mut impl Write) -> Result<usize> {
    let fresh = match stream.poll_new() {
        Ok(fresh) => fresh,
        Err(e) if e.is_not_found() => return Ok(0),
        Err(e) => {
            report_retry(&e);
            return Ok(0);
        }
    };

    for record in &fresh {
        let line = serde_json::to_string(record).context("Failed to serialize row")?;
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(fresh.len())
}

fn report_retry(err: &DecodeError) {
    if err.is_retryable() {
        warn!(error = %err, "read failed, retrying on next poll");
    }
}

fn sleep_unless_stopped(interval: Duration, stop: &AtomicBool) {
    let deadline = Instant::now() + interval;
    while !stop.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(TICK.min(deadline - now));
    }
}
