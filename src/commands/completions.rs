//! Completions command handler

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};
use std::io::{self, Write};

/// Print a completion script for `shell`.
#[cfg(not(tarpaulin_include))]
pub fn handle<C: CommandFactory>(shell: CompletionShell) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    generate_completions::<C>(shell, &mut out)
}

pub(crate) fn generate_completions<C: CommandFactory>(
    shell: CompletionShell,
    out: &mut impl Write,
) -> Result<()> {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "harvest", out);
    Ok(())
}
