// SPDX-License-Identifier: AGPL-3.0-only

//! Command-line front end shared by the hook binaries.
//!
//! Each binary is a one-line `main` that hands its [`Hook`] to [`main`]. The
//! only argument is the list of files the pre-commit framework passes in.

use crate::hooks::Hook;
use crate::logging;
use crate::runner::run_batch;
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::OnceLock;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short Git commit baked in by `build.rs`.
fn sha() -> &'static str {
    option_env!("ENVELOPE_HOOKS_COMMIT").unwrap_or("0000000")
}

fn rust_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

fn version_string() -> String {
    format!("{VERSION} (commit:{}) [rust:{}]", sha(), rust_version())
}

/// Cached version string with a 'static lifetime for clap metadata.
fn version_str() -> &'static str {
    static VERSION_STR: OnceLock<String> = OnceLock::new();
    VERSION_STR.get_or_init(version_string).as_str()
}

pub fn build_cli(hook: Hook) -> Command {
    Command::new(hook.name())
        .about(hook.about())
        .version(version_str())
        .arg(
            Arg::new("filenames")
                .value_name("FILE")
                .num_args(0..)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Envelope project filenames to check."),
        )
}

fn filenames(matches: &ArgMatches) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>("filenames")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default()
}

/// Parse `args` (including the program name) and run the hook over the
/// files named there, writing the report to `out`.  Returns the process
/// exit code.
pub fn run<I, T>(hook: Hook, args: I, out: &mut dyn Write) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_cli(hook).try_get_matches_from(args) {
        Ok(m) => m,
        Err(err) => {
            // Help and version land on stdout with code 0; usage errors on
            // stderr with clap's usage code.
            err.print().context("failed to print usage")?;
            return Ok(err.exit_code());
        }
    };

    let files = filenames(&matches);
    let outcome = run_batch(hook, &files, out);
    out.flush().context("failed to flush report")?;
    tracing::debug!(
        hook = hook.name(),
        files = files.len(),
        fixed = outcome.fixed,
        failed = outcome.failed,
        "batch complete"
    );
    Ok(outcome.exit_code())
}

/// Conventional binary entry point: set up logging, run, and exit with the
/// hook's status.
pub fn main(hook: Hook) -> ! {
    logging::init();
    let mut stdout = io::stdout().lock();
    std::process::exit(match run(hook, std::env::args_os(), &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            1
        }
    });
}
