// SPDX-License-Identifier: AGPL-3.0-only

//! Diagnostics go to stderr via `tracing`; stdout is reserved for the report
//! lines the pre-commit framework shows to the user.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive, e.g. `debug` or
/// `envelope_hooks::rules=trace`.
pub const LOG_ENV: &str = "ENVELOPE_HOOKS_LOG";

const DEFAULT_FILTER: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.  Safe to call more than once; later calls
/// are ignored.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        tracing::debug!("still alive");
    }
}
