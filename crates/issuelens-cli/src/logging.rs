// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the issuelens CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Debug output for troubleshooting
//! RUST_LOG=issuelens=debug issuelens analyze https://github.com/owner/repo 1
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter: only warnings from issuelens, errors from the HTTP stack.
const DEFAULT_FILTER: &str = "issuelens=warn,reqwest=error";

/// Initialize the logging subsystem.
///
/// Logs go to stderr so JSON output on stdout stays machine-readable.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
