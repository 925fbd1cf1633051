// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the issuelens server.
//!
//! Request outcomes are logged at `info`; `RUST_LOG` overrides the default
//! filter, e.g. `RUST_LOG=issuelens=debug`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "issuelens=info,reqwest=error";

/// Initialize the logging subsystem.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
