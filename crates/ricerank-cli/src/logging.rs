// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the ricerank CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! User-facing progress and results go to stdout and are handled separately
//! by the command handlers; tracing output goes to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! ricerank rank
//!
//! # Per-request debugging, including rate limit headers
//! RUST_LOG=ricerank=debug ricerank rank
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "ricerank=warn,ricerank_core=warn,reqwest=error";

/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "ricerank=info,ricerank_core=info,reqwest=warn";

/// Initialize the logging subsystem.
///
/// `RUST_LOG` always wins; otherwise `verbose` raises the default level to info.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
