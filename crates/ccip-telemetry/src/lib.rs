//! # CCIP Telemetry
//!
//! Structured logging for the commit oracle node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ccip_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `ccip-commit` | Service name attached to every event |
//! | `CCIP_NODE_ID` | `0` | Oracle index of this node |
//! | `CCIP_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CCIP_JSON_LOGS` | `false` (`true` in containers) | JSON formatted output |
//! | `CCIP_NETWORK` | `testnet` | Network identifier |

#![warn(missing_docs)]

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The subscriber could not be installed (usually: one already is).
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),
}

/// Convenience macro for creating a span with round context.
///
/// # Example
///
/// ```rust,ignore
/// let _span = round_span!("outcome", seq_nr = 12, oracle = 3).entered();
/// ```
#[macro_export]
macro_rules! round_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
