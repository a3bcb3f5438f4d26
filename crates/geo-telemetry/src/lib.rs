//! # Geometry Telemetry
//!
//! Structured logging for the wire-geometry tools.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geo_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_service("geo-dump");
//!     let _logging = init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GEO_SERVICE_NAME` | `wire-geometry` | Service name in logs |
//! | `GEO_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `GEO_JSON_LOGS` | `false` | JSON output |
//! | `GEO_LOG_SOURCE` | `false` | Include file and line |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging, LoggingHandle};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Span with the service name attached.
///
/// ```rust,ignore
/// let _span = geo_span!("load_geometry", detector = "microboone").entered();
/// ```
#[macro_export]
macro_rules! geo_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}
