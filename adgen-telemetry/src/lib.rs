//! # adgen-telemetry
//!
//! Structured logging and distributed tracing for the adgen pipeline.
//!
//! ## Usage
//!
//! ```rust
//! use adgen_telemetry::{info, init_telemetry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry("adgen")?;
//!     info!(company_id = 42, "Session starting");
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Instrument, Span, debug, error, info, instrument, trace, warn};

pub use init::{
    DEFAULT_FILTER, TelemetryConfig, init, init_telemetry, init_with_otlp, shutdown_telemetry,
};
pub use spans::*;
