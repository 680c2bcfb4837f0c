//! Tracing subscriber initialization
//!
//! Console logging only. The filter comes from `RUST_LOG` when set,
//! otherwise from the configured `log_level`.

mod subscriber;

pub use subscriber::{TelemetryError, build_filter, init_tracing};
