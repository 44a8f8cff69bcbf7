//! Observability setup for botline: structured logging via `tracing` with an
//! optional OpenTelemetry bridge.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, level_filter, shutdown_tracing};
