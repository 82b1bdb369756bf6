//! Observability setup for Career Compass: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
