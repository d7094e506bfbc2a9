//! API middleware: Prometheus metrics collection.

pub mod metrics;
