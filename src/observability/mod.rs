//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured logs, initialized in main)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics are cheap (atomic increments) and recorded at the point of
//!   truth: the store records sizes and evictions, the caching transport
//!   records hits and misses, the handler records request outcomes
//! - The exporter is optional and bound to its own address

pub mod metrics;
