//! Outbound round-trip transports.
//!
//! # Data Flow
//! ```text
//! proxy handler
//!     → logging.rs (timing + outcome events)
//!     → caching.rs (key lookup, hit synthesis / miss store)
//!     → upstream.rs (real network fetch, body buffering)
//!     → origin server
//! ```
//!
//! # Design Decisions
//! - Decorators compose over one object-safe `Transport` trait and hold the
//!   next transport as `Arc<dyn Transport>`
//! - Requests and responses carry fully buffered `Bytes` bodies, so storing
//!   a response never consumes the copy the caller gets back
//! - Errors propagate through decorators unchanged; only the proxy handler
//!   turns them into client-visible status codes

pub mod caching;
pub mod logging;
pub mod upstream;

use async_trait::async_trait;
use axum::http::{HeaderMap, Request, Response, StatusCode};
use bytes::Bytes;
use thiserror::Error;

pub use caching::CachingTransport;
pub use logging::LoggedTransport;
pub use upstream::UpstreamTransport;

/// Errors surfaced by a round-trip.
///
/// A non-2xx status is not an error; only transport-level failures are.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be completed (connection refused, reset, DNS
    /// failure, timeout). Nothing is cached.
    #[error("upstream request failed: {0}")]
    Connect(#[from] hyper_util::client::legacy::Error),

    /// The round-trip succeeded but the response body could not be read in
    /// full. Status and headers are kept for diagnostics.
    #[error("failed to read upstream response body: {source}")]
    Body {
        #[source]
        source: axum::Error,
        status: StatusCode,
        headers: Box<HeaderMap>,
    },
}

/// One complete request-out/response-in cycle.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn round_trip(&self, request: Request<Bytes>)
        -> Result<Response<Bytes>, TransportError>;
}
