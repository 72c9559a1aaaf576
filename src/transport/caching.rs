//! Cache-aware transport decorator.
//!
//! # Responsibilities
//! - Derive the cache key from each outbound request
//! - Serve hits from the store without touching the network
//! - Store successful miss responses, returning the caller a readable copy
//!
//! # Design Decisions
//! - Keying is method + absolute URL; request headers and body are ignored
//! - Response cache directives are ignored too: this is a raw
//!   capacity-bounded memo, not an RFC 7234 cache
//! - Concurrent misses for one key are not collapsed; each fetches and the
//!   last insert wins via the store's replace semantics

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Request, Response};
use bytes::Bytes;

use crate::cache::{CacheEntry, CacheKey, LruCache};
use crate::observability::metrics;
use crate::transport::{Transport, TransportError};

/// Transport decorator that memoizes responses in an [`LruCache`].
pub struct CachingTransport {
    inner: Arc<dyn Transport>,
    cache: LruCache,
}

impl CachingTransport {
    pub fn new(inner: Arc<dyn Transport>, cache: LruCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl Transport for CachingTransport {
    async fn round_trip(
        &self,
        request: Request<Bytes>,
    ) -> Result<Response<Bytes>, TransportError> {
        let key = CacheKey::from_parts(request.method(), request.uri());

        if let Some(entry) = self.cache.get(&key) {
            tracing::debug!(key = %key, "Cache hit");
            metrics::record_cache_hit();
            return Ok(entry.to_response());
        }

        tracing::debug!(key = %key, "Cache miss");
        metrics::record_cache_miss();

        // Failed round-trips propagate unchanged and are never cached.
        let response = self.inner.round_trip(request).await?;

        self.cache.insert(key, CacheEntry::from_response(&response));
        Ok(response)
    }
}
