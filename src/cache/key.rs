//! Cache key derivation.
//!
//! Two requests that should share a cached response must produce identical
//! keys. Keying is method + absolute URL only; request headers do not
//! participate (no Vary handling), matching the proxy's raw memoization
//! semantics.

use std::fmt;

use axum::http::{Method, Uri};

/// Deterministic identifier for a cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: String,
    uri: String,
}

impl CacheKey {
    /// Derive a key from an outbound request's method and URL.
    pub fn from_parts(method: &Method, uri: &Uri) -> Self {
        Self {
            method: method.as_str().to_string(),
            uri: uri.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)
    }
}
