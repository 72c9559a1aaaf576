//! Cached response snapshots.

use axum::http::{HeaderMap, Response, StatusCode, Version};
use bytes::Bytes;

/// Immutable snapshot of an upstream response.
///
/// The body is fully buffered at store time so every hit can replay it.
/// Cloning is cheap: `Bytes` is refcounted and `HeaderMap` is small relative
/// to typical payloads.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl CacheEntry {
    pub fn new(status: StatusCode, version: Version, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            version,
            headers,
            body,
        }
    }

    /// Snapshot a buffered response without consuming it.
    pub fn from_response(response: &Response<Bytes>) -> Self {
        Self {
            status: response.status(),
            version: response.version(),
            headers: response.headers().clone(),
            body: response.body().clone(),
        }
    }

    /// Bytes charged against the store's capacity.
    pub fn size_bytes(&self) -> u64 {
        self.body.len() as u64
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Synthesize a response carrying the stored status, headers, and body.
    pub fn to_response(&self) -> Response<Bytes> {
        let mut response = Response::new(self.body.clone());
        *response.status_mut() = self.status;
        *response.version_mut() = self.version;
        *response.headers_mut() = self.headers.clone();
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_snapshot_round_trips_status_headers_and_body() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        headers.append("x-custom", "one".parse().unwrap());
        headers.append("x-custom", "two".parse().unwrap());

        let entry = CacheEntry::new(
            StatusCode::NOT_FOUND,
            Version::HTTP_11,
            headers.clone(),
            Bytes::from_static(b"missing"),
        );

        let response = entry.to_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers(), &headers);
        assert_eq!(response.body().as_ref(), b"missing");
    }

    #[test]
    fn test_size_charges_body_length() {
        let entry = CacheEntry::new(
            StatusCode::OK,
            Version::HTTP_11,
            HeaderMap::new(),
            Bytes::from(vec![0u8; 60]),
        );
        assert_eq!(entry.size_bytes(), 60);
    }
}
