//! Round-trip logging decorator.
//!
//! Pure observer: records timing and outcome for every round-trip and passes
//! requests and responses through untouched.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::http::{Request, Response};
use bytes::Bytes;

use crate::transport::{Transport, TransportError};

/// Transport decorator that logs each round-trip's outcome and duration.
pub struct LoggedTransport {
    inner: Arc<dyn Transport>,
}

impl LoggedTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Transport for LoggedTransport {
    async fn round_trip(
        &self,
        request: Request<Bytes>,
    ) -> Result<Response<Bytes>, TransportError> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let start = Instant::now();

        match self.inner.round_trip(request).await {
            Ok(response) => {
                tracing::info!(
                    method = %method,
                    uri = %uri,
                    status = %response.status(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    body_bytes = response.body().len(),
                    "Round trip complete"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::error!(
                    method = %method,
                    uri = %uri,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Round trip failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, Method, StatusCode};

    use super::*;

    struct FixedTransport;

    #[async_trait]
    impl Transport for FixedTransport {
        async fn round_trip(
            &self,
            _request: Request<Bytes>,
        ) -> Result<Response<Bytes>, TransportError> {
            let mut response = Response::new(Bytes::from_static(b"ok"));
            *response.status_mut() = StatusCode::ACCEPTED;
            response
                .headers_mut()
                .insert("x-origin", "fixed".parse().unwrap());
            Ok(response)
        }
    }

    #[tokio::test]
    async fn test_passes_response_through_unchanged() {
        let transport = LoggedTransport::new(Arc::new(FixedTransport));
        let request = Request::builder()
            .method(Method::GET)
            .uri("http://origin/a")
            .body(Bytes::new())
            .unwrap();

        let response = transport.round_trip(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.body().as_ref(), b"ok");

        let mut expected = HeaderMap::new();
        expected.insert("x-origin", "fixed".parse().unwrap());
        assert_eq!(response.headers(), &expected);
    }
}
