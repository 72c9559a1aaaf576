//! Real network round-trips to origin servers.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use bytes::Bytes;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::transport::{Transport, TransportError};

/// Terminal transport: forwards the request to the origin designated by its
/// absolute URL and buffers the response body in full.
pub struct UpstreamTransport {
    client: Client<HttpConnector, Body>,
    max_body_bytes: usize,
}

impl UpstreamTransport {
    pub fn new(config: &UpstreamConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self {
            client,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

#[async_trait]
impl Transport for UpstreamTransport {
    async fn round_trip(
        &self,
        request: Request<Bytes>,
    ) -> Result<Response<Bytes>, TransportError> {
        let (parts, body) = request.into_parts();
        let request = Request::from_parts(parts, Body::from(body));

        let response = self.client.request(request).await?;
        let (parts, body) = response.into_parts();

        // Buffer the whole body so it can be cached and replayed. A failure
        // here is distinct from a connect failure: the origin answered, we
        // keep its status and headers for the diagnostic dump.
        let bytes = axum::body::to_bytes(Body::new(body), self.max_body_bytes)
            .await
            .map_err(|source| TransportError::Body {
                source,
                status: parts.status,
                headers: Box::new(parts.headers.clone()),
            })?;

        Ok(Response::from_parts(parts, bytes))
    }
}
