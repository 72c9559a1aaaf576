//! Security response headers.
//!
//! # Responsibilities
//! - Add a Strict-Transport-Security header to every response
//!
//! # Design Decisions
//! - Pure middleware, no state: the header is added unconditionally when
//!   the layer is installed; everything else passes through untouched

use axum::http::{header, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

/// Two years, covering subdomains.
pub const STRICT_TRANSPORT_SECURITY: &str = "max-age=63072000; includeSubDomains";

/// Layer that adds `Strict-Transport-Security` to every response.
pub fn hsts_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::appending(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static(STRICT_TRANSPORT_SECURITY),
    )
}
