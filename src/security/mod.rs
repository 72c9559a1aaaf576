//! Security-related response headers.

pub mod headers;

pub use headers::hsts_layer;
