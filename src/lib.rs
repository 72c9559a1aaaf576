//! HTTP forwarding proxy with an in-memory LRU response cache.
//!
//! Clients direct requests at the proxy; the proxy fetches from the origin
//! once per distinct method + URL and serves repeats from memory until the
//! byte budget forces least-recently-used entries out.

pub mod cache;
pub mod config;
pub mod http;
pub mod observability;
pub mod security;
pub mod transport;

pub use cache::LruCache;
pub use config::ProxyConfig;
pub use http::ProxyServer;
