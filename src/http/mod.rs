//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, proxy handler)
//!     → transport chain (logging → caching → upstream)
//!     → response copied back to the client
//! ```

pub mod server;

pub use server::ProxyServer;
