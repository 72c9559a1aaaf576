//! In-memory response caching subsystem.
//!
//! # Data Flow
//! ```text
//! outbound request
//!     → key.rs (derive CacheKey from method + absolute URL)
//!     → store.rs (LRU lookup / insert under byte budget)
//!     → entry.rs (immutable response snapshot)
//!     → synthesized response on hit, stored copy on miss
//! ```
//!
//! # Design Decisions
//! - Pure space-bounded cache: no TTL, no freshness directives
//! - Entries are immutable once stored; a re-store replaces atomically
//! - Eviction is synchronous inside insert, strictly least-recently-used

pub mod entry;
pub mod key;
pub mod store;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use store::LruCache;
