//! Memoization of path results keyed by namespace and point pair.
//!
//! [`PathCache`] wraps a [`CacheBackend`] (by default [`MokaBackend`], an
//! in-process cache with sliding expiration) and keeps a private index of the
//! keys it has stored. The index drives [`PathCache::remove_by_prefix`], which
//! invalidates every key matching a structured [`KeyPrefix`].
//!
//! Backend failures never reach callers: they are logged and treated as a
//! miss or a skipped write.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod backend;
mod cache;
mod config;
mod error;
mod key;

pub use backend::{CacheBackend, MokaBackend};
pub use cache::PathCache;
pub use config::CacheConfig;
pub use error::CacheError;
pub use key::{CacheKey, KeyPrefix, Namespace};
