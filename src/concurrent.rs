//! Sharded Cache Implementations
//!
//! This module provides the sharded byte cache and its statistics types.
//!
//! # Architecture
//!
//! The keyspace is partitioned across a fixed array of shards:
//! - A key's shard is chosen by folding its bytes with XOR, so identical keys
//!   always route to the same shard
//! - Each shard is an independent LRU store behind its own `parking_lot::RwLock`
//! - Operations lock only the shard they touch; shards never coordinate
//!
//! ## Why RwLock Here?
//!
//! A lookup in an LRU store moves the entry to the front of the recency list,
//! so `get` needs the exclusive lock. The byte cache also offers `has`, which
//! checks presence without promoting, and stats scans that only read usage.
//! Those take the shared lock and do not block each other.
//!
//! # Available Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ByteCache`] | Byte-bounded LRU cache for byte keys, sharded by XOR fold |
//! | [`Stats`] | Usage and call-count snapshot |
//!
//! # Thread Safety
//!
//! [`ByteCache`] is `Send + Sync` and can be shared via `Arc` or borrowed
//! across scoped threads.

mod byte_cache;
mod stats;

pub use self::byte_cache::ByteCache;
pub use self::stats::Stats;
