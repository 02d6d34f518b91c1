//! # squadfeed-cache
//!
//! Key/value storage backends for SquadFeed. Two scopes are used:
//!
//! - **durable**: survives restarts; holds the auth credential. Backed by a
//!   JSON file ([`file::FileStorage`]) or memory.
//! - **session**: cleared per run; holds the notification cache. Always
//!   in memory ([`memory::MemoryStorage`]).
//!
//! The backends are selected at runtime based on configuration.

pub mod file;
pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::StorageManager;
