//! Session-scoped notification cache.

pub mod cache;

pub use cache::{FetchSource, NotificationCache};
