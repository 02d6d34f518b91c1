//! Notification domain entities.

pub mod cache_record;
pub mod model;

pub use cache_record::NotificationCacheRecord;
pub use model::Notification;
