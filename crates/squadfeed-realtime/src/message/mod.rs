//! WebSocket message types and builders.

pub mod builder;
pub mod serializer;
pub mod types;

pub use types::{InboundMessage, LikeState};
