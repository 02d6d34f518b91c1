//! # squadfeed-core
//!
//! Core crate for the SquadFeed realtime client. Contains the collaborator
//! traits (key/value storage, navigation, socket sending), configuration
//! schemas, typed identifiers, the event bus, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SquadFeed crates.

pub mod bus;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use bus::EventBus;
pub use error::AppError;
pub use result::AppResult;
