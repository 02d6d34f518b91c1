//! Core type definitions used across the SquadFeed workspace.

pub mod id;
pub mod route;

pub use id::*;
pub use route::Route;
