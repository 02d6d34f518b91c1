//! # squadfeed-entity
//!
//! Domain entity models for SquadFeed. Every struct in this crate is a
//! value object exchanged with the feed server or held in the client store.
//! Unknown wire fields are preserved through `#[serde(flatten)]` maps so a
//! round trip never loses data the client does not interpret.

pub mod activity;
pub mod feed;
pub mod notification;
pub mod post;
pub mod user;
