//! # squadfeed-store
//!
//! Client application state for SquadFeed. State is changed only through
//! two primitives:
//!
//! - [`Store::commit`]: a synchronous [`Mutation`] applied immediately;
//! - [`Store::dispatch`]: an asynchronous [`Action`] workflow that may
//!   commit one or more mutations and resolves once they are applied.
//!
//! Every commit is published as a [`StoreEvent`] so UI layers can observe
//! one mutation stream.

pub mod action;
pub mod app_store;
pub mod event;
pub mod mutation;
pub mod state;
pub mod traits;

pub use action::Action;
pub use app_store::AppStore;
pub use event::StoreEvent;
pub use mutation::Mutation;
pub use traits::Store;
