//! Events published by the store.

use serde_json::{Value, json};

use crate::mutation::Mutation;

/// Discriminant of the unread-indicator message posted to the host window.
pub const BELL_MESSAGE_TYPE: &str = "notification";

/// Something UI layers may react to.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A mutation was applied.
    Committed(Mutation),
    /// The unread indicator should ring; carries the cross-window message.
    Bell(Value),
}

impl StoreEvent {
    /// The bell event with its standard payload.
    pub fn bell() -> Self {
        Self::Bell(json!({ "type": BELL_MESSAGE_TYPE }))
    }
}
