//! Storage keys and reserved envelope fields.
//!
//! Centralising key names prevents typos and makes it easy to find every
//! key the client uses.

// ── Durable keys ───────────────────────────────────────────

/// Durable key holding the auth credential.
pub const USER_TOKEN: &str = "userToken";

// ── Session keys ───────────────────────────────────────────

/// Session key holding the notification cache record (`{items, ts}`).
pub const NOTIFICATIONS: &str = "notifications";

// ── Envelope fields ────────────────────────────────────────

/// Internal credential field that may ride along on outbound envelopes.
pub const CREDENTIAL_FIELD: &str = "_jwt";

/// Envelope fields that must never leave the client.
pub const SENSITIVE_FIELDS: [&str; 3] = ["error", "userId", CREDENTIAL_FIELD];
