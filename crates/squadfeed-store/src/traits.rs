//! The store interface the realtime layer talks to.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use squadfeed_core::result::AppResult;
use squadfeed_core::traits::SocketSender;
use squadfeed_core::types::{PostId, Route, UserId};
use squadfeed_entity::post::Post;

use crate::action::Action;
use crate::mutation::Mutation;

/// Central application state as seen by collaborators.
///
/// Implementations must apply commits synchronously and resolve
/// `dispatch` only after every mutation the workflow commits is applied.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug + 'static {
    /// Apply a mutation immediately. Always succeeds from the caller's view.
    fn commit(&self, mutation: Mutation);

    /// Run a workflow to completion.
    async fn dispatch(&self, action: Action) -> AppResult<()>;

    /// The installed send handle, if a connection is up.
    fn socket(&self) -> Option<Arc<dyn SocketSender>>;

    /// Whether the handshake has completed.
    fn is_socket_auth(&self) -> bool;

    /// Whether the transport is open.
    fn is_connected(&self) -> bool;

    /// Shop the widget is embedded in.
    fn merchant_id(&self) -> Option<String>;

    /// The session's own user id.
    fn me_user_id(&self) -> Option<UserId>;

    /// Last-known squad landing route.
    fn squad_route(&self) -> Route;

    /// A materialized post by id.
    fn post_by_id(&self, id: &PostId) -> Option<Post>;

    /// Map raw list entries (ids or post-like objects) to posts, using
    /// known posts where possible and the raw entry otherwise.
    fn resolve_posts(&self, entries: &[Value]) -> Vec<Post>;
}
