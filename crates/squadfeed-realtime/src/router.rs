//! Inbound message routing into store commits and dispatches.

use serde_json::Value;
use tracing::{debug, warn};

use squadfeed_core::result::AppResult;
use squadfeed_core::types::PostId;
use squadfeed_entity::activity::ActivityList;
use squadfeed_entity::post::{Comment, Post};
use squadfeed_store::{Action, Mutation, Store};

use crate::message::InboundMessage;
use crate::message::builder;

fn lookup(store: &dyn Store, id: &PostId, kind: &str) -> Option<Post> {
    let post = store.post_by_id(id);
    if post.is_none() {
        warn!(post_id = %id, kind, "Message references unknown post, dropping");
    }
    post
}

/// Route one authenticated message.
///
/// Messages about posts this client does not hold are dropped. Activity
/// lists are committed only after their posts are materialized.
pub async fn dispatch(store: &dyn Store, message: InboundMessage) -> AppResult<()> {
    debug!(kind = message.kind(), "Routing message");
    match message {
        InboundMessage::Ping => match store.socket() {
            Some(socket) => socket.send_obj(builder::pong()),
            None => debug!("No socket installed, cannot pong"),
        },
        InboundMessage::SingleItemPost { mut payload } => {
            payload.insert("type".to_string(), Value::from("singleItemPost"));
            store.dispatch(Action::ReceiveItem(Value::Object(payload))).await?;
        }
        InboundMessage::Like { guid, likes } => {
            if let Some(post) = lookup(store, &guid, "like") {
                store.commit(Mutation::SetPostLike {
                    by_me: likes.by_me,
                    count: likes.count,
                    post,
                });
            }
        }
        InboundMessage::NotifLike { post_id, i_like } => {
            if let Some(post) = lookup(store, &post_id, "notifLike") {
                let delta = if i_like { 1 } else { -1 };
                store.dispatch(Action::ModifyLike { delta, post }).await?;
            }
        }
        InboundMessage::NotifComment { post_id, text, user } => {
            if let Some(post) = lookup(store, &post_id, "notifComment") {
                store.commit(Mutation::AddComment {
                    comment: Comment::new(text, user),
                    post,
                });
            }
        }
        InboundMessage::Comments { comments } => store.commit(Mutation::ReceiveReaction(comments)),
        InboundMessage::UserProfile { user } => {
            if user.id().cloned() == store.me_user_id() {
                store.commit(Mutation::SetMe(user));
            } else {
                store.commit(Mutation::SetOther(user));
            }
        }
        InboundMessage::Wishlist { wishlist } => {
            receive_list(store, ActivityList::Wishlist, &wishlist).await?
        }
        InboundMessage::Blog { blog } => receive_list(store, ActivityList::Blog, &blog).await?,
        InboundMessage::Squadders { squadders } => {
            receive_list(store, ActivityList::Squadders, &squadders).await?
        }
        handshake @ (InboundMessage::AuthRequest | InboundMessage::AuthOk) => {
            debug!(kind = handshake.kind(), "Handshake message reached the router, ignoring");
        }
        InboundMessage::Unknown => debug!("Unknown message type, ignoring"),
    }
    Ok(())
}

async fn receive_list(store: &dyn Store, list: ActivityList, entries: &[Value]) -> AppResult<()> {
    let posts = store.resolve_posts(entries);
    store.dispatch(Action::ReceiveBulk(posts.clone())).await?;
    store.commit(Mutation::SetListOfType { posts, list });
    Ok(())
}
