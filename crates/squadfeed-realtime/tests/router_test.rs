//! Integration tests for inbound message routing.

mod helpers;

use std::sync::Arc;

use serde_json::{Value, json};

use squadfeed_cache::memory::MemoryStorage;
use squadfeed_core::config::notification::NotificationConfig;
use squadfeed_core::types::{PostId, UserId};
use squadfeed_entity::activity::ActivityList;
use squadfeed_entity::post::Post;
use squadfeed_entity::user::User;
use squadfeed_realtime::router;
use squadfeed_realtime::InboundMessage;
use squadfeed_store::{Action, AppStore, Mutation};

use helpers::{Call, Harness, RecordingStore};

fn post(id: &str) -> Post {
    Post::from_value(json!({ "guid": id })).unwrap()
}

fn parse(value: Value) -> InboundMessage {
    serde_json::from_value(value).unwrap()
}

async fn route(store: &RecordingStore, value: Value) {
    router::dispatch(store, parse(value)).await.unwrap();
}

#[tokio::test]
async fn test_ping_pongs() {
    let h = Harness::new(squadfeed_core::types::Route::home(), true);
    route(&h.store, json!({ "type": "ping" })).await;
    assert_eq!(h.socket.sent(), vec![json!({ "type": "pong" })]);
}

#[tokio::test]
async fn test_like_sets_absolute_state() {
    let store = RecordingStore::default().with_post(post("p1"));
    route(
        &store,
        json!({ "type": "like", "guid": "p1", "likes": { "byMe": true, "count": 7 } }),
    )
    .await;

    let commits = store.commits();
    assert_eq!(commits.len(), 1);
    let Mutation::SetPostLike { by_me, count, post } = &commits[0] else {
        panic!("expected setPostLike");
    };
    assert!(*by_me);
    assert_eq!(*count, 7);
    assert_eq!(post.guid, Some(PostId::from("p1")));
}

#[tokio::test]
async fn test_notif_like_modifies_by_one() {
    let store = RecordingStore::default().with_post(post("p1"));
    route(&store, json!({ "type": "notifLike", "postId": "p1", "iLike": true })).await;
    route(&store, json!({ "type": "notifLike", "postId": "p1", "iLike": false })).await;

    let deltas: Vec<i64> = store
        .dispatches()
        .into_iter()
        .filter_map(|a| match a {
            Action::ModifyLike { delta, .. } => Some(delta),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, [1, -1]);
}

#[tokio::test]
async fn test_unknown_post_is_dropped() {
    let store = RecordingStore::default();
    route(&store, json!({ "type": "notifLike", "postId": "ghost", "iLike": true })).await;
    route(&store, json!({ "type": "like", "guid": "ghost", "likes": { "count": 1 } })).await;
    route(
        &store,
        json!({ "type": "notifComment", "postId": "ghost", "text": "hi", "user": {} }),
    )
    .await;
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_notif_comment_adds_comment_with_author() {
    let store = RecordingStore::default().with_post(post("p1"));
    route(
        &store,
        json!({ "type": "notifComment", "postId": "p1", "text": "nice", "user": { "screenName": "ann" } }),
    )
    .await;

    let commits = store.commits();
    let Mutation::AddComment { comment, post } = &commits[0] else {
        panic!("expected addComment");
    };
    assert_eq!(comment.text, "nice");
    assert_eq!(comment.author.as_ref().map(|u| u.screen_name.as_str()), Some("ann"));
    assert_eq!(post.guid, Some(PostId::from("p1")));
}

#[tokio::test]
async fn test_comments_are_received_in_bulk() {
    let store = RecordingStore::default();
    route(&store, json!({ "type": "comments", "comments": [{ "text": "text" }] })).await;
    let commits = store.commits();
    let Mutation::ReceiveReaction(comments) = &commits[0] else {
        panic!("expected receiveReaction");
    };
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "text");
}

#[tokio::test]
async fn test_user_profile_self_or_other() {
    let store = RecordingStore::default();
    *store.me.lock().unwrap() = Some(UserId::from("me"));

    route(&store, json!({ "type": "userProfile", "user": { "userId": "me" } })).await;
    route(&store, json!({ "type": "userProfile", "user": { "userId": "someone" } })).await;

    let commits = store.commits();
    assert!(matches!(&commits[0], Mutation::SetMe(User { user_id: Some(id), .. }) if id.as_str() == "me"));
    assert!(matches!(&commits[1], Mutation::SetOther(_)));
}

#[tokio::test]
async fn test_activity_lists_commit_after_bulk_completes() {
    for (kind, list) in [
        ("wishlist", ActivityList::Wishlist),
        ("blog", ActivityList::Blog),
        ("squadders", ActivityList::Squadders),
    ] {
        let store = RecordingStore::default().with_post(post("known"));
        let mut message = serde_json::Map::new();
        message.insert("type".to_string(), json!(kind));
        message.insert(
            kind.to_string(),
            json!(["known", { "item": { "itemId": "i1" }, "guid": "i1" }]),
        );
        route(&store, Value::Object(message)).await;

        let calls = store.calls();
        assert_eq!(calls.len(), 2, "{kind}");
        let Call::Dispatch(Action::ReceiveBulk(bulk)) = &calls[0] else {
            panic!("{kind}: expected receiveBulk first, got {:?}", calls[0]);
        };
        let Call::Commit(Mutation::SetListOfType { posts, list: committed }) = &calls[1] else {
            panic!("{kind}: expected setListOfType second, got {:?}", calls[1]);
        };
        assert_eq!(bulk, posts);
        assert_eq!(*committed, list);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].guid, Some(PostId::from("i1")));
    }
}

#[tokio::test]
async fn test_unknown_type_is_a_no_op() {
    let store = RecordingStore::default();
    route(&store, json!({ "type": "brandNew" })).await;
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_activity_list_keeps_unresolved_entries() {
    let store = AppStore::new(Arc::new(MemoryStorage::new()), NotificationConfig::default(), 16);

    router::dispatch(
        &store,
        parse(json!({
            "type": "blog",
            "blog": ["somedata", { "guid": "x1", "type": "blogPost", "text": "t" }],
        })),
    )
    .await
    .unwrap();

    let list = store.activity_list(ActivityList::Blog);
    let ids: Vec<_> = list.iter().filter_map(|p| p.guid.clone()).collect();
    assert_eq!(ids, [PostId::from("somedata"), PostId::from("x1")]);
    assert_eq!(list[1].kind.as_str(), "blogPost");
    assert_eq!(list[1].text, "t");
}
