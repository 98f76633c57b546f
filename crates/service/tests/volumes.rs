//! Integration tests for volume registration

mod common;

use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_volume_lifecycle() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;

    let document = json!({
        "owner": "alice",
        "name": "vol1",
        "network": "alice/net1",
        "mountpoint": "/mnt/vol1",
    });
    let (status, _) = common::signed(
        &app,
        Method::PUT,
        "/volumes/alice/vol1",
        Some(&document),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // descriptor fields read back verbatim
    let (status, body) = common::get(&app, "/volumes/alice/vol1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, document);

    // same key again is a conflict
    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/volumes/alice/vol1",
        Some(&document),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "volume/conflict");

    let (status, _) =
        common::signed(&app, Method::DELETE, "/volumes/alice/vol1", None, &alice).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = common::get(&app, "/volumes/alice/vol1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "volume/not_found");

    let (status, body) =
        common::signed(&app, Method::DELETE, "/volumes/alice/vol1", None, &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "volume/not_found");
}

#[tokio::test]
async fn test_volume_requires_owner_signature() {
    let app = common::app();
    common::register(&app, "alice").await;
    let bob = common::register(&app, "bob").await;

    let document = json!({"owner": "alice", "name": "vol1"});
    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/volumes/alice/vol1",
        Some(&document),
        &bob,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "credentials/invalid");
}

#[tokio::test]
async fn test_volume_unknown_owner() {
    let app = common::app();
    let key = ::common::crypto::SecretKey::generate();

    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/volumes/ghost/vol1",
        Some(&json!({"owner": "ghost", "name": "vol1"})),
        &key,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user/not_found");
}

#[tokio::test]
async fn test_volume_body_must_match_path() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;

    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/volumes/alice/vol1",
        Some(&json!({"owner": "alice", "name": "other"})),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "request/malformed");
}
