//! Integration tests for network creation, membership, and passports

mod common;

use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_network_lifecycle_example() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;

    // create
    let document = json!({"owner": "alice", "name": "net1"});
    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/net1",
        Some(&document),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({}));

    // a second create of the same key is a conflict
    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/net1",
        Some(&document),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "network/conflict");

    // only the owner so far
    let (status, body) = common::get(&app, "/networks/alice/net1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!(["alice"]));

    // bob accepts an invitation by self-signing his passport
    let bob = common::register(&app, "bob").await;
    let passport = json!({"network": "alice/net1", "user": "bob", "signature": "c2lnbmF0dXJl"});
    let (status, _) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/net1/passports/bob",
        Some(&passport),
        &bob,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::get(&app, "/networks/alice/net1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!(["alice", "bob"]));

    // the passport reads back verbatim, without authentication
    let (status, body) = common::get(&app, "/networks/alice/net1/passports/bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, passport);
}

#[tokio::test]
async fn test_network_create_requires_owner_identity() {
    let app = common::app();
    common::register(&app, "alice").await;
    let bob = common::register(&app, "bob").await;

    let document = json!({"owner": "alice", "name": "net1"});
    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/net1",
        Some(&document),
        &bob,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "credentials/invalid");
}

#[tokio::test]
async fn test_network_create_unknown_owner() {
    let app = common::app();
    let key = ::common::crypto::SecretKey::generate();
    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/networks/ghost/net1",
        Some(&json!({"owner": "ghost", "name": "net1"})),
        &key,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user/not_found");
}

#[tokio::test]
async fn test_network_body_must_match_path() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;

    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/net1",
        Some(&json!({"owner": "alice", "name": "other"})),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "request/malformed");
}

#[tokio::test]
async fn test_network_document_lookup() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;
    common::create_network(&app, "alice", "net1", &alice).await;

    let (status, body) = common::get(&app, "/networks/alice/net1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner"], "alice");
    assert_eq!(body["name"], "net1");
    assert_eq!(body["passports"], json!({}));
    assert_eq!(body["endpoints"], json!({}));

    let (status, body) = common::get(&app, "/networks/alice/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "network/not_found");
}

#[tokio::test]
async fn test_passport_write_by_owner() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;
    common::register(&app, "bob").await;
    common::create_network(&app, "alice", "net1", &alice).await;

    let (status, _) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/net1/passports/bob",
        Some(&json!({"invited": true})),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_passport_write_rejected_for_third_party() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;
    common::register(&app, "bob").await;
    let carol = common::register(&app, "carol").await;
    common::create_network(&app, "alice", "net1", &alice).await;

    // carol is neither the owner nor the invitee
    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/net1/passports/bob",
        Some(&json!({"invited": true})),
        &carol,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "credentials/invalid");

    let (status, _) = common::get(&app, "/networks/alice/net1/passports/bob").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_passport_write_missing_network() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;
    common::register(&app, "bob").await;

    let (status, body) = common::signed(
        &app,
        Method::PUT,
        "/networks/alice/ghost/passports/bob",
        Some(&json!({"invited": true})),
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "network/not_found");
}

#[tokio::test]
async fn test_missing_passport_is_distinct_from_missing_network() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;
    common::create_network(&app, "alice", "net1", &alice).await;

    let (status, body) = common::get(&app, "/networks/alice/net1/passports/bob").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "passport/not_found");
}

#[tokio::test]
async fn test_network_delete() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;
    let bob = common::register(&app, "bob").await;
    common::create_network(&app, "alice", "net1", &alice).await;

    // not the owner
    let (status, _) =
        common::signed(&app, Method::DELETE, "/networks/alice/net1", None, &bob).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) =
        common::signed(&app, Method::DELETE, "/networks/alice/net1", None, &alice).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::get(&app, "/networks/alice/net1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // deleting what is already gone reports the absence
    let (status, body) =
        common::signed(&app, Method::DELETE, "/networks/alice/net1", None, &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "network/not_found");

    // the owner's identity survives the network
    let (status, _) = common::get(&app, "/users/alice").await;
    assert_eq!(status, StatusCode::OK);
}
