//! Integration tests for status routes and the external collaborator seams

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use url::Url;

use service::urls::{SignedUrlIssuer, UrlIssueError};
use service::{Config, ServiceState};

#[tokio::test]
async fn test_root_reports_version() {
    let app = common::app();
    let (status, body) = common::get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_status_probes() {
    let app = common::app();

    let (status, body) = common::get(&app, "/_status/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = common::get(&app, "/_status/version").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = common::app();
    let (status, body) = common::get(&app, "/teapots/alice").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "route/not_found");
}

#[tokio::test]
async fn test_avatar_routes_without_object_storage() {
    let app = common::app();
    common::register(&app, "alice").await;

    let (status, body) = common::get(&app, "/users/alice/avatar").await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["error"], "storage/unavailable");
}

/// Canned issuer standing in for the cloud object store.
#[derive(Debug)]
struct StaticUrls;

#[async_trait::async_trait]
impl SignedUrlIssuer for StaticUrls {
    async fn upload_url(
        &self,
        bucket: &str,
        name: &str,
        _content_type: &str,
        _content_length: u64,
        _expiry: Duration,
    ) -> Result<Url, UrlIssueError> {
        Ok(Url::parse(&format!("https://storage.test/{}/{}?op=upload", bucket, name)).unwrap())
    }

    async fn download_url(
        &self,
        bucket: &str,
        name: &str,
        _expiry: Duration,
    ) -> Result<Url, UrlIssueError> {
        Ok(Url::parse(&format!("https://storage.test/{}/{}?op=download", bucket, name)).unwrap())
    }

    async fn delete_url(
        &self,
        bucket: &str,
        name: &str,
        _expiry: Duration,
    ) -> Result<Url, UrlIssueError> {
        Ok(Url::parse(&format!("https://storage.test/{}/{}?op=delete", bucket, name)).unwrap())
    }
}

fn app_with_storage() -> axum::Router {
    let state =
        ServiceState::from_config(&Config::default()).with_url_issuer(Arc::new(StaticUrls));
    service::http::router(state)
}

#[tokio::test]
async fn test_avatar_upload_redirects_to_signed_url() {
    let app = app_with_storage();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/users/alice/avatar")
                .header(header::CONTENT_TYPE, "image/png")
                .header(header::CONTENT_LENGTH, "2048")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert_eq!(location, "https://storage.test/avatars/alice/avatar?op=upload");
}

#[tokio::test]
async fn test_avatar_upload_rejects_non_images() {
    let app = app_with_storage();

    let (status, body) = common::send(
        &app,
        Request::builder()
            .method(Method::PUT)
            .uri("/users/alice/avatar")
            .header(header::CONTENT_TYPE, "application/zip")
            .header(header::CONTENT_LENGTH, "2048")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "avatar/unsupported_media");
    assert_eq!(body["mime-type"], "application/zip");
}

#[tokio::test]
async fn test_avatar_upload_requires_length() {
    let app = app_with_storage();

    let (status, body) = common::send(
        &app,
        Request::builder()
            .method(Method::PUT)
            .uri("/users/alice/avatar")
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "request/malformed");
}

#[tokio::test]
async fn test_oauth_provider_availability() {
    let app = common::app();
    common::register(&app, "alice").await;

    // known provider, no app keys configured
    let (status, body) = common::get(&app, "/users/alice/oauth/google").await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["error"], "oauth/unavailable");

    // provider the dispatch table has never heard of
    let (status, body) = common::get(&app, "/users/alice/oauth/myspace").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "oauth/not_found");
}

#[tokio::test]
async fn test_oauth_authorization_redirect() {
    let mut config = Config::default();
    config.oauth.insert(
        "google".to_string(),
        service::oauth::OAuthApp {
            app_key: "app-key".to_string(),
            app_secret: "app-secret".to_string(),
        },
    );
    let app = service::http::router(ServiceState::from_config(&config));
    common::register(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/users/alice/oauth/google")
                .header(header::HOST, "directory.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    let url = Url::parse(location).unwrap();
    assert_eq!(url.host_str(), Some("accounts.google.com"));
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(query.contains(&("state".to_string(), "alice".to_string())));
    assert!(query.contains(&(
        "redirect_uri".to_string(),
        "http://directory.test/oauth/google".to_string()
    )));
    // the app secret stays server-side
    assert!(!location.contains("app-secret"));
}

#[tokio::test]
async fn test_credentials_listing_is_authenticated() {
    let app = common::app();
    let alice = common::register(&app, "alice").await;

    let (status, _) = common::get(&app, "/users/alice/credentials/dropbox").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = common::signed(
        &app,
        Method::GET,
        "/users/alice/credentials/dropbox",
        None,
        &alice,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credentials"], json!([]));
}
