//! Shared response shapes for the directory's error taxonomy. Per-route
//! error enums delegate here so every failure leaves the service as
//! `{error: "<kind>", reason: "<text>", ...}`.

use std::fmt::{Debug, Display};

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::directory::{DirectoryError, EntityKind};

use crate::oauth::OAuthError;
use crate::registry::RegistryError;

/// 404 body in the directory's wire format.
pub fn not_found(kind: EntityKind, name: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("{}/not_found", kind),
            "reason": format!("{} {:?} does not exist", kind, name),
            "name": name,
        })),
    )
        .into_response()
}

/// 409 body for a natural-key collision.
pub fn conflict(kind: EntityKind, name: &str) -> Response {
    (
        StatusCode::CONFLICT,
        Json(json!({
            "error": format!("{}/conflict", kind),
            "reason": format!("{} {:?} already exists", kind, name),
            "id": name,
        })),
    )
        .into_response()
}

/// 400 body for a request that does not say what it must.
pub fn malformed(reason: impl Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "request/malformed",
            "reason": reason.to_string(),
        })),
    )
        .into_response()
}

/// 500 for backing-store faults; detail goes to the log, not the wire.
pub fn internal() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal",
            "reason": "unexpected server error",
        })),
    )
        .into_response()
}

/// Collapse an OAuth failure: unknown providers are 404s, disabled ones
/// 501s, upstream trouble a 502 rather than an echo of whatever status the
/// provider produced.
pub fn oauth_fault(error: OAuthError) -> Response {
    match error {
        OAuthError::UnknownProvider(ref name) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "oauth/not_found",
                "reason": error.to_string(),
                "name": name,
            })),
        )
            .into_response(),
        OAuthError::Unconfigured(_) => (
            StatusCode::NOT_IMPLEMENTED,
            Json(json!({
                "error": "oauth/unavailable",
                "reason": error.to_string(),
            })),
        )
            .into_response(),
        upstream => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "error": "oauth/exchange_failed",
                "reason": upstream.to_string(),
            })),
        )
            .into_response(),
    }
}

/// Collapse a registry failure into its transport shape: absent entities
/// become 404s, key collisions 409s, anything else a logged 500.
pub fn registry_fault<E: Display + Debug>(error: RegistryError<E>) -> Response {
    match error {
        RegistryError::Directory(DirectoryError::NotFound(kind, name)) => not_found(kind, &name),
        RegistryError::Directory(DirectoryError::Duplicate(kind, name)) => conflict(kind, &name),
        RegistryError::KeyMismatch(name) => conflict(EntityKind::User, &name),
        other => {
            tracing::error!(error = %other, "directory operation failed");
            internal()
        }
    }
}
