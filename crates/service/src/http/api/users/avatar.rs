use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{HeaderMap, StatusCode};
use serde_json::json;

use crate::http::api::error;
use crate::urls::UrlIssueError;
use crate::ServiceState;

/// Signed avatar URLs stay valid just long enough for the client to
/// follow the redirect.
const URL_EXPIRY: Duration = Duration::from_secs(3 * 60);

const ACCEPTED_TYPES: &[&str] = &["image/gif", "image/jpeg", "image/png"];

fn object_name(user: &str) -> String {
    format!("{}/avatar", user)
}

fn redirect(url: url::Url) -> Response {
    (
        StatusCode::TEMPORARY_REDIRECT,
        [(LOCATION, url.to_string())],
    )
        .into_response()
}

/// PUT /users/:name/avatar - redirect the client to a signed upload URL.
pub async fn upload(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AvatarError> {
    let issuer = state.url_issuer().ok_or(AvatarError::Unavailable)?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or(AvatarError::MissingHeader("content-type"))?;
    if !ACCEPTED_TYPES.contains(&content_type) {
        return Err(AvatarError::UnsupportedMedia(content_type.to_string()));
    }
    let content_length: u64 = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .ok_or(AvatarError::MissingHeader("content-length"))?;

    let url = issuer
        .upload_url(
            state.avatar_bucket(),
            &object_name(&name),
            content_type,
            content_length,
            URL_EXPIRY,
        )
        .await?;
    Ok(redirect(url))
}

/// GET /users/:name/avatar - redirect to a signed download URL.
pub async fn download(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
) -> Result<Response, AvatarError> {
    let issuer = state.url_issuer().ok_or(AvatarError::Unavailable)?;
    let url = issuer
        .download_url(state.avatar_bucket(), &object_name(&name), URL_EXPIRY)
        .await?;
    Ok(redirect(url))
}

/// DELETE /users/:name/avatar - redirect to a signed delete URL.
pub async fn remove(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
) -> Result<Response, AvatarError> {
    let issuer = state.url_issuer().ok_or(AvatarError::Unavailable)?;
    let url = issuer
        .delete_url(state.avatar_bucket(), &object_name(&name), URL_EXPIRY)
        .await?;
    Ok(redirect(url))
}

#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error("object storage support is not enabled")]
    Unavailable,
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),
    #[error("invalid image format: {0}")]
    UnsupportedMedia(String),
    #[error(transparent)]
    Issue(#[from] UrlIssueError),
}

impl IntoResponse for AvatarError {
    fn into_response(self) -> Response {
        match self {
            AvatarError::Unavailable => (
                StatusCode::NOT_IMPLEMENTED,
                Json(json!({
                    "error": "storage/unavailable",
                    "reason": self.to_string(),
                })),
            )
                .into_response(),
            e @ AvatarError::MissingHeader(_) => error::malformed(e),
            AvatarError::UnsupportedMedia(ref mime) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({
                    "error": "avatar/unsupported_media",
                    "reason": self.to_string(),
                    "mime-type": mime,
                })),
            )
                .into_response(),
            AvatarError::Issue(e) => {
                tracing::error!(error = %e, "signed url issuance failed");
                error::internal()
            }
        }
    }
}
