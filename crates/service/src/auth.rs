use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, OriginalUri, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;

use common::crypto::{
    unix_now, within_replay_window, CanonicalRequest, VerifyError, SIGNATURE_HEADER, TIME_HEADER,
};
use common::directory::User;

use crate::ServiceState;

const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Why a request failed to prove control of the claimed identity.
///
/// Each precondition failure is its own variant with its own transport
/// mapping; externally they all read as "not authenticated/authorized",
/// internally the distinction feeds diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing signature header")]
    MissingSignature,
    #[error("missing time header")]
    MissingTimestamp,
    #[error("time header is not an integer timestamp")]
    MalformedTimestamp,
    #[error("signature header is not decodable signature material")]
    MalformedSignature,
    #[error("time too far away: got {claimed}, current {now}")]
    StaleTimestamp { claimed: i64, now: i64 },
    #[error("authentication error")]
    BadSignature,
    #[error("request body could not be read")]
    UnreadableBody,
}

impl AuthError {
    /// True when the failure means "this is not that identity" rather than
    /// missing/garbled credential material. Dual-party authorization may
    /// only fall back to the second identity on these.
    pub fn is_identity_failure(&self) -> bool {
        matches!(self, AuthError::BadSignature)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AuthError::MissingSignature => (StatusCode::UNAUTHORIZED, "credentials/missing"),
            AuthError::MissingTimestamp
            | AuthError::MalformedTimestamp
            | AuthError::MalformedSignature
            | AuthError::UnreadableBody => (StatusCode::BAD_REQUEST, "request/malformed"),
            AuthError::StaleTimestamp { .. } => (StatusCode::UNAUTHORIZED, "credentials/stale"),
            AuthError::BadSignature => (StatusCode::FORBIDDEN, "credentials/invalid"),
        };
        (
            status,
            Json(json!({
                "error": kind,
                "reason": self.to_string(),
            })),
        )
            .into_response()
    }
}

/// The request material signature verification runs over: method, path
/// (leading slash stripped), the two protocol headers, and the raw body
/// bytes.
///
/// Handlers that parse a JSON body do so through [`RequestAuth::json`] so
/// the parsed document and the signed digest can never diverge.
#[derive(Debug)]
pub struct RequestAuth {
    method: String,
    path: String,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for RequestAuth {
    type Rejection = AuthError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().as_str().to_string();
        // nested routers strip their prefix from req.uri(); the signature
        // covers the path as the client sent it
        let path = req
            .extensions()
            .get::<OriginalUri>()
            .map(|uri| uri.path().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());
        let signature = req
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let timestamp = req
            .headers()
            .get(TIME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(req.into_body(), BODY_LIMIT)
            .await
            .map_err(|_| AuthError::UnreadableBody)?;

        Ok(Self {
            method,
            path: path.trim_start_matches('/').to_string(),
            signature,
            timestamp,
            body,
        })
    }
}

impl RequestAuth {
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parse the signed body bytes as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Verify that this request proves control of `user`'s registered key,
/// evaluated against the given server time.
pub fn authenticate_at(user: &User, request: &RequestAuth, now: i64) -> Result<(), AuthError> {
    let signature = request
        .signature
        .as_deref()
        .ok_or(AuthError::MissingSignature)?;
    let timestamp = request
        .timestamp
        .as_deref()
        .ok_or(AuthError::MissingTimestamp)?;
    let claimed: i64 = timestamp
        .parse()
        .map_err(|_| AuthError::MalformedTimestamp)?;
    if !within_replay_window(claimed, now) {
        return Err(AuthError::StaleTimestamp { claimed, now });
    }

    let canonical = CanonicalRequest {
        method: &request.method,
        path: &request.path,
        body: &request.body,
        timestamp: claimed,
    };
    match canonical.verify(user.key(), signature) {
        Ok(()) => Ok(()),
        Err(VerifyError::Undecodable) => Err(AuthError::MalformedSignature),
        Err(VerifyError::Mismatch) => Err(AuthError::BadSignature),
    }
}

/// Verify against the current clock, logging the outcome. Principals on
/// the configured debug list get their failures logged at info level.
pub fn authenticate(
    state: &ServiceState,
    user: &User,
    request: &RequestAuth,
) -> Result<(), AuthError> {
    let result = authenticate_at(user, request, unix_now());
    if let Err(ref error) = result {
        if state.is_debug_principal(&user.name) {
            tracing::info!(user = %user.name, method = %request.method, path = %request.path, %error, "authentication failed");
        } else {
            tracing::debug!(user = %user.name, %error, "authentication failed");
        }
    }
    result
}
