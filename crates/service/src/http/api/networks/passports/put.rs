use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::{json, Value};

use common::directory::{MemoryDirectoryError, NetworkKey};

use crate::auth::{self, AuthError, RequestAuth};
use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// PUT /networks/:owner/:name/passports/:invitee - record the invitee's
/// right to join. Either party's signature suffices: the owner issuing an
/// invitation, or the invitee accepting one, with no third authority in
/// the loop.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name, invitee)): Path<(String, String, String)>,
    request: RequestAuth,
) -> Result<Response, PutPassportError> {
    let owner_user = state.registry().user(&owner).await?;

    // Fall through to the invitee only when the signature is simply not
    // the owner's; missing or malformed credential material and internal
    // failures propagate as their own errors instead of being masked as
    // the second party's auth failure.
    if let Err(error) = auth::authenticate(&state, &owner_user, &request) {
        if !error.is_identity_failure() {
            return Err(error.into());
        }
        let invitee_user = state.registry().user(&invitee).await?;
        auth::authenticate(&state, &invitee_user, &request)?;
    }

    let document: Value = request.json()?;
    state
        .registry()
        .upsert_passport(&NetworkKey::new(owner, name), &invitee, document)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum PutPassportError {
    #[error("invalid passport document: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for PutPassportError {
    fn into_response(self) -> Response {
        match self {
            e @ PutPassportError::InvalidBody(_) => error::malformed(e),
            PutPassportError::Auth(e) => e.into_response(),
            PutPassportError::Registry(e) => error::registry_fault(e),
        }
    }
}
