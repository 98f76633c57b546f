use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::directory::{MemoryDirectoryError, Volume};

use crate::auth::{self, AuthError, RequestAuth};
use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// PUT /volumes/:owner/:name - owner-signed volume creation.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
    request: RequestAuth,
) -> Result<Response, CreateVolumeError> {
    let user = state.registry().user(&owner).await?;
    auth::authenticate(&state, &user, &request)?;

    let volume: Volume = request.json()?;
    if volume.owner != owner || volume.name != name {
        return Err(CreateVolumeError::BodyMismatch);
    }

    state.registry().create_volume(volume).await?;
    Ok((StatusCode::CREATED, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateVolumeError {
    #[error("request body does not describe the addressed volume")]
    BodyMismatch,
    #[error("invalid volume document: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for CreateVolumeError {
    fn into_response(self) -> Response {
        match self {
            e @ CreateVolumeError::BodyMismatch => error::malformed(e),
            e @ CreateVolumeError::InvalidBody(_) => error::malformed(e),
            CreateVolumeError::Auth(e) => e.into_response(),
            CreateVolumeError::Registry(e) => error::registry_fault(e),
        }
    }
}
