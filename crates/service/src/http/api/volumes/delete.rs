use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::directory::MemoryDirectoryError;

use crate::auth::{self, AuthError, RequestAuth};
use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// DELETE /volumes/:owner/:name - owner-signed.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
    request: RequestAuth,
) -> Result<Response, DeleteVolumeError> {
    let user = state.registry().user(&owner).await?;
    auth::authenticate(&state, &user, &request)?;

    state.registry().delete_volume(&owner, &name).await?;
    Ok((StatusCode::OK, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteVolumeError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for DeleteVolumeError {
    fn into_response(self) -> Response {
        match self {
            DeleteVolumeError::Auth(e) => e.into_response(),
            DeleteVolumeError::Registry(e) => error::registry_fault(e),
        }
    }
}
