use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::directory::MemoryDirectoryError;

use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /volumes/:owner/:name - public volume lookup.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
) -> Result<Response, GetVolumeError> {
    let volume = state.registry().volume(&owner, &name).await?;
    Ok((StatusCode::OK, Json(volume)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetVolumeError {
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for GetVolumeError {
    fn into_response(self) -> Response {
        match self {
            GetVolumeError::Registry(e) => error::registry_fault(e),
        }
    }
}
