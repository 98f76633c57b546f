use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::directory::{MemoryDirectoryError, NetworkKey};

use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /networks/:owner/:name/endpoints - the full advertisement map,
/// user -> node id -> descriptor. Revoked entries appear as `null`.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
) -> Result<Response, ListEndpointsError> {
    let network = state
        .registry()
        .network(&NetworkKey::new(owner, name))
        .await?;
    Ok((StatusCode::OK, Json(network.endpoints)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListEndpointsError {
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for ListEndpointsError {
    fn into_response(self) -> Response {
        match self {
            ListEndpointsError::Registry(e) => error::registry_fault(e),
        }
    }
}
