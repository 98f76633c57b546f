use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::directory::{MemoryDirectoryError, NetworkKey};

use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /networks/:owner/:name - the full network document. The directory
/// is semi-public by design: passports are bearer-style credentials, not
/// secrets gating reads.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
) -> Result<Response, GetNetworkError> {
    let network = state
        .registry()
        .network(&NetworkKey::new(owner, name))
        .await?;
    Ok((StatusCode::OK, Json(network)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetNetworkError {
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for GetNetworkError {
    fn into_response(self) -> Response {
        match self {
            GetNetworkError::Registry(e) => error::registry_fault(e),
        }
    }
}
