use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::directory::{MemoryDirectoryError, Network};

use crate::auth::{self, AuthError, RequestAuth};
use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// PUT /networks/:owner/:name - create a network in the owner's
/// namespace. Owner-signed; creation is the only way the record comes
/// into existence, later mutation goes through the passport and endpoint
/// sub-resources.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
    request: RequestAuth,
) -> Result<Response, CreateNetworkError> {
    let user = state.registry().user(&owner).await?;
    auth::authenticate(&state, &user, &request)?;

    let network: Network = request.json()?;
    if network.owner != owner || network.name != name {
        return Err(CreateNetworkError::BodyMismatch);
    }

    state.registry().create_network(network).await?;
    Ok((StatusCode::CREATED, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateNetworkError {
    #[error("request body does not describe the addressed network")]
    BodyMismatch,
    #[error("invalid network document: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for CreateNetworkError {
    fn into_response(self) -> Response {
        match self {
            e @ CreateNetworkError::BodyMismatch => error::malformed(e),
            e @ CreateNetworkError::InvalidBody(_) => error::malformed(e),
            CreateNetworkError::Auth(e) => e.into_response(),
            CreateNetworkError::Registry(e) => error::registry_fault(e),
        }
    }
}
