use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::directory::{MemoryDirectoryError, NetworkKey};

use crate::auth::{self, AuthError, RequestAuth};
use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// DELETE /networks/:owner/:name/endpoints/:user/:node_id - a peer
/// withdraws one of its advertisements. Same rule as publishing: only the
/// named user, and idempotent.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name, user, node_id)): Path<(String, String, String, String)>,
    request: RequestAuth,
) -> Result<Response, DeleteEndpointError> {
    let publisher = state.registry().user(&user).await?;
    auth::authenticate(&state, &publisher, &request)?;

    state
        .registry()
        .revoke_endpoint(&NetworkKey::new(owner, name), &user, &node_id)
        .await?;
    Ok((StatusCode::OK, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteEndpointError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for DeleteEndpointError {
    fn into_response(self) -> Response {
        match self {
            DeleteEndpointError::Auth(e) => e.into_response(),
            DeleteEndpointError::Registry(e) => error::registry_fault(e),
        }
    }
}
