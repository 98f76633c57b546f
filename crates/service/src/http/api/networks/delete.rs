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

/// DELETE /networks/:owner/:name - owner-signed, irreversible, and
/// without side effects on the member users.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
    request: RequestAuth,
) -> Result<Response, DeleteNetworkError> {
    let user = state.registry().user(&owner).await?;
    auth::authenticate(&state, &user, &request)?;

    state
        .registry()
        .delete_network(&NetworkKey::new(owner, name))
        .await?;
    Ok((StatusCode::OK, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteNetworkError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for DeleteNetworkError {
    fn into_response(self) -> Response {
        match self {
            DeleteNetworkError::Auth(e) => e.into_response(),
            DeleteNetworkError::Registry(e) => error::registry_fault(e),
        }
    }
}
