use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::directory::{MemoryDirectoryError, NetworkKey};

use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /networks/:owner/:name/users - the member list: owner first, then
/// passport invitees in stable map order.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name)): Path<(String, String)>,
) -> Result<Response, NetworkUsersError> {
    let users = state
        .registry()
        .network_users(&NetworkKey::new(owner, name))
        .await?;
    Ok((StatusCode::OK, Json(json!({ "users": users }))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkUsersError {
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for NetworkUsersError {
    fn into_response(self) -> Response {
        match self {
            NetworkUsersError::Registry(e) => error::registry_fault(e),
        }
    }
}
