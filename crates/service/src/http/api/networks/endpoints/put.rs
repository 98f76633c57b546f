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

/// PUT /networks/:owner/:name/endpoints/:user/:node_id - a peer
/// advertises one of its nodes. Only the named user may publish under
/// their own name; not even the network owner can advertise on another
/// peer's behalf.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name, user, node_id)): Path<(String, String, String, String)>,
    request: RequestAuth,
) -> Result<Response, PutEndpointError> {
    let publisher = state.registry().user(&user).await?;
    auth::authenticate(&state, &publisher, &request)?;

    let descriptor: Value = request.json()?;
    state
        .registry()
        .publish_endpoint(&NetworkKey::new(owner, name), &user, &node_id, descriptor)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum PutEndpointError {
    #[error("invalid endpoint descriptor: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for PutEndpointError {
    fn into_response(self) -> Response {
        match self {
            e @ PutEndpointError::InvalidBody(_) => error::malformed(e),
            PutEndpointError::Auth(e) => e.into_response(),
            PutEndpointError::Registry(e) => error::registry_fault(e),
        }
    }
}
