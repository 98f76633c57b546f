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

/// GET /users/:name/networks - networks the caller owns or holds a
/// passport for. Authenticated: membership is the caller's own business.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    request: RequestAuth,
) -> Result<Response, UserNetworksError> {
    let user = state.registry().user(&name).await?;
    auth::authenticate(&state, &user, &request)?;

    let networks: Vec<String> = state
        .registry()
        .user_networks(&name)
        .await?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok((StatusCode::OK, Json(json!({ "networks": networks }))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UserNetworksError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for UserNetworksError {
    fn into_response(self) -> Response {
        match self {
            UserNetworksError::Auth(e) => e.into_response(),
            UserNetworksError::Registry(e) => error::registry_fault(e),
        }
    }
}
