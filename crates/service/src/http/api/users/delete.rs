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

/// DELETE /users/:name - only the key holder may retire the identity.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    request: RequestAuth,
) -> Result<Response, DeleteUserError> {
    let user = state.registry().user(&name).await?;
    auth::authenticate(&state, &user, &request)?;

    state.registry().delete_user(&name).await?;
    Ok((StatusCode::OK, Json(json!({}))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for DeleteUserError {
    fn into_response(self) -> Response {
        match self {
            DeleteUserError::Auth(e) => e.into_response(),
            DeleteUserError::Registry(e) => error::registry_fault(e),
        }
    }
}
