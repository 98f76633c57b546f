use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::directory::MemoryDirectoryError;

use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /users/:name - public identity lookup. Serves name and key only;
/// linked credentials are not part of the public document.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
) -> Result<Response, GetUserError> {
    let user = state.registry().user(&name).await?;
    Ok((StatusCode::OK, Json(user.public_document())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetUserError {
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for GetUserError {
    fn into_response(self) -> Response {
        match self {
            GetUserError::Registry(e) => error::registry_fault(e),
        }
    }
}
