use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::directory::{MemoryDirectoryError, User};

use crate::http::api::error;
use crate::registry::{Registration, RegistryError};
use crate::ServiceState;

/// PUT /users/:name - self-registration. Unsigned by design: registration
/// is what binds the name to the key that signs everything afterwards.
/// Re-announcing the identical key is a 200, a divergent key a 409.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    Json(user): Json<User>,
) -> Result<Response, RegisterUserError> {
    if user.name != name {
        return Err(RegisterUserError::BodyMismatch {
            path: name,
            body: user.name,
        });
    }

    match state.registry().register_user(user).await? {
        Registration::Created => Ok((StatusCode::CREATED, Json(json!({}))).into_response()),
        Registration::AlreadyRegistered => Ok((StatusCode::OK, Json(json!({}))).into_response()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error("body names user {body:?} but the path addresses {path:?}")]
    BodyMismatch { path: String, body: String },
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for RegisterUserError {
    fn into_response(self) -> Response {
        match self {
            e @ RegisterUserError::BodyMismatch { .. } => error::malformed(e),
            RegisterUserError::Registry(e) => error::registry_fault(e),
        }
    }
}
