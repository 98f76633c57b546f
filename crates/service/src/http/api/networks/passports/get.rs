use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::directory::{EntityKind, MemoryDirectoryError, NetworkKey};

use crate::http::api::error;
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /networks/:owner/:name/passports/:invitee - unauthenticated:
/// passports are bearer-style membership proofs, not secrets.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((owner, name, invitee)): Path<(String, String, String)>,
) -> Result<Response, GetPassportError> {
    let key = NetworkKey::new(owner, name);
    let network = state.registry().network(&key).await?;

    match network.passports.get(&invitee) {
        Some(document) => Ok((StatusCode::OK, Json(document.clone())).into_response()),
        None => Err(GetPassportError::PassportNotFound {
            network: key,
            invitee,
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetPassportError {
    #[error("no passport for {invitee:?} in network {network}")]
    PassportNotFound { network: NetworkKey, invitee: String },
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for GetPassportError {
    fn into_response(self) -> Response {
        match self {
            GetPassportError::PassportNotFound { network, invitee } => {
                error::not_found(EntityKind::Passport, &format!("{}/{}", network, invitee))
            }
            GetPassportError::Registry(e) => error::registry_fault(e),
        }
    }
}
