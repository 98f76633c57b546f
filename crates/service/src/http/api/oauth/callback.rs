use axum::extract::{Host, Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Deserialize;

use common::directory::{Credential, MemoryDirectoryError};

use crate::http::api::error;
use crate::oauth::{self, OAuthError};
use crate::registry::RegistryError;
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    /// user name round-tripped through the provider's `state` parameter
    pub state: String,
}

/// GET /oauth/:provider - the provider's redirect target. Exchanges the
/// code, fetches the profile, and links the credential to the user named
/// in `state`.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(provider): Path<String>,
    host: Option<Host>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, CallbackError> {
    let host = host.map(|Host(h)| h);
    let config =
        oauth::provider(&provider).ok_or_else(|| OAuthError::UnknownProvider(provider.clone()))?;
    let app = state
        .oauth_app(config.name)
        .ok_or_else(|| OAuthError::Unconfigured(provider.clone()))?;

    let redirect_uri = format!("{}/oauth/{}", state.external_url(host.as_deref()), config.name);
    let grant = config
        .exchange_code(state.http_client(), app, &redirect_uri, &query.code)
        .await?;
    let profile = config
        .fetch_profile(state.http_client(), &grant.access_token)
        .await?;

    let mut user = state.registry().user(&query.state).await?;
    user.accounts_mut(config.name).insert(
        profile.uid.clone(),
        Credential {
            uid: profile.uid.clone(),
            display_name: profile.display_name.clone(),
            token: grant.access_token,
            refresh_token: grant.refresh_token,
        },
    );
    state.registry().save_credentials(user).await?;

    tracing::info!(user = %query.state, provider = %config.name, uid = %profile.uid, "linked credential");
    Ok((StatusCode::OK, Json(profile)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        match self {
            CallbackError::OAuth(e) => error::oauth_fault(e),
            CallbackError::Registry(e) => error::registry_fault(e),
        }
    }
}
