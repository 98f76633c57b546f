use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use common::directory::{Credential, MemoryDirectoryError};

use crate::auth::{self, AuthError, RequestAuth};
use crate::http::api::error;
use crate::oauth::{self, OAuthError};
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /users/:name/credentials/:provider - the caller's linked accounts
/// for one provider. Signed: credentials are not public material.
pub async fn list(
    State(state): State<ServiceState>,
    Path((name, provider)): Path<(String, String)>,
    request: RequestAuth,
) -> Result<Response, CredentialsError> {
    let config =
        oauth::provider(&provider).ok_or_else(|| OAuthError::UnknownProvider(provider.clone()))?;

    let user = state.registry().user(&name).await?;
    auth::authenticate(&state, &user, &request)?;

    let credentials: Vec<Credential> = user
        .accounts(config.name)
        .map(|accounts| accounts.values().cloned().collect())
        .unwrap_or_default();
    Ok((StatusCode::OK, Json(json!({ "credentials": credentials }))).into_response())
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    pub refresh_token: String,
}

/// GET /users/:name/credentials/:provider/refresh - trade a refresh token
/// for a fresh access token and persist it. The refresh token itself is
/// the bearer credential here.
pub async fn refresh(
    State(state): State<ServiceState>,
    Path((name, provider)): Path<(String, String)>,
    Query(query): Query<RefreshQuery>,
) -> Result<Response, CredentialsError> {
    let config =
        oauth::provider(&provider).ok_or_else(|| OAuthError::UnknownProvider(provider.clone()))?;
    let app = state
        .oauth_app(config.name)
        .ok_or_else(|| OAuthError::Unconfigured(provider.clone()))?
        .clone();

    let mut user = state.registry().user(&name).await?;
    let uid = user
        .accounts(config.name)
        .and_then(|accounts| {
            accounts
                .values()
                .find(|c| !c.refresh_token.is_empty() && c.refresh_token == query.refresh_token)
        })
        .map(|c| c.uid.clone())
        .ok_or(CredentialsError::UnknownRefreshToken)?;

    let token = config
        .refresh_access_token(state.http_client(), &app, &query.refresh_token)
        .await?;

    if let Some(account) = user.accounts_mut(config.name).get_mut(&uid) {
        account.token = token.clone();
    }
    state.registry().save_credentials(user).await?;

    Ok((StatusCode::OK, Json(json!({ "token": token }))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("no account matches the presented refresh token")]
    UnknownRefreshToken,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for CredentialsError {
    fn into_response(self) -> Response {
        match self {
            CredentialsError::UnknownRefreshToken => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "credentials/not_found",
                    "reason": self.to_string(),
                })),
            )
                .into_response(),
            CredentialsError::Auth(e) => e.into_response(),
            CredentialsError::OAuth(e) => error::oauth_fault(e),
            CredentialsError::Registry(e) => error::registry_fault(e),
        }
    }
}
