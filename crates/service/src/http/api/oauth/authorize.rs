use axum::extract::{Host, Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use common::directory::MemoryDirectoryError;

use crate::http::api::error;
use crate::oauth::{self, OAuthError};
use crate::registry::RegistryError;
use crate::ServiceState;

/// GET /users/:name/oauth/:provider - send the user to the provider's
/// authorization form, with their name riding in the `state` parameter so
/// the callback knows whose account to link.
pub async fn handler(
    State(state): State<ServiceState>,
    Path((name, provider)): Path<(String, String)>,
    host: Option<Host>,
) -> Result<Response, AuthorizeError> {
    let host = host.map(|Host(h)| h);
    let config =
        oauth::provider(&provider).ok_or_else(|| OAuthError::UnknownProvider(provider.clone()))?;
    let app = state
        .oauth_app(config.name)
        .ok_or_else(|| OAuthError::Unconfigured(provider.clone()))?;

    // resolve the user before sending them round the consent loop
    let user = state.registry().user(&name).await?;

    let redirect_uri = format!("{}/oauth/{}", state.external_url(host.as_deref()), config.name);
    let url = config.authorization_url(app, &redirect_uri, &user.name);
    Ok(Redirect::temporary(url.as_str()).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum AuthorizeError {
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error(transparent)]
    Registry(#[from] RegistryError<MemoryDirectoryError>),
}

impl IntoResponse for AuthorizeError {
    fn into_response(self) -> Response {
        match self {
            AuthorizeError::OAuth(e) => error::oauth_fault(e),
            AuthorizeError::Registry(e) => error::registry_fault(e),
        }
    }
}
