use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use common::directory::MemoryDirectory;

use crate::config::Config;
use crate::oauth::OAuthApp;
use crate::registry::Registry;
use crate::urls::SignedUrlIssuer;

/// Main service state - shared by every request handler.
#[derive(Debug, Clone)]
pub struct State {
    registry: Registry<MemoryDirectory>,
    http_client: reqwest::Client,
    oauth_apps: Arc<BTreeMap<String, OAuthApp>>,
    url_issuer: Option<Arc<dyn SignedUrlIssuer>>,
    debug_principals: Arc<HashSet<String>>,
    public_url: Option<String>,
    avatar_bucket: Arc<str>,
}

impl State {
    pub fn from_config(config: &Config) -> Self {
        Self {
            registry: Registry::new(MemoryDirectory::new()),
            http_client: reqwest::Client::new(),
            oauth_apps: Arc::new(config.oauth.clone()),
            url_issuer: None,
            debug_principals: Arc::new(config.debug_principals.clone()),
            public_url: config.public_url.clone(),
            avatar_bucket: config.avatar_bucket.clone().into(),
        }
    }

    /// Wire in a signed-URL issuer, enabling the avatar routes.
    pub fn with_url_issuer(mut self, issuer: Arc<dyn SignedUrlIssuer>) -> Self {
        self.url_issuer = Some(issuer);
        self
    }

    pub fn registry(&self) -> &Registry<MemoryDirectory> {
        &self.registry
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Registered app keys for a provider, if the deployment enables it.
    pub fn oauth_app(&self, provider: &str) -> Option<&OAuthApp> {
        self.oauth_apps.get(provider)
    }

    pub fn url_issuer(&self) -> Option<&Arc<dyn SignedUrlIssuer>> {
        self.url_issuer.as_ref()
    }

    pub fn is_debug_principal(&self, name: &str) -> bool {
        self.debug_principals.contains(name)
    }

    /// Externally visible base URL for redirect URIs: configuration wins,
    /// otherwise reconstructed from the request's Host header.
    pub fn external_url(&self, host: Option<&str>) -> String {
        if let Some(url) = &self.public_url {
            return url.clone();
        }
        format!("http://{}", host.unwrap_or("localhost"))
    }

    pub fn avatar_bucket(&self) -> &str {
        &self.avatar_bucket
    }
}
