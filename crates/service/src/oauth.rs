use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Normalized identity fields extracted from a provider's profile payload.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub uid: String,
    pub display_name: String,
}

/// App key/secret pair registered with a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthApp {
    pub app_key: String,
    pub app_secret: String,
}

/// Tokens handed back by a successful code exchange.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("unknown oauth provider {0:?}")]
    UnknownProvider(String),
    #[error("oauth provider {0:?} is not configured")]
    Unconfigured(String),
    #[error("token exchange with {provider} failed with status {status}")]
    ExchangeFailed { provider: &'static str, status: u16 },
    #[error("payload from {0} had an unexpected shape")]
    MalformedPayload(&'static str),
    #[error("transport error talking to {provider}: {source}")]
    Transport {
        provider: &'static str,
        source: reqwest::Error,
    },
}

/// Static description of one OAuth provider: the three endpoints plus a
/// pure extractor for the fields we keep. One generic handler drives any
/// entry in [`PROVIDERS`]; adding a provider means adding a record here,
/// not code.
pub struct ProviderConfig {
    pub name: &'static str,
    pub form_url: &'static str,
    pub exchange_url: &'static str,
    pub info_url: &'static str,
    /// extra query parameters for the authorization form
    pub params: &'static [(&'static str, &'static str)],
    pub extract: fn(&Value) -> Option<Profile>,
}

pub const PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "dropbox",
        form_url: "https://www.dropbox.com/1/oauth2/authorize",
        exchange_url: "https://api.dropbox.com/1/oauth2/token",
        info_url: "https://api.dropbox.com/1/account/info",
        params: &[],
        extract: |info| {
            let uid = match &info["uid"] {
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                _ => return None,
            };
            Some(Profile {
                uid,
                display_name: info["display_name"].as_str()?.to_string(),
            })
        },
    },
    ProviderConfig {
        name: "google",
        form_url: "https://accounts.google.com/o/oauth2/auth",
        exchange_url: "https://www.googleapis.com/oauth2/v3/token",
        info_url: "https://www.googleapis.com/drive/v2/about",
        params: &[
            ("scope", "https://www.googleapis.com/auth/drive.file"),
            ("access_type", "offline"),
            ("approval_prompt", "force"),
        ],
        extract: |info| {
            Some(Profile {
                uid: info["user"]["emailAddress"].as_str()?.to_string(),
                display_name: info["name"].as_str()?.to_string(),
            })
        },
    },
];

/// Look up a provider record by name.
pub fn provider(name: &str) -> Option<&'static ProviderConfig> {
    PROVIDERS.iter().find(|p| p.name == name)
}

impl ProviderConfig {
    /// URL of the provider's authorization form, carrying the user name in
    /// the `state` round-trip parameter.
    pub fn authorization_url(&self, app: &OAuthApp, redirect_uri: &str, username: &str) -> Url {
        let mut url = Url::parse(self.form_url).unwrap();
        url.query_pairs_mut()
            .append_pair("client_id", &app.app_key)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", username);
        for (key, value) in self.params {
            url.query_pairs_mut().append_pair(key, value);
        }
        url
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        client: &reqwest::Client,
        app: &OAuthApp,
        redirect_uri: &str,
        code: &str,
    ) -> Result<TokenGrant, OAuthError> {
        let response = client
            .post(self.exchange_url)
            .query(&[
                ("code", code),
                ("grant_type", "authorization_code"),
                ("client_id", &app.app_key),
                ("client_secret", &app.app_secret),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|source| OAuthError::Transport {
                provider: self.name,
                source,
            })?;
        if !response.status().is_success() {
            return Err(OAuthError::ExchangeFailed {
                provider: self.name,
                status: response.status().as_u16(),
            });
        }

        let contents: Value = response.json().await.map_err(|source| OAuthError::Transport {
            provider: self.name,
            source,
        })?;
        let access_token = contents["access_token"]
            .as_str()
            .ok_or(OAuthError::MalformedPayload(self.name))?
            .to_string();
        let refresh_token = contents["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        Ok(TokenGrant {
            access_token,
            refresh_token,
        })
    }

    /// Fetch the account profile behind an access token and normalize it.
    pub async fn fetch_profile(
        &self,
        client: &reqwest::Client,
        access_token: &str,
    ) -> Result<Profile, OAuthError> {
        let response = client
            .get(self.info_url)
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(|source| OAuthError::Transport {
                provider: self.name,
                source,
            })?;
        if !response.status().is_success() {
            return Err(OAuthError::ExchangeFailed {
                provider: self.name,
                status: response.status().as_u16(),
            });
        }

        let info: Value = response.json().await.map_err(|source| OAuthError::Transport {
            provider: self.name,
            source,
        })?;
        (self.extract)(&info).ok_or(OAuthError::MalformedPayload(self.name))
    }

    /// Trade a refresh token for a fresh access token.
    pub async fn refresh_access_token(
        &self,
        client: &reqwest::Client,
        app: &OAuthApp,
        refresh_token: &str,
    ) -> Result<String, OAuthError> {
        let response = client
            .post(self.exchange_url)
            .query(&[
                ("client_id", app.app_key.as_str()),
                ("client_secret", app.app_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|source| OAuthError::Transport {
                provider: self.name,
                source,
            })?;
        if !response.status().is_success() {
            return Err(OAuthError::ExchangeFailed {
                provider: self.name,
                status: response.status().as_u16(),
            });
        }

        let contents: Value = response.json().await.map_err(|source| OAuthError::Transport {
            provider: self.name,
            source,
        })?;
        contents["access_token"]
            .as_str()
            .map(str::to_string)
            .ok_or(OAuthError::MalformedPayload(self.name))
    }
}
