use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;

use crate::oauth::OAuthApp;

#[derive(Debug, Clone)]
pub struct Config {
    /// address for the directory API to listen on
    pub listen_addr: SocketAddr,

    /// default log level for the request trace layer
    pub log_level: tracing::Level,

    /// externally visible base URL (scheme + host), used when building
    /// OAuth redirect URIs; falls back to the request's Host header
    pub public_url: Option<String>,

    /// authenticated callers granted verbose diagnostic logging of
    /// authentication decisions
    pub debug_principals: HashSet<String>,

    /// provider name -> registered app keys; an absent entry leaves that
    /// provider disabled
    pub oauth: BTreeMap<String, OAuthApp>,

    /// object-store bucket avatar images live in; only reachable when a
    /// signed-URL issuer is wired into the state
    pub avatar_bucket: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: ([127, 0, 0, 1], 3000).into(),
            log_level: tracing::Level::INFO,
            public_url: None,
            debug_principals: HashSet::new(),
            oauth: BTreeMap::new(),
            avatar_bucket: "avatars".to_string(),
        }
    }
}
