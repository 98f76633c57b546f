use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::crypto::PublicKey;

/// The public-key document embedded in a user record, keyed by scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDocument {
    pub ed25519: PublicKey,
}

/// A third-party credential linked to a user account.
///
/// Opaque to the directory: stored as handed over by the OAuth exchange and
/// returned verbatim to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub uid: String,
    pub display_name: String,
    pub token: String,
    #[serde(default)]
    pub refresh_token: String,
}

/// A registered identity. `name` is the globally unique natural key; the
/// public key is what request signatures are checked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub public_key: KeyDocument,
    /// provider -> uid -> credential. Only ever exposed through the
    /// authenticated credentials endpoint, never on public lookup.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub credentials: BTreeMap<String, BTreeMap<String, Credential>>,
}

impl User {
    pub fn new(name: impl Into<String>, key: PublicKey) -> Self {
        Self {
            name: name.into(),
            public_key: KeyDocument { ed25519: key },
            credentials: BTreeMap::new(),
        }
    }

    /// The key request signatures are verified against.
    pub fn key(&self) -> &PublicKey {
        &self.public_key.ed25519
    }

    /// The document served on unauthenticated lookup: identity only,
    /// linked credentials stay private.
    pub fn public_document(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "public_key": self.public_key,
        })
    }

    /// Credentials linked for one provider, if any.
    pub fn accounts(&self, provider: &str) -> Option<&BTreeMap<String, Credential>> {
        self.credentials.get(provider)
    }

    /// Mutable credential map for one provider, created on first use.
    pub fn accounts_mut(&mut self, provider: &str) -> &mut BTreeMap<String, Credential> {
        self.credentials.entry(provider.to_string()).or_default()
    }
}
