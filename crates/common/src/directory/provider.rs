use std::fmt::{Debug, Display};

use async_trait::async_trait;

use super::{Network, NetworkKey, User, Volume};

/// The entity kinds addressed by the store, in their wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Network,
    Passport,
    Volume,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Network => "network",
            EntityKind::Passport => "passport",
            EntityKind::Volume => "volume",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DirectoryError<T> {
    /// Backing-store fault; surfaces as a generic server error.
    #[error("unhandled directory provider error: {0}")]
    Provider(#[from] T),
    #[error("{0} {1:?} does not exist")]
    NotFound(EntityKind, String),
    #[error("{0} {1:?} already exists")]
    Duplicate(EntityKind, String),
    /// A network update lost the revision race; re-read and retry.
    #[error("network {0} was modified concurrently")]
    RevisionMismatch(NetworkKey),
}

/// Persistence for the four entity kinds, addressed by natural key.
///
/// Contract highlights:
/// * `*_create` is atomic against concurrent creates of the same key --
///   exactly one caller observes success, the rest observe `Duplicate`.
/// * `network_get` returns the record together with a revision;
///   `network_update` commits a whole record against the revision observed
///   at read time and fails with `RevisionMismatch` when it lost the race.
///   Callers do read-modify-write in a retry loop, so concurrent writers
///   to disjoint sub-keys of one network never clobber each other.
/// * `*_delete` removes the record if present and is idempotent; existence
///   policy (404 vs silent success) belongs to the layer above.
#[async_trait]
pub trait DirectoryProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send;

    async fn user_create(&self, user: User) -> Result<(), DirectoryError<Self::Error>>;

    async fn user_get(&self, name: &str) -> Result<User, DirectoryError<Self::Error>>;

    /// Replace an existing user record.
    async fn user_update(&self, user: User) -> Result<(), DirectoryError<Self::Error>>;

    async fn user_delete(&self, name: &str) -> Result<(), DirectoryError<Self::Error>>;

    async fn network_create(&self, network: Network) -> Result<(), DirectoryError<Self::Error>>;

    async fn network_get(
        &self,
        key: &NetworkKey,
    ) -> Result<(Network, u64), DirectoryError<Self::Error>>;

    async fn network_update(
        &self,
        network: Network,
        expected_revision: u64,
    ) -> Result<(), DirectoryError<Self::Error>>;

    async fn network_delete(&self, key: &NetworkKey) -> Result<(), DirectoryError<Self::Error>>;

    /// Networks the user owns or holds a passport for, in key order.
    async fn networks_for_user(
        &self,
        name: &str,
    ) -> Result<Vec<NetworkKey>, DirectoryError<Self::Error>>;

    async fn volume_create(&self, volume: Volume) -> Result<(), DirectoryError<Self::Error>>;

    async fn volume_get(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Volume, DirectoryError<Self::Error>>;

    async fn volume_delete(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<(), DirectoryError<Self::Error>>;
}
