use std::fmt::{Debug, Display};

use serde_json::Value;

use common::directory::{
    DirectoryError, DirectoryProvider, EndpointState, Network, NetworkKey, User, Volume,
};

/// Outcome of a user registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    /// Same name, same key: re-announcing an identity is not an error.
    AlreadyRegistered,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError<E: Display + Debug> {
    #[error(transparent)]
    Directory(#[from] DirectoryError<E>),
    /// The name is taken by an identity with a different key.
    #[error("user {0:?} already exists with a different key")]
    KeyMismatch(String),
}

/// Business rules over the directory store. Handlers decide *who* is
/// asking (via `auth`); the registry decides what a request may do to the
/// records and keeps nested-map updates atomic.
#[derive(Debug, Clone)]
pub struct Registry<P> {
    provider: P,
}

impl<P: DirectoryProvider> Registry<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Register an identity. Re-registration with the identical key is
    /// idempotent; a different key under an existing name is a conflict
    /// (the name is squatted, not re-announced).
    pub async fn register_user(&self, user: User) -> Result<Registration, RegistryError<P::Error>> {
        match self.provider.user_create(user.clone()).await {
            Ok(()) => Ok(Registration::Created),
            Err(DirectoryError::Duplicate(..)) => {
                let existing = self.provider.user_get(&user.name).await?;
                if existing.key() == user.key() {
                    Ok(Registration::AlreadyRegistered)
                } else {
                    Err(RegistryError::KeyMismatch(user.name))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn user(&self, name: &str) -> Result<User, RegistryError<P::Error>> {
        Ok(self.provider.user_get(name).await?)
    }

    pub async fn delete_user(&self, name: &str) -> Result<(), RegistryError<P::Error>> {
        Ok(self.provider.user_delete(name).await?)
    }

    /// Persist a user's updated credential sets.
    pub async fn save_credentials(&self, user: User) -> Result<(), RegistryError<P::Error>> {
        Ok(self.provider.user_update(user).await?)
    }

    /// Network keys the user owns or holds a passport for.
    pub async fn user_networks(&self, name: &str) -> Result<Vec<NetworkKey>, RegistryError<P::Error>> {
        Ok(self.provider.networks_for_user(name).await?)
    }

    pub async fn create_network(&self, network: Network) -> Result<(), RegistryError<P::Error>> {
        Ok(self.provider.network_create(network).await?)
    }

    pub async fn network(&self, key: &NetworkKey) -> Result<Network, RegistryError<P::Error>> {
        let (network, _) = self.provider.network_get(key).await?;
        Ok(network)
    }

    pub async fn delete_network(&self, key: &NetworkKey) -> Result<(), RegistryError<P::Error>> {
        // resolve first so deleting an absent network reports NotFound
        self.provider.network_get(key).await?;
        Ok(self.provider.network_delete(key).await?)
    }

    /// Members of a network: owner first, then passport invitees in map
    /// order.
    pub async fn network_users(&self, key: &NetworkKey) -> Result<Vec<String>, RegistryError<P::Error>> {
        Ok(self.network(key).await?.users())
    }

    /// Record or replace the invitee's passport document.
    pub async fn upsert_passport(
        &self,
        key: &NetworkKey,
        invitee: &str,
        document: Value,
    ) -> Result<(), RegistryError<P::Error>> {
        self.mutate_network(key, |network| {
            network
                .passports
                .insert(invitee.to_string(), document.clone());
        })
        .await
    }

    /// Publish one node's reachability under the named user.
    pub async fn publish_endpoint(
        &self,
        key: &NetworkKey,
        user: &str,
        node_id: &str,
        descriptor: Value,
    ) -> Result<(), RegistryError<P::Error>> {
        self.mutate_network(key, |network| {
            network
                .endpoints
                .entry(user.to_string())
                .or_default()
                .insert(node_id.to_string(), EndpointState::Present(descriptor.clone()));
        })
        .await
    }

    /// Withdraw an advertisement, leaving the revocation marker in place.
    /// Revoking an entry that was never published is still a success.
    pub async fn revoke_endpoint(
        &self,
        key: &NetworkKey,
        user: &str,
        node_id: &str,
    ) -> Result<(), RegistryError<P::Error>> {
        self.mutate_network(key, |network| {
            network
                .endpoints
                .entry(user.to_string())
                .or_default()
                .insert(node_id.to_string(), EndpointState::Revoked);
        })
        .await
    }

    pub async fn create_volume(&self, volume: Volume) -> Result<(), RegistryError<P::Error>> {
        Ok(self.provider.volume_create(volume).await?)
    }

    pub async fn volume(&self, owner: &str, name: &str) -> Result<Volume, RegistryError<P::Error>> {
        Ok(self.provider.volume_get(owner, name).await?)
    }

    pub async fn delete_volume(&self, owner: &str, name: &str) -> Result<(), RegistryError<P::Error>> {
        self.provider.volume_get(owner, name).await?;
        Ok(self.provider.volume_delete(owner, name).await?)
    }

    /// Read-modify-write on one network record. The whole record commits
    /// against the revision observed at read time and retries on a lost
    /// race, so concurrent writers to disjoint sub-keys never clobber each
    /// other and a cancelled request publishes nothing.
    async fn mutate_network<F>(
        &self,
        key: &NetworkKey,
        mut mutate: F,
    ) -> Result<(), RegistryError<P::Error>>
    where
        F: FnMut(&mut Network),
    {
        loop {
            let (mut network, revision) = self.provider.network_get(key).await?;
            mutate(&mut network);
            match self.provider.network_update(network, revision).await {
                Ok(()) => return Ok(()),
                Err(DirectoryError::RevisionMismatch(_)) => {
                    tracing::debug!(network = %key, "network update lost the revision race, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
