use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::provider::{DirectoryError, DirectoryProvider, EntityKind};
use super::{Network, NetworkKey, User, Volume};

/// In-memory directory store backed by HashMaps under one RwLock.
///
/// Every create runs under the write lock, so concurrent creates of the
/// same key see exactly one winner. Network records carry a revision
/// counter that `network_update` checks, giving callers record-level
/// optimistic concurrency for the nested passport/endpoint maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    inner: Arc<RwLock<MemoryDirectoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryDirectoryInner {
    users: HashMap<String, User>,
    networks: HashMap<NetworkKey, VersionedNetwork>,
    volumes: HashMap<(String, String), Volume>,
}

#[derive(Debug)]
struct VersionedNetwork {
    record: Network,
    revision: u64,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryDirectoryError {
    #[error("memory directory error: {0}")]
    Internal(String),
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, MemoryDirectoryInner>, DirectoryError<MemoryDirectoryError>>
    {
        self.inner.read().map_err(|e| {
            DirectoryError::Provider(MemoryDirectoryError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, MemoryDirectoryInner>, DirectoryError<MemoryDirectoryError>>
    {
        self.inner.write().map_err(|e| {
            DirectoryError::Provider(MemoryDirectoryError::Internal(format!(
                "failed to acquire write lock: {}",
                e
            )))
        })
    }
}

#[async_trait]
impl DirectoryProvider for MemoryDirectory {
    type Error = MemoryDirectoryError;

    async fn user_create(&self, user: User) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        if inner.users.contains_key(&user.name) {
            return Err(DirectoryError::Duplicate(EntityKind::User, user.name));
        }
        inner.users.insert(user.name.clone(), user);
        Ok(())
    }

    async fn user_get(&self, name: &str) -> Result<User, DirectoryError<Self::Error>> {
        let inner = self.read()?;
        inner
            .users
            .get(name)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(EntityKind::User, name.to_string()))
    }

    async fn user_update(&self, user: User) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        if !inner.users.contains_key(&user.name) {
            return Err(DirectoryError::NotFound(EntityKind::User, user.name));
        }
        inner.users.insert(user.name.clone(), user);
        Ok(())
    }

    async fn user_delete(&self, name: &str) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        inner.users.remove(name);
        Ok(())
    }

    async fn network_create(&self, network: Network) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        let key = network.key();
        if inner.networks.contains_key(&key) {
            return Err(DirectoryError::Duplicate(
                EntityKind::Network,
                key.to_string(),
            ));
        }
        inner.networks.insert(
            key,
            VersionedNetwork {
                record: network,
                revision: 0,
            },
        );
        Ok(())
    }

    async fn network_get(
        &self,
        key: &NetworkKey,
    ) -> Result<(Network, u64), DirectoryError<Self::Error>> {
        let inner = self.read()?;
        inner
            .networks
            .get(key)
            .map(|v| (v.record.clone(), v.revision))
            .ok_or_else(|| DirectoryError::NotFound(EntityKind::Network, key.to_string()))
    }

    async fn network_update(
        &self,
        network: Network,
        expected_revision: u64,
    ) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        let key = network.key();
        let versioned = inner
            .networks
            .get_mut(&key)
            .ok_or_else(|| DirectoryError::NotFound(EntityKind::Network, key.to_string()))?;
        if versioned.revision != expected_revision {
            return Err(DirectoryError::RevisionMismatch(key));
        }
        versioned.record = network;
        versioned.revision += 1;
        Ok(())
    }

    async fn network_delete(&self, key: &NetworkKey) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        inner.networks.remove(key);
        Ok(())
    }

    async fn networks_for_user(
        &self,
        name: &str,
    ) -> Result<Vec<NetworkKey>, DirectoryError<Self::Error>> {
        let inner = self.read()?;
        let mut keys: Vec<NetworkKey> = inner
            .networks
            .values()
            .filter(|v| v.record.owner == name || v.record.passports.contains_key(name))
            .map(|v| v.record.key())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn volume_create(&self, volume: Volume) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        let key = (volume.owner.clone(), volume.name.clone());
        if inner.volumes.contains_key(&key) {
            return Err(DirectoryError::Duplicate(
                EntityKind::Volume,
                format!("{}/{}", key.0, key.1),
            ));
        }
        inner.volumes.insert(key, volume);
        Ok(())
    }

    async fn volume_get(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Volume, DirectoryError<Self::Error>> {
        let inner = self.read()?;
        inner
            .volumes
            .get(&(owner.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| {
                DirectoryError::NotFound(EntityKind::Volume, format!("{}/{}", owner, name))
            })
    }

    async fn volume_delete(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<(), DirectoryError<Self::Error>> {
        let mut inner = self.write()?;
        inner.volumes.remove(&(owner.to_string(), name.to_string()));
        Ok(())
    }
}
