use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Composite natural key of a network: (owner user name, network name).
/// Rendered as `owner/name` in listings and error bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkKey {
    pub owner: String,
    pub name: String,
}

impl NetworkKey {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One node's advertised reachability, or the marker left behind once the
/// advertisement is withdrawn.
///
/// Revoked entries serialize as `null` so cached readers observe the
/// invalidation rather than a silent absence; withdrawing twice is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointState {
    Present(Value),
    Revoked,
}

impl EndpointState {
    pub fn is_revoked(&self) -> bool {
        matches!(self, EndpointState::Revoked)
    }
}

impl Serialize for EndpointState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EndpointState::Present(descriptor) => descriptor.serialize(serializer),
            EndpointState::Revoked => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for EndpointState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => EndpointState::Revoked,
            descriptor => EndpointState::Present(descriptor),
        })
    }
}

/// A network record: the owner's namespace entry plus the two nested maps
/// peers coordinate through.
///
/// `passports` maps invitee user names to the (opaque) document proving
/// their right to join. `endpoints` maps user name -> node id -> the node's
/// advertised address descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub passports: BTreeMap<String, Value>,
    #[serde(default)]
    pub endpoints: BTreeMap<String, BTreeMap<String, EndpointState>>,
}

impl Network {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            passports: BTreeMap::new(),
            endpoints: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> NetworkKey {
        NetworkKey::new(self.owner.clone(), self.name.clone())
    }

    /// Members of the network: owner first, then passport invitees in map
    /// order.
    pub fn users(&self) -> Vec<String> {
        let mut users = vec![self.owner.clone()];
        users.extend(self.passports.keys().cloned());
        users
    }
}
