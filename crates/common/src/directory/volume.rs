use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named storage volume. The directory only owns the identity; any
/// further descriptor fields ride along verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    pub owner: String,
    pub name: String,
    #[serde(flatten)]
    pub descriptor: Map<String, Value>,
}

impl Volume {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            descriptor: Map::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_fields_ride_along() {
        let raw = json!({
            "owner": "alice",
            "name": "vol1",
            "network": "alice/net1",
            "mountpoint": "/mnt/vol1",
        });
        let volume: Volume = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(volume.owner, "alice");
        assert_eq!(volume.descriptor["network"], "alice/net1");
        assert_eq!(serde_json::to_value(&volume).unwrap(), raw);
    }
}
