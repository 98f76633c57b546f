mod memory;
mod network;
mod provider;
mod user;
mod volume;

pub use memory::{MemoryDirectory, MemoryDirectoryError};
pub use network::{EndpointState, Network, NetworkKey};
pub use provider::{DirectoryError, DirectoryProvider, EntityKind};
pub use user::{Credential, KeyDocument, User};
pub use volume::Volume;
