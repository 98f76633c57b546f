/**
 * Cryptographic types and operations.
 *  - Public and Secret key implementations
 *  - Canonical request signing and verification
 */
pub mod crypto;
/**
 * The directory data model and store:
 *  users, networks (passports + endpoints),
 *  and volumes, behind a pluggable provider.
 */
pub mod directory;
/**
 * Helper exposing build version information.
 */
pub mod version;

pub mod prelude {
    pub use crate::crypto::{CanonicalRequest, PublicKey, SecretKey};
    pub use crate::directory::{
        DirectoryError, DirectoryProvider, EndpointState, EntityKind, MemoryDirectory, Network,
        NetworkKey, User, Volume,
    };
    pub use crate::version::build_info;
}
