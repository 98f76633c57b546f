/**
 * Request authentication: signature/time header
 *  extraction and canonical verification against
 *  a registered identity.
 */
pub mod auth;
/**
 * Service configuration.
 */
pub mod config;
/**
 * The HTTP surface: routers, per-operation
 *  handlers, health probes.
 */
pub mod http;
/**
 * Data-driven OAuth provider table and the
 *  generic token exchange client.
 */
pub mod oauth;
/**
 * Business rules over the directory store:
 *  registration idempotency, passport and
 *  endpoint authorization, CAS retries.
 */
pub mod registry;
/**
 * Shared per-request service state.
 */
pub mod state;
/**
 * Signed-URL issuance seam for avatar storage.
 */
pub mod urls;

pub use config::Config;
pub use state::State as ServiceState;
