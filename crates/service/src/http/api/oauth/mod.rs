use axum::routing::get;
use axum::Router;

pub mod authorize;
pub mod callback;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/:provider", get(callback::handler))
        .with_state(state)
}
