use axum::routing;
use axum::Router;

pub mod delete;
pub mod get;
pub mod put;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route(
            "/:owner/:name",
            routing::get(get::handler)
                .put(put::handler)
                .delete(delete::handler),
        )
        .with_state(state)
}
