use axum::routing;
use axum::Router;

pub mod avatar;
pub mod credentials;
pub mod delete;
pub mod get;
pub mod networks;
pub mod put;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route(
            "/:name",
            routing::get(get::handler)
                .put(put::handler)
                .delete(delete::handler),
        )
        .route("/:name/networks", routing::get(networks::handler))
        .route(
            "/:name/avatar",
            routing::get(avatar::download)
                .put(avatar::upload)
                .delete(avatar::remove),
        )
        .route(
            "/:name/oauth/:provider",
            routing::get(super::oauth::authorize::handler),
        )
        .route(
            "/:name/credentials/:provider",
            routing::get(credentials::list),
        )
        .route(
            "/:name/credentials/:provider/refresh",
            routing::get(credentials::refresh),
        )
        .with_state(state)
}
