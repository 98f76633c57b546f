use axum::routing;
use axum::Router;

pub mod delete;
pub mod endpoints;
pub mod get;
pub mod passports;
pub mod put;
pub mod users;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route(
            "/:owner/:name",
            routing::get(get::handler)
                .put(put::handler)
                .delete(delete::handler),
        )
        .route("/:owner/:name/users", routing::get(users::handler))
        .route(
            "/:owner/:name/passports/:invitee",
            routing::get(passports::get::handler).put(passports::put::handler),
        )
        .route(
            "/:owner/:name/endpoints",
            routing::get(endpoints::list::handler),
        )
        .route(
            "/:owner/:name/endpoints/:user/:node_id",
            routing::put(endpoints::put::handler).delete(endpoints::delete::handler),
        )
        .with_state(state)
}
