use axum::Router;
use http::header::{HeaderName, ACCEPT, CONTENT_TYPE, ORIGIN};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod networks;
pub mod oauth;
pub mod users;
pub mod volumes;

use common::crypto::{SIGNATURE_HEADER, TIME_HEADER};

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::PUT, Method::DELETE])
        .allow_headers(vec![
            ACCEPT,
            CONTENT_TYPE,
            ORIGIN,
            HeaderName::from_static(SIGNATURE_HEADER),
            HeaderName::from_static(TIME_HEADER),
        ])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        .nest("/users", users::router(state.clone()))
        .nest("/networks", networks::router(state.clone()))
        .nest("/volumes", volumes::router(state.clone()))
        .nest("/oauth", oauth::router(state.clone()))
        .with_state(state)
        .layer(cors_layer)
}
