use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub async fn not_found_handler() -> Response {
    let body = serde_json::json!({
        "error": "route/not_found",
        "reason": "no such route",
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
