use serde_json::{json, Value};

/// Version string for the workspace.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build information surfaced by the root and status endpoints.
pub fn build_info() -> Value {
    json!({
        "version": version(),
    })
}
