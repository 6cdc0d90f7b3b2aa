use axum::{Json, extract::Path, response::IntoResponse};
use serde_json::json;

// The two demonstration routes the service started out with.

pub async fn root() -> impl IntoResponse {
    Json(json!({"message": "Hello World"}))
}

pub async fn say_hello(Path(name): Path<String>) -> impl IntoResponse {
    Json(json!({"message": format!("Hello {}", name)}))
}
