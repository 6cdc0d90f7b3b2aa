use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    handler::{
        greet::{root, say_hello},
        hospital::{hospital_handler, patient_handler},
        role::role_handler,
        users::users_handler,
    },
};

pub fn create_router(app_state: AppState) -> Router {
    let api_route = Router::new()
        .nest("/roles", role_handler())
        .nest("/users", users_handler())
        .nest("/hospitals", hospital_handler())
        .nest("/patients", patient_handler())
        .with_state(app_state);

    Router::new()
        .route("/", get(root))
        .route("/hello/{name}", get(say_hello))
        .nest("/api", api_route)
        .layer(TraceLayer::new_for_http())
}
