use crate::{
    AppState,
    db::RoleExt,
    dtos::{Response, RoleIdResponseDto},
    error::HttpError,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::instrument;

/// Router for the role catalog
pub fn role_handler() -> Router<AppState> {
    Router::new()
        // POST /seed - Fill the catalog from the role enumeration (idempotent)
        .route("/seed", post(seed_roles))
        // GET /{name} - Resolve a role name to its id
        .route("/{name}", get(get_role_id))
}

#[instrument(skip(app_state))]
pub async fn seed_roles(State(app_state): State<AppState>) -> Result<impl IntoResponse, HttpError> {
    app_state.db_client.seed_roles().await?;

    tracing::info!("Role catalog seeded");
    Ok(Json(Response {
        status: "success",
        message: "Role catalog seeded".to_string(),
    }))
}

#[instrument(skip(app_state))]
pub async fn get_role_id(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let role_id = app_state.db_client.get_role_id(&name).await?;

    Ok(Json(RoleIdResponseDto {
        status: "success".to_string(),
        role_id,
    }))
}
