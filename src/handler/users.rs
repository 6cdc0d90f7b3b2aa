use crate::{
    AppState,
    db::UserExt,
    dtos::{
        BulkCreatedResponseDto, BulkRegisterDto, RegisterUserDto, RegisterUserProfileDto, Response,
        UserCreatedResponseDto, UserDetailResponseDto, UserProfileCreatedResponseDto,
    },
    error::{ErrorMessage, HttpError},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::instrument;
use validator::Validate;

/// Router for user management endpoints
pub fn users_handler() -> Router<AppState> {
    Router::new()
        // POST / - Create a single user
        .route("/", post(create_user))
        // POST /with-profile - Create a user and its profile atomically
        .route("/with-profile", post(create_user_with_profile))
        // POST /bulk - Create a batch of users in one transaction
        .route("/bulk", post(create_users_bulk))
        // GET /{id} - Fetch a user with its role and profile
        // DELETE /{id} - Hard delete (profile cascades)
        .route("/{id}", get(get_user).delete(delete_user))
}

#[instrument(skip(app_state, body), fields(username = %body.username))]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid create_user input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let user_id = app_state
        .db_client
        .save_user(body.username, body.email, body.password, &body.role)
        .await?;

    tracing::info!(user_id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponseDto {
            status: "success".to_string(),
            user_id,
        }),
    ))
}

#[instrument(skip(app_state, body), fields(username = %body.user.username))]
pub async fn create_user_with_profile(
    State(app_state): State<AppState>,
    Json(body): Json<RegisterUserProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid create_user_with_profile input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let (user_id, profile_id) = app_state
        .db_client
        .save_user_with_profile(
            &body.user.username,
            &body.user.email,
            &body.user.password,
            &body.user.role,
            body.profile.into_new_profile(),
        )
        .await?;

    tracing::info!(user_id, profile_id, "User created with profile");
    Ok((
        StatusCode::CREATED,
        Json(UserProfileCreatedResponseDto {
            status: "success".to_string(),
            user_id,
            profile_id,
        }),
    ))
}

#[instrument(skip(app_state, body), fields(count = body.users.len()))]
pub async fn create_users_bulk(
    State(app_state): State<AppState>,
    Json(body): Json<BulkRegisterDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid create_users_bulk input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let new_users: Vec<_> = body
        .users
        .into_iter()
        .map(RegisterUserDto::into_new_user)
        .collect();

    let user_ids = app_state.db_client.save_users(&new_users).await?;

    tracing::info!(count = user_ids.len(), "Users created in bulk");
    Ok((
        StatusCode::CREATED,
        Json(BulkCreatedResponseDto {
            status: "success".to_string(),
            user_ids,
        }),
    ))
}

#[instrument(skip(app_state))]
pub async fn get_user(
    Path(user_id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let record = app_state
        .db_client
        .get_user_with_profile(user_id)
        .await?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::RecordNotFound.to_string()))?;

    Ok(Json(UserDetailResponseDto::from_record(&record)))
}

#[instrument(skip(app_state))]
pub async fn delete_user(
    Path(user_id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.db_client.delete_user(user_id).await?;

    tracing::info!(user_id, "User deleted");
    Ok(Json(Response {
        status: "success",
        message: "User deleted".to_string(),
    }))
}
