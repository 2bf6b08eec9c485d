// HTTP handlers for user endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::repository::Repository;
use crate::users::models::{CreateUserInput, GetJwtInput, GetJwtOutput, User};
use crate::AppState;

/// Register a new user
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!("Undecodable user body: {}", rejection.body_text());
        ApiError::bad_request("Invalid request")
    })?;

    input.validate().map_err(|e| {
        tracing::debug!("User validation failed: {}", e);
        ApiError::bad_request("Invalid user data")
    })?;

    let CreateUserInput {
        name,
        email,
        password,
    } = input;
    let user = tokio::task::spawn_blocking(move || User::new(name, email, &password))
        .await
        .map_err(|e| ApiError::Internal {
            message: "Error creating user".to_string(),
            detail: e.to_string(),
        })?
        .map_err(|e| {
            tracing::debug!("User construction failed: {}", e);
            ApiError::bad_request("Invalid user data")
        })?;

    state.users.create(&user).await.map_err(|source| ApiError::Storage {
        message: "Error creating user".to_string(),
        source,
    })?;

    tracing::info!("Created user {}", user.id);
    Ok(StatusCode::CREATED)
}

/// Exchange credentials for a bearer token
/// POST /users/generate-jwt
pub async fn generate_jwt(
    State(state): State<AppState>,
    payload: Result<Json<GetJwtInput>, JsonRejection>,
) -> Result<Json<GetJwtOutput>, ApiError> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!("Undecodable credentials body: {}", rejection.body_text());
        ApiError::bad_request("Invalid request body")
    })?;

    let access_token = state.auth.issue_token(&input.email, &input.password).await?;

    Ok(Json(GetJwtOutput { access_token }))
}
