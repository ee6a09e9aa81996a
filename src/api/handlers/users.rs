use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{CreateUserRequest, UpdateUserRequest, User},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListUsersQuery>,
) -> Result<Json<Vec<User>>> {
    let limit = params.limit.unwrap_or(50).min(200);
    let offset = params.offset.unwrap_or(0);

    let users = state.service_context.user_repo.list(limit, offset).await?;

    Ok(Json(users))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>> {
    let user = state
        .service_context
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    if !request.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }
    if request.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let user = state
        .service_context
        .user_repo
        .create(request)
        .await
        .map_err(|e| match e {
            AppError::Database(msg) if msg.contains("UNIQUE") => {
                if msg.contains("email") {
                    AppError::Conflict("Email already registered".to_string())
                } else if msg.contains("username") {
                    AppError::Conflict("Username already taken".to_string())
                } else {
                    AppError::Conflict("Duplicate user information".to_string())
                }
            }
            _ => e,
        })?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let updated = state.service_context.user_repo.update(id, request).await?;

    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .service_context
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Drop any live sessions before removing the account.
    state
        .service_context
        .auth_service
        .invalidate_user_sessions(id)
        .await?;
    state.service_context.user_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
