use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    auth::AuthService,
    domain::User,
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let user = state
        .service_context
        .user_repo
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !AuthService::verify_password(&req.password, &user.password_hash).await? {
        return Err(AppError::Unauthorized);
    }

    let duration = state.settings.auth.session_duration_hours;
    let (_session, token) = state
        .service_context
        .auth_service
        .create_session(user.id, duration)
        .await?;

    let cookie = state
        .service_context
        .auth_service
        .create_session_cookie(&token, false);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".to_string(),
        }),
    ))
}

pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<User> {
    Json(current.user)
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(session_cookie) = jar.get("session") {
        let _ = state
            .service_context
            .auth_service
            .invalidate_session(session_cookie.value())
            .await;
    }

    let jar = jar.add(AuthService::create_logout_cookie());

    Ok((jar, StatusCode::NO_CONTENT))
}
