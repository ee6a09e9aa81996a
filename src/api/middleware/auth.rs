use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    api::state::AppState,
    domain::{User, UserRole},
    error::AppError,
};

#[derive(Clone)]
pub struct CurrentUser {
    pub user: User,
}

async fn authenticate(state: &AppState, jar: &CookieJar) -> Result<User, AppError> {
    let session_cookie = jar.get("session").ok_or(AppError::Unauthorized)?;

    let session = state
        .service_context
        .auth_service
        .validate_session(session_cookie.value())
        .await?
        .ok_or(AppError::Unauthorized)?;

    state
        .service_context
        .user_repo
        .find_by_id(session.user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, &jar).await?;

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

/// Content management: admins and municipal staff.
pub async fn require_staff(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, &jar).await?;

    if !user.role.can_manage_content() {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

/// User and account management: admins only.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, &jar).await?;

    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}
