use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    api::state::AppState,
    domain::PostStatus,
    error::Result,
};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub published_posts: i64,
    pub draft_posts: i64,
    pub users: i64,
    pub pending_verifications: i64,
    pub open_service_requests: i64,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let ctx = &state.service_context;

    let published_posts = ctx.post_repo.count_by_status(PostStatus::Published).await?;
    let draft_posts = ctx.post_repo.count_by_status(PostStatus::Draft).await?;
    let users = ctx.user_repo.count().await?;
    let pending_verifications = ctx.verification_repo.count_pending().await?;
    let open_service_requests = ctx.service_request_repo.count_open().await?;

    Ok(Json(DashboardStats {
        published_posts,
        draft_posts,
        users,
        pending_verifications,
        open_service_requests,
    }))
}
