use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{CreatePostRequest, Post, PostKind, PostStatus, UpdatePostRequest},
    error::{AppError, Result},
    integrations::PortalEvent,
};

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub kind: Option<PostKind>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>> {
    let limit = params.limit.unwrap_or(50).min(200);
    let offset = params.offset.unwrap_or(0);

    let posts = match params.kind {
        Some(kind) => {
            state
                .service_context
                .post_repo
                .list_by_kind(kind, limit, offset)
                .await?
        }
        None => state.service_context.post_repo.list(limit, offset).await?,
    };

    Ok(Json(posts))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>> {
    let post = state
        .service_context
        .post_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let created = state
        .service_context
        .post_repo
        .create(request, user.user.id)
        .await?;

    // The public listing of this kind is now stale.
    state.service_context.invalidations.publish(created.kind);

    if created.is_published() {
        state
            .service_context
            .integration_manager
            .handle_event(PortalEvent::PostPublished(created.clone()))
            .await;
    }

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>> {
    let mut post = state
        .service_context
        .post_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let was_published = post.is_published();

    if let Some(title) = request.title {
        post.title = title;
    }
    if let Some(content) = request.content {
        post.content = content;
    }
    if let Some(priority) = request.priority {
        post.priority = priority;
    }
    if let Some(status) = request.status {
        post.status = status;
    }
    if let Some(image_url) = request.image_url {
        post.image_url = image_url;
    }
    if let Some(category) = request.category {
        post.category = category;
    }
    if let Some(location) = request.location {
        post.location = location;
    }
    if let Some(event_date) = request.event_date {
        post.event_date = event_date;
    }
    if let Some(event_time) = request.event_time {
        post.event_time = event_time;
    }

    let updated = state.service_context.post_repo.update(id, post).await?;

    state.service_context.invalidations.publish(updated.kind);

    match (was_published, updated.is_published()) {
        (false, true) => {
            state
                .service_context
                .integration_manager
                .handle_event(PortalEvent::PostPublished(updated.clone()))
                .await;
        }
        (true, false) => {
            state
                .service_context
                .integration_manager
                .handle_event(PortalEvent::PostUnpublished(updated.clone()))
                .await;
        }
        _ => {}
    }

    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let post = state
        .service_context
        .post_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    state.service_context.post_repo.delete(id).await?;

    state.service_context.invalidations.publish(post.kind);

    if post.status == PostStatus::Published {
        state
            .service_context
            .integration_manager
            .handle_event(PortalEvent::PostUnpublished(post))
            .await;
    }

    Ok(StatusCode::NO_CONTENT)
}
