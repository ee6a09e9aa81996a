use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{ReviewVerificationRequest, VerificationRequest, VerificationStatus},
    error::{AppError, Result},
    integrations::PortalEvent,
};

#[derive(Debug, Deserialize)]
pub struct ListVerificationsQuery {
    pub pending_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListVerificationsQuery>,
) -> Result<Json<Vec<VerificationRequest>>> {
    let requests = if params.pending_only.unwrap_or(false) {
        state.service_context.verification_repo.list_pending().await?
    } else {
        let limit = params.limit.unwrap_or(50).min(200);
        let offset = params.offset.unwrap_or(0);
        state
            .service_context
            .verification_repo
            .list(limit, offset)
            .await?
    };

    Ok(Json(requests))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VerificationRequest>> {
    let request = state
        .service_context
        .verification_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Verification request not found".to_string()))?;

    Ok(Json(request))
}

pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(reviewer): Extension<CurrentUser>,
    Json(request): Json<ReviewVerificationRequest>,
) -> Result<Json<VerificationRequest>> {
    let existing = state
        .service_context
        .verification_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Verification request not found".to_string()))?;

    if existing.status != VerificationStatus::Pending {
        return Err(AppError::Conflict(
            "Verification request has already been reviewed".to_string(),
        ));
    }

    let status = if request.approve {
        VerificationStatus::Approved
    } else {
        VerificationStatus::Rejected
    };

    let reviewed = state
        .service_context
        .verification_repo
        .review(id, status, reviewer.user.id, request.reviewer_notes)
        .await?;

    if status == VerificationStatus::Approved {
        state
            .service_context
            .user_repo
            .set_verified(reviewed.user_id, true)
            .await?;
    }

    state
        .service_context
        .integration_manager
        .handle_event(PortalEvent::VerificationReviewed(reviewed.clone()))
        .await;

    Ok(Json(reviewed))
}
