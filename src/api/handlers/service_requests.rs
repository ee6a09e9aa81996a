use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{RequestStatus, ServiceRequest, UpdateRequestStatusRequest},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListServiceRequestsQuery {
    pub status: Option<RequestStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListServiceRequestsQuery>,
) -> Result<Json<Vec<ServiceRequest>>> {
    let requests = match params.status {
        Some(status) => {
            state
                .service_context
                .service_request_repo
                .list_by_status(status)
                .await?
        }
        None => {
            let limit = params.limit.unwrap_or(50).min(200);
            let offset = params.offset.unwrap_or(0);
            state
                .service_context
                .service_request_repo
                .list(limit, offset)
                .await?
        }
    };

    Ok(Json(requests))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceRequest>> {
    let request = state
        .service_context
        .service_request_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service request not found".to_string()))?;

    Ok(Json(request))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRequestStatusRequest>,
) -> Result<Json<ServiceRequest>> {
    state
        .service_context
        .service_request_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service request not found".to_string()))?;

    let updated = state
        .service_context
        .service_request_repo
        .update_status(id, request.status, request.staff_notes)
        .await?;

    Ok(Json(updated))
}
