use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateServiceRequestRequest, RequestStatus, ServiceRequest, ServiceType},
    error::{AppError, Result},
    repository::ServiceRequestRepository,
};

#[derive(FromRow)]
struct ServiceRequestRow {
    id: String,
    requester_name: String,
    contact_number: String,
    barangay: String,
    service_type: String,
    details: String,
    status: String,
    staff_notes: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteServiceRequestRepository {
    pool: SqlitePool,
}

impl SqliteServiceRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: ServiceRequestRow) -> Result<ServiceRequest> {
        Ok(ServiceRequest {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            requester_name: row.requester_name,
            contact_number: row.contact_number,
            barangay: row.barangay,
            service_type: ServiceType::from_str(&row.service_type).ok_or_else(|| {
                AppError::Database(format!("Invalid service type: {}", row.service_type))
            })?,
            details: row.details,
            status: RequestStatus::from_str(&row.status).ok_or_else(|| {
                AppError::Database(format!("Invalid request status: {}", row.status))
            })?,
            staff_notes: row.staff_notes,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

const REQUEST_COLUMNS: &str = "id, requester_name, contact_number, barangay, service_type, \
                               details, status, staff_notes, created_at, updated_at";

#[async_trait]
impl ServiceRequestRepository for SqliteServiceRequestRepository {
    async fn create(&self, request: CreateServiceRequestRequest) -> Result<ServiceRequest> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO service_requests (
                id, requester_name, contact_number, barangay, service_type,
                details, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, 'pending', ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&request.requester_name)
        .bind(&request.contact_number)
        .bind(&request.barangay)
        .bind(request.service_type.as_str())
        .bind(&request.details)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created service request".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceRequest>> {
        let row = sqlx::query_as::<_, ServiceRequestRow>(&format!(
            "SELECT {} FROM service_requests WHERE id = ?",
            REQUEST_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_request(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ServiceRequest>> {
        let rows = sqlx::query_as::<_, ServiceRequestRow>(&format!(
            "SELECT {} FROM service_requests ORDER BY created_at DESC LIMIT ? OFFSET ?",
            REQUEST_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_request).collect()
    }

    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<ServiceRequest>> {
        let rows = sqlx::query_as::<_, ServiceRequestRow>(&format!(
            "SELECT {} FROM service_requests WHERE status = ? ORDER BY created_at ASC",
            REQUEST_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_request).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
        staff_notes: Option<String>,
    ) -> Result<ServiceRequest> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE service_requests
            SET status = ?, staff_notes = COALESCE(?, staff_notes), updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(&staff_notes)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated service request".to_string())
        })
    }

    async fn count_open(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM service_requests WHERE status IN ('pending', 'in_progress')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
