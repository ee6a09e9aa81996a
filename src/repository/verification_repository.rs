use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateVerificationRequest, VerificationRequest, VerificationStatus},
    error::{AppError, Result},
    repository::VerificationRepository,
};

#[derive(FromRow)]
struct VerificationRow {
    id: String,
    user_id: String,
    barangay: String,
    id_document_type: String,
    id_document_number: String,
    status: String,
    reviewer_notes: Option<String>,
    reviewed_by: Option<String>,
    created_at: NaiveDateTime,
    reviewed_at: Option<NaiveDateTime>,
}

pub struct SqliteVerificationRepository {
    pool: SqlitePool,
}

impl SqliteVerificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: VerificationRow) -> Result<VerificationRequest> {
        let reviewed_by = match row.reviewed_by {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|e| AppError::Database(e.to_string()))?),
            None => None,
        };

        Ok(VerificationRequest {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id).map_err(|e| AppError::Database(e.to_string()))?,
            barangay: row.barangay,
            id_document_type: row.id_document_type,
            id_document_number: row.id_document_number,
            status: VerificationStatus::from_str(&row.status).ok_or_else(|| {
                AppError::Database(format!("Invalid verification status: {}", row.status))
            })?,
            reviewer_notes: row.reviewer_notes,
            reviewed_by,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            reviewed_at: row
                .reviewed_at
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
        })
    }
}

const VERIFICATION_COLUMNS: &str = "id, user_id, barangay, id_document_type, id_document_number, \
                                    status, reviewer_notes, reviewed_by, created_at, reviewed_at";

#[async_trait]
impl VerificationRepository for SqliteVerificationRepository {
    async fn create(&self, request: CreateVerificationRequest) -> Result<VerificationRequest> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO verification_requests (
                id, user_id, barangay, id_document_type, id_document_number,
                status, created_at
            ) VALUES (?, ?, ?, ?, ?, 'pending', ?)
            "#,
        )
        .bind(id.to_string())
        .bind(request.user_id.to_string())
        .bind(&request.barangay)
        .bind(&request.id_document_type)
        .bind(&request.id_document_number)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created verification request".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRequest>> {
        let row = sqlx::query_as::<_, VerificationRow>(&format!(
            "SELECT {} FROM verification_requests WHERE id = ?",
            VERIFICATION_COLUMNS
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

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<VerificationRequest>> {
        let rows = sqlx::query_as::<_, VerificationRow>(&format!(
            "SELECT {} FROM verification_requests ORDER BY created_at DESC LIMIT ? OFFSET ?",
            VERIFICATION_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_request).collect()
    }

    async fn list_pending(&self) -> Result<Vec<VerificationRequest>> {
        let rows = sqlx::query_as::<_, VerificationRow>(&format!(
            "SELECT {} FROM verification_requests WHERE status = 'pending' ORDER BY created_at ASC",
            VERIFICATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_request).collect()
    }

    async fn review(
        &self,
        id: Uuid,
        status: VerificationStatus,
        reviewed_by: Uuid,
        reviewer_notes: Option<String>,
    ) -> Result<VerificationRequest> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE verification_requests
            SET status = ?, reviewed_by = ?, reviewer_notes = ?, reviewed_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(reviewed_by.to_string())
        .bind(&reviewer_notes)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve reviewed verification request".to_string())
        })
    }

    async fn count_pending(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM verification_requests WHERE status = 'pending'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
