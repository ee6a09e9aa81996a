use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreatePostRequest, Post, PostKind, PostStatus, Priority},
    error::{AppError, Result},
    repository::PostRepository,
};

#[derive(FromRow)]
struct PostRow {
    id: i64,
    uuid: Option<String>,
    title: String,
    content: String,
    image_url: Option<String>,
    kind: String,
    priority: String,
    status: String,
    category: Option<String>,
    location: Option<String>,
    event_date: Option<NaiveDate>,
    event_time: Option<String>,
    created_by: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: PostRow) -> Result<Post> {
        let uuid = match row.uuid {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|e| AppError::Database(e.to_string()))?),
            None => None,
        };

        Ok(Post {
            id: row.id,
            uuid,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            kind: PostKind::from_str(&row.kind)
                .ok_or_else(|| AppError::Database(format!("Invalid post kind: {}", row.kind)))?,
            // Unknown priorities degrade to normal rather than failing the row.
            priority: Priority::from_label(&row.priority),
            status: PostStatus::from_str(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid post status: {}", row.status)))?,
            category: row.category,
            location: row.location,
            event_date: row.event_date,
            event_time: row.event_time,
            created_by: Uuid::parse_str(&row.created_by)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

const POST_COLUMNS: &str = "id, uuid, title, content, image_url, kind, priority, status, \
                            category, location, event_date, event_time, created_by, \
                            created_at, updated_at";

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, request: CreatePostRequest, created_by: Uuid) -> Result<Post> {
        let uuid_str = Uuid::new_v4().to_string();
        let created_by_str = created_by.to_string();
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO posts (
                uuid, title, content, image_url, kind, priority, status,
                category, location, event_date, event_time, created_by,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&uuid_str)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.image_url)
        .bind(request.kind.as_str())
        .bind(request.priority.as_str())
        .bind(request.status.as_str())
        .bind(&request.category)
        .bind(&request.location)
        .bind(request.event_date)
        .bind(&request.event_time)
        .bind(&created_by_str)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created post".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts WHERE id = ?",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_post(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts ORDER BY created_at DESC LIMIT ? OFFSET ?",
            POST_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn list_by_kind(&self, kind: PostKind, limit: i64, offset: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts WHERE kind = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
            POST_COLUMNS
        ))
        .bind(kind.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn list_published(&self, kind: PostKind) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {} FROM posts
            WHERE kind = ? AND status = 'published'
            ORDER BY created_at DESC
            "#,
            POST_COLUMNS
        ))
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn update(&self, id: i64, post: Post) -> Result<Post> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, content = ?, image_url = ?, priority = ?, status = ?,
                category = ?, location = ?, event_date = ?, event_time = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.priority.as_str())
        .bind(post.status.as_str())
        .bind(&post.category)
        .bind(&post.location)
        .bind(post.event_date)
        .bind(&post.event_time)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated post".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn count_by_status(&self, status: PostStatus) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
