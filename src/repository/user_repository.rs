use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    auth::AuthService,
    domain::{CreateUserRequest, UpdateUserRequest, User, UserRole},
    error::{AppError, Result},
    repository::UserRepository,
};

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    username: String,
    full_name: String,
    role: String,
    barangay: Option<String>,
    verified: i32,
    password_hash: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: UserRow) -> Result<User> {
        Ok(User {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            email: row.email,
            username: row.username,
            full_name: row.full_name,
            role: UserRole::from_str(&row.role)
                .ok_or_else(|| AppError::Database(format!("Invalid user role: {}", row.role)))?,
            barangay: row.barangay,
            verified: row.verified != 0,
            password_hash: row.password_hash,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

const USER_COLUMNS: &str = "id, email, username, full_name, role, barangay, verified, \
                            password_hash, created_at, updated_at";

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, request: CreateUserRequest) -> Result<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let password_hash = AuthService::hash_password(&request.password).await?;
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, username, full_name, role, barangay, verified,
                password_hash, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.email)
        .bind(&request.username)
        .bind(&request.full_name)
        .bind(request.role.as_str())
        .bind(&request.barangay)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created user".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    async fn update(&self, id: Uuid, update: UpdateUserRequest) -> Result<User> {
        let mut user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(barangay) = update.barangay {
            user.barangay = barangay;
        }
        if let Some(verified) = update.verified {
            user.verified = verified;
        }

        let now = Utc::now().naive_utc();
        let verified_int = if user.verified { 1i32 } else { 0i32 };

        sqlx::query(
            r#"
            UPDATE users
            SET full_name = ?, role = ?, barangay = ?, verified = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(&user.barangay)
        .bind(verified_int)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated user".to_string()))
    }

    async fn set_verified(&self, id: Uuid, verified: bool) -> Result<()> {
        let verified_int = if verified { 1i32 } else { 0i32 };
        let now = Utc::now().naive_utc();

        sqlx::query("UPDATE users SET verified = ?, updated_at = ? WHERE id = ?")
            .bind(verified_int)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
