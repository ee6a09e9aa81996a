use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub barangay: Option<String>,
    pub verified: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
    Resident,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::Resident => "resident",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "staff" => Some(UserRole::Staff),
            "resident" => Some(UserRole::Resident),
            _ => None,
        }
    }

    pub fn can_manage_content(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Staff)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
    pub barangay: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub barangay: Option<Option<String>>,
    pub verified: Option<bool>,
}
