use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A resident's request to be verified as a constituent of the municipality.
/// Approval flips the `verified` flag on the linked user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub barangay: String,
    pub id_document_type: String,
    pub id_document_number: String,
    pub status: VerificationStatus,
    pub reviewer_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VerificationStatus::Pending),
            "approved" => Some(VerificationStatus::Approved),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVerificationRequest {
    pub user_id: Uuid,
    #[validate(length(min = 2, max = 80))]
    pub barangay: String,
    #[validate(length(min = 2, max = 60))]
    pub id_document_type: String,
    #[validate(length(min = 4, max = 60))]
    pub id_document_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewVerificationRequest {
    pub approve: bool,
    pub reviewer_notes: Option<String>,
}
