use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A constituent request for a municipal service (document issuance,
/// complaints, assistance and the like), tracked from submission to
/// resolution by the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub requester_name: String,
    pub contact_number: String,
    pub barangay: String,
    pub service_type: ServiceType,
    pub details: String,
    pub status: RequestStatus,
    pub staff_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    BarangayClearance,
    BusinessPermit,
    IndigencyCertificate,
    Complaint,
    Assistance,
    Other,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::BarangayClearance => "barangay_clearance",
            ServiceType::BusinessPermit => "business_permit",
            ServiceType::IndigencyCertificate => "indigency_certificate",
            ServiceType::Complaint => "complaint",
            ServiceType::Assistance => "assistance",
            ServiceType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "barangay_clearance" => Some(ServiceType::BarangayClearance),
            "business_permit" => Some(ServiceType::BusinessPermit),
            "indigency_certificate" => Some(ServiceType::IndigencyCertificate),
            "complaint" => Some(ServiceType::Complaint),
            "assistance" => Some(ServiceType::Assistance),
            "other" => Some(ServiceType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Resolved => "resolved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "in_progress" => Some(RequestStatus::InProgress),
            "resolved" => Some(RequestStatus::Resolved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceRequestRequest {
    #[validate(length(min = 2, max = 120))]
    pub requester_name: String,
    #[validate(length(min = 7, max = 20))]
    pub contact_number: String,
    #[validate(length(min = 2, max = 80))]
    pub barangay: String,
    pub service_type: ServiceType,
    #[validate(length(min = 10, max = 2000))]
    pub details: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequestStatusRequest {
    pub status: RequestStatus,
    pub staff_notes: Option<String>,
}
