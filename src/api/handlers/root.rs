use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Munisipyo API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Municipal content and constituent-services portal",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "auth": "/auth/login",
            "public": "/public",
            "admin": "/admin"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
