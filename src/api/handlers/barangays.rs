use axum::{extract::Path, Json};

use crate::{
    domain::{all_barangays, find_barangay, Barangay},
    error::{AppError, Result},
};

pub async fn list() -> Json<&'static [Barangay]> {
    Json(all_barangays())
}

pub async fn get(Path(slug): Path<String>) -> Result<Json<&'static Barangay>> {
    find_barangay(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Barangay not found".to_string()))
}
