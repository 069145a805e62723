use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{DoctorSummary, PrescriptionPayload};
use crate::services::{DoctorService, PrescriptionService};

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DoctorSummary>>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let doctors = doctor_service
        .list_doctors()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let doctor = doctor_service
        .get_doctor(&doctor_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn save_prescription(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PrescriptionPayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let prescription_service = PrescriptionService::new(state.store.clone());

    let id = prescription_service
        .save_prescription(payload)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "message": "Prescription saved successfully",
        "id": id
    })))
}
