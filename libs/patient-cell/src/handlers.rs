use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{LabReportsResponse, PatientProfile, PrescriptionRecord};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn get_patient_profile(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientProfile>, AppError> {
    let service = PatientService::new(state.store.clone());

    let profile = service.get_profile(&patient_id).await?;

    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn get_lab_reports(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<LabReportsResponse>, AppError> {
    let service = PatientService::new(state.store.clone());

    let reports = service.get_lab_reports(&patient_id).await?;

    Ok(Json(reports))
}

#[axum::debug_handler]
pub async fn get_prescriptions(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<PrescriptionRecord>>, AppError> {
    let service = PatientService::new(state.store.clone());

    let prescriptions = service.get_prescriptions(&patient_id).await?;

    Ok(Json(prescriptions))
}

#[axum::debug_handler]
pub async fn get_latest_vitals(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(state.store.clone());

    let vitals = service.get_latest_vitals(&patient_id).await?;

    Ok(Json(vitals))
}

#[axum::debug_handler]
pub async fn get_all_vitals(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let service = PatientService::new(state.store.clone());

    let vitals = service.get_all_vitals(&patient_id).await?;

    Ok(Json(vitals))
}
