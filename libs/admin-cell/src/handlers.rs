// libs/admin-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    AddLabReportRequest, AddMedicineRequest, CreateAdmissionRequest, CreateUserRequest,
    DoctorAssignmentRequest, RegisterPatientRequest, RegisterStaffRequest, UpdateVitalsRequest,
};
use crate::services::{AdmissionService, ClinicalRecordService, PharmacyService, UserDirectoryService};

// ==============================================================================
// USERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<Value>, AppError> {
    let service = UserDirectoryService::new(state.store.clone());

    let label = request.user_type.clone();
    let user_id = request.user_id.clone();
    service.create_user(request).await?;

    Ok(Json(json!({
        "message": format!("{} created successfully", label),
        "user_id": user_id
    })))
}

#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = UserDirectoryService::new(state.store.clone());

    let patient_id = service.register_patient(request).await?;

    Ok(Json(json!({
        "message": "Patient registered successfully",
        "patientId": patient_id
    })))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = UserDirectoryService::new(state.store.clone());

    Ok(Json(service.get_patient_summary(&patient_id).await?))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = UserDirectoryService::new(state.store.clone());

    Ok(Json(service.get_user(&user_id).await?))
}

#[axum::debug_handler]
pub async fn register_staff(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterStaffRequest>,
) -> Result<Json<Value>, AppError> {
    let service = UserDirectoryService::new(state.store.clone());

    let staff_id = service.register_staff(request).await?;

    Ok(Json(json!({
        "message": "Staff registered successfully",
        "staffId": staff_id
    })))
}

// ==============================================================================
// ADMISSIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_admission(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAdmissionRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AdmissionService::new(state.store.clone());

    let admission_id = service.create_admission(request).await?;

    Ok(Json(json!({
        "message": "Admission created successfully",
        "admissionId": admission_id
    })))
}

#[axum::debug_handler]
pub async fn assign_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DoctorAssignmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AdmissionService::new(state.store.clone());

    service.assign_doctor(&request).await?;

    Ok(Json(json!({
        "message": "Doctor assigned successfully",
        "admissionId": request.admission_id,
        "patientId": request.patient_id
    })))
}

#[axum::debug_handler]
pub async fn get_admission(
    State(state): State<Arc<AppState>>,
    Path(admission_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AdmissionService::new(state.store.clone());

    Ok(Json(service.get_admission(&admission_id).await?))
}

// ==============================================================================
// PHARMACY AND CLINICAL RECORDS
// ==============================================================================

#[axum::debug_handler]
pub async fn add_medicine(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddMedicineRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PharmacyService::new(state.store.clone());

    let medicine_id = service.add_medicine(request).await?;

    Ok(Json(json!({
        "medicineId": medicine_id,
        "message": "Medicine added successfully"
    })))
}

#[axum::debug_handler]
pub async fn add_lab_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddLabReportRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ClinicalRecordService::new(state.store.clone());

    let report_id = service.add_lab_report(request).await?;

    Ok(Json(json!({
        "reportId": report_id,
        "message": "Lab report saved successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_vitals(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateVitalsRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ClinicalRecordService::new(state.store.clone());

    let patient_id = service.update_vitals(request).await?;

    Ok(Json(json!({
        "message": "Vitals updated successfully",
        "patient_id": patient_id
    })))
}
