use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub name: String,
    pub dob: String,
    pub mobile: String,
    pub age: Option<i64>,
    pub gender: String,
    pub address: String,
    pub disease: String,
    #[serde(rename = "assignedDoctor")]
    pub assigned_doctor: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabReportsResponse {
    pub patient_id: String,
    pub patient_name: String,
    pub reports: Vec<Value>,
}

/// A prescription as the patient app shows it; `dateIssued` is the stored
/// `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionRecord {
    pub id: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub doctor_role: String,
    pub doctor_department: String,
    pub disease: String,
    pub status: String,
    pub date_issued: String,
    pub medications: Vec<Value>,
}

#[derive(Debug, Error)]
pub enum PatientError {
    #[error("Patient not found")]
    PatientNotFound,

    #[error("No lab reports found")]
    NoLabReports,

    #[error("No prescriptions found for this patient")]
    NoPrescriptions,

    #[error("No vitals found for this patient")]
    NoVitals,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for PatientError {
    fn from(err: StoreError) -> Self {
        PatientError::DatabaseError(err.to_string())
    }
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::DatabaseError(msg) => AppError::Database(msg),
            other => AppError::NotFound(other.to_string()),
        }
    }
}
