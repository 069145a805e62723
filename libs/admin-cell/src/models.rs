// libs/admin-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

// ==============================================================================
// USER MASTER
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Patient,
    Doctor,
    Admin,
}

impl FromStr for UserType {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patient" => Ok(UserType::Patient),
            "doctor" => Ok(UserType::Doctor),
            "admin" => Ok(UserType::Admin),
            _ => Err(AdminError::InvalidUserType),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Patient => write!(f, "patient"),
            UserType::Doctor => write!(f, "doctor"),
            UserType::Admin => write!(f, "admin"),
        }
    }
}

fn default_active() -> String {
    "Active".to_string()
}

fn default_available() -> String {
    "Available".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_type: String,
    pub user_id: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub role_or_spec: Option<String>,
    pub contact: String,
    #[serde(default = "default_active")]
    pub status: String,
    #[serde(default)]
    pub time_slots: Vec<String>,
    /// Doctor working window on the 24-hour clock; slot generation falls
    /// back to 9..17 when absent.
    #[serde(default)]
    pub start_hour: Option<i64>,
    #[serde(default)]
    pub end_hour: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    pub patient_id: String,
    pub password: String,
    pub name: String,
    pub age: i64,
    pub dob: String,
    pub gender: String,
    pub mobile: String,
    pub address: String,
    pub disease: String,
    pub assigned_doctor: String,
    #[serde(default = "default_active")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStaffRequest {
    pub staff_id: String,
    pub name: String,
    pub password: String,
    pub role: String,
    pub department: String,
    pub shift: String,
    pub contact_number: String,
    #[serde(default = "default_available")]
    pub availability: String,
}

// ==============================================================================
// ADMISSIONS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdmissionRequest {
    pub patient_id: String,
    pub admission_type: String,
    pub ward: String,
    pub bed_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAssignmentRequest {
    pub admission_id: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub department: String,
    pub doctor_role: String,
    #[serde(default)]
    pub notes: Option<String>,
}

// ==============================================================================
// PHARMACY AND CLINICAL RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMedicineRequest {
    #[serde(default)]
    pub medicine_id: Option<String>,
    pub medicine_name: String,
    #[serde(default)]
    pub composition: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub batch_number: String,
    pub expiry_date: String,
    pub price: f64,
    pub stock_qty: i64,
    #[serde(default)]
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabReportRequest {
    pub patient_id: String,
    pub patient_name: String,
    pub test_name: String,
    pub technician: String,
    pub bp: String,
    pub blood_sugar: String,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub pulse: Option<String>,
    #[serde(default)]
    pub metrics: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub report_uploaded: bool,
}

/// `patient_id` may be the patient's user id or registered mobile number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVitalsRequest {
    pub patient_id: String,
    #[serde(default)]
    pub heart_rate: Option<i64>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub spo2: Option<i64>,
    #[serde(default)]
    pub respiration_rate: Option<i64>,
    #[serde(default)]
    pub blood_sugar: Option<i64>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Invalid user type")]
    InvalidUserType,

    #[error("User ID already exists")]
    UserIdExists,

    #[error("Doctor timeSlots are required")]
    TimeSlotsRequired,

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Patient already exists")]
    PatientExists,

    #[error("Staff ID already exists")]
    StaffExists,

    #[error("Medicine with this batch already exists")]
    MedicineBatchExists,

    #[error("Patient ID does not match admission")]
    PatientMismatch,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Admission not found")]
    AdmissionNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to update admission with doctor assignment")]
    AssignmentFailed,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for AdminError {
    fn from(err: StoreError) -> Self {
        AdminError::Database(err.to_string())
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::PatientNotFound | AdminError::AdmissionNotFound | AdminError::UserNotFound => {
                AppError::NotFound(err.to_string())
            }
            AdminError::AssignmentFailed => AppError::Internal(err.to_string()),
            AdminError::Database(msg) => AppError::Database(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}
