// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use shared_database::StoreError;
use shared_models::error::AppError;

// ==============================================================================
// DOCTOR SCHEDULE (read-only view of a doctor record)
// ==============================================================================

pub const DEFAULT_START_HOUR: i64 = 9;
pub const DEFAULT_END_HOUR: i64 = 17;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StoredDoctor")]
pub struct DoctorSchedule {
    #[serde(rename = "doctorId")]
    pub doctor_id: String,
    #[serde(rename = "startHour")]
    pub start_hour: Option<i64>,
    #[serde(rename = "endHour")]
    pub end_hour: Option<i64>,
}

/// Doctor records may carry `startHour`, `start_hour`, or both; the
/// camelCase key wins when both are set.
#[derive(Deserialize)]
struct StoredDoctor {
    #[serde(rename = "doctorId")]
    doctor_id: String,
    #[serde(default, rename = "startHour")]
    start_hour: Option<i64>,
    #[serde(default, rename = "start_hour")]
    start_hour_snake: Option<i64>,
    #[serde(default, rename = "endHour")]
    end_hour: Option<i64>,
    #[serde(default, rename = "end_hour")]
    end_hour_snake: Option<i64>,
}

impl From<StoredDoctor> for DoctorSchedule {
    fn from(stored: StoredDoctor) -> Self {
        Self {
            doctor_id: stored.doctor_id,
            start_hour: stored.start_hour.or(stored.start_hour_snake),
            end_hour: stored.end_hour.or(stored.end_hour_snake),
        }
    }
}

impl DoctorSchedule {
    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours {
            start_hour: self.start_hour.unwrap_or(DEFAULT_START_HOUR),
            end_hour: self.end_hour.unwrap_or(DEFAULT_END_HOUR),
        }
    }
}

/// Half-open window `[start_hour, end_hour)` on the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start_hour: i64,
    pub end_hour: i64,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub date: String,
    /// Slot label, e.g. `"09:00 AM"`.
    pub time: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub mobilenumber: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Operator-set label. `Pending` and `Completed` are the known values; any
/// other string is carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Completed,
    Other(String),
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            s if s.eq_ignore_ascii_case("pending") => AppointmentStatus::Pending,
            s if s.eq_ignore_ascii_case("completed") => AppointmentStatus::Completed,
            s => AppointmentStatus::Other(s.to_string()),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(value: &str) -> Self {
        AppointmentStatus::from(value.to_string())
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "Pending"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Other(label) => write!(f, "{}", label),
        }
    }
}

/// Derived per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: String,
    pub time: String,
    pub available: bool,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub mobilenumber: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeSlotQuery {
    pub doctor_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentListQuery {
    pub date: Option<String>,
    pub status: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Time slot already booked")]
    AlreadyBooked,

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Time slot '{time}' is not offered by this doctor")]
    SlotNotOffered { time: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for AppointmentError {
    fn from(err: StoreError) -> Self {
        AppointmentError::DatabaseError(err.to_string())
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound | AppointmentError::DoctorNotFound => {
                AppError::NotFound(err.to_string())
            }
            AppointmentError::AlreadyBooked => AppError::BadRequest(err.to_string()),
            AppointmentError::InvalidDate(_)
            | AppointmentError::SlotNotOffered { .. }
            | AppointmentError::ValidationError(_) => AppError::ValidationError(err.to_string()),
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}
