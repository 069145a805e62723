use serde::{Deserialize, Serialize};

// ==============================================================================
// DOCTOR DIRECTORY
// ==============================================================================

/// Directory entry shown to patients picking a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorSummary {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub contact: String,
    pub status: String,
    #[serde(rename = "timeSlots")]
    pub time_slots: Vec<String>,
}

// ==============================================================================
// PRESCRIPTIONS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage_morning: String,
    pub dosage_afternoon: String,
    pub dosage_night: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionPayload {
    pub doctor_name: String,
    pub doctor_role: String,
    pub doctor_department: String,
    pub patient_id: String,
    pub patient_name: String,
    pub disease: String,
    pub medications: Vec<Medication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

pub const DEFAULT_PRESCRIPTION_STATUS: &str = "Current";

impl PrescriptionPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.patient_id.trim().is_empty() {
            return Err("patientId is required".to_string());
        }
        if self.doctor_name.trim().is_empty() {
            return Err("doctorName is required".to_string());
        }
        if let Some(unnamed) = self.medications.iter().position(|m| m.name.trim().is_empty()) {
            return Err(format!("medication #{} has no name", unnamed + 1));
        }
        Ok(())
    }
}
