use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use shared_database::{collections, Filter, RecordStore};
use shared_utils::documents::text_field;

use crate::models::{LabReportsResponse, PatientError, PatientProfile, PrescriptionRecord};

pub struct PatientService {
    store: Arc<dyn RecordStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_profile(&self, patient_id: &str) -> Result<PatientProfile, PatientError> {
        debug!("Fetching profile for patient {}", patient_id);

        let patient = self
            .store
            .find_one(collections::USERS, &Filter::new().eq("user_id", patient_id))
            .await?
            .ok_or(PatientError::PatientNotFound)?;

        Ok(to_profile(&patient))
    }

    pub async fn get_lab_reports(&self, patient_id: &str) -> Result<LabReportsResponse, PatientError> {
        let patient = self
            .store
            .find_one(
                collections::USERS,
                &Filter::new().eq("user_id", patient_id).eq("role", "patient"),
            )
            .await?
            .ok_or(PatientError::PatientNotFound)?;

        let reports = self
            .store
            .find_many(collections::LAB_REPORTS, &Filter::new().eq("patientId", patient_id))
            .await?;
        if reports.is_empty() {
            return Err(PatientError::NoLabReports);
        }

        Ok(LabReportsResponse {
            patient_id: patient_id.to_string(),
            patient_name: text_field(&patient, "name"),
            reports,
        })
    }

    pub async fn get_prescriptions(&self, patient_id: &str) -> Result<Vec<PrescriptionRecord>, PatientError> {
        let prescriptions: Vec<PrescriptionRecord> = self
            .store
            .find_many(collections::PRESCRIPTIONS, &Filter::new().eq("patientId", patient_id))
            .await?
            .iter()
            .map(to_prescription)
            .collect();

        if prescriptions.is_empty() {
            return Err(PatientError::NoPrescriptions);
        }
        Ok(prescriptions)
    }

    /// Newest first by `created_at`.
    pub async fn get_all_vitals(&self, patient_id: &str) -> Result<Vec<Value>, PatientError> {
        let mut vitals = self
            .store
            .find_many(collections::VITALS, &Filter::new().eq("patient_id", patient_id))
            .await?;

        if vitals.is_empty() {
            return Err(PatientError::NoVitals);
        }

        // RFC 3339 UTC stamps order correctly as text.
        vitals.sort_by(|a, b| text_field(b, "created_at").cmp(&text_field(a, "created_at")));
        Ok(vitals)
    }

    pub async fn get_latest_vitals(&self, patient_id: &str) -> Result<Value, PatientError> {
        self.get_all_vitals(patient_id)
            .await?
            .into_iter()
            .next()
            .ok_or(PatientError::NoVitals)
    }
}

fn to_profile(patient: &Value) -> PatientProfile {
    PatientProfile {
        id: text_field(patient, "id"),
        user_id: text_field(patient, "user_id"),
        role: text_field(patient, "role"),
        name: text_field(patient, "name"),
        dob: text_field(patient, "dob"),
        mobile: text_field(patient, "mobile"),
        age: patient.get("age").and_then(Value::as_i64),
        gender: text_field(patient, "gender"),
        address: text_field(patient, "address"),
        disease: text_field(patient, "disease"),
        assigned_doctor: text_field(patient, "assignedDoctor"),
        status: text_field(patient, "status"),
    }
}

fn to_prescription(document: &Value) -> PrescriptionRecord {
    let status = match text_field(document, "status") {
        s if s.is_empty() => "Current".to_string(),
        s => s,
    };

    PrescriptionRecord {
        id: text_field(document, "id"),
        patient_id: text_field(document, "patientId"),
        doctor_name: text_field(document, "doctorName"),
        doctor_role: text_field(document, "doctorRole"),
        doctor_department: text_field(document, "doctorDepartment"),
        disease: text_field(document, "disease"),
        status,
        date_issued: text_field(document, "timestamp"),
        medications: document
            .get("medications")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
    }
}
