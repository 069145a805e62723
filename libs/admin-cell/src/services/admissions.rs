use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::info;

use shared_database::{collections, Filter, RecordStore};
use shared_utils::documents::text_field;

use crate::models::{AdminError, CreateAdmissionRequest, DoctorAssignmentRequest};
use crate::services::{find_patient, insert_with_sequential_id};

const ADMISSION_PREFIX: &str = "ADM";
const ADMISSION_BASE: u64 = 100_000;

pub struct AdmissionService {
    store: Arc<dyn RecordStore>,
}

impl AdmissionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_admission(&self, request: CreateAdmissionRequest) -> Result<String, AdminError> {
        let patient = find_patient(self.store.as_ref(), &request.patient_id)
            .await?
            .ok_or(AdminError::PatientNotFound)?;

        let mut document = Map::new();
        document.insert("patientId".into(), json!(request.patient_id));
        document.insert("patientName".into(), json!(text_field(&patient, "name")));
        document.insert("admissionType".into(), json!(request.admission_type));
        document.insert("ward".into(), json!(request.ward));
        document.insert("bedNumber".into(), json!(request.bed_number));
        document.insert("admissionDateTime".into(), json!(Utc::now().to_rfc3339()));

        let admission_id = insert_with_sequential_id(
            self.store.as_ref(),
            collections::ADMISSIONS,
            "admissionId",
            ADMISSION_PREFIX,
            ADMISSION_BASE,
            document,
        )
        .await?;

        info!("Admitted patient {} as {}", request.patient_id, admission_id);
        Ok(admission_id)
    }

    pub async fn assign_doctor(&self, request: &DoctorAssignmentRequest) -> Result<(), AdminError> {
        let filter = Filter::new().eq("admissionId", request.admission_id.as_str());

        let admission = self
            .store
            .find_one(collections::ADMISSIONS, &filter)
            .await?
            .ok_or(AdminError::AdmissionNotFound)?;

        if text_field(&admission, "patientId") != request.patient_id {
            return Err(AdminError::PatientMismatch);
        }

        let mut patch = Map::new();
        patch.insert("doctorName".into(), json!(request.doctor_name));
        patch.insert("department".into(), json!(request.department));
        patch.insert("doctorRole".into(), json!(request.doctor_role));
        if let Some(notes) = &request.notes {
            patch.insert("notes".into(), json!(notes));
        }

        self.store
            .update_one(collections::ADMISSIONS, &filter, Value::Object(patch))
            .await?
            .ok_or(AdminError::AssignmentFailed)?;

        info!("Assigned {} to admission {}", request.doctor_name, request.admission_id);
        Ok(())
    }

    pub async fn get_admission(&self, admission_id: &str) -> Result<Value, AdminError> {
        self.store
            .find_one(collections::ADMISSIONS, &Filter::new().eq("admissionId", admission_id))
            .await?
            .ok_or(AdminError::AdmissionNotFound)
    }
}
