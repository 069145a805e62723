use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use shared_database::{collections, Filter, RecordStore};
use shared_utils::documents::text_field;

use crate::models::{AddLabReportRequest, AdminError, UpdateVitalsRequest};
use crate::services::{find_patient, insert_with_sequential_id, to_document};

/// Lab reports and bedside vitals recorded against a patient.
pub struct ClinicalRecordService {
    store: Arc<dyn RecordStore>,
}

impl ClinicalRecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn add_lab_report(&self, request: AddLabReportRequest) -> Result<String, AdminError> {
        if find_patient(self.store.as_ref(), &request.patient_id).await?.is_none() {
            return Err(AdminError::PatientNotFound);
        }

        let mut document = to_document(&request)?;
        document.insert("createdAt".into(), json!(Utc::now().to_rfc3339()));

        let report_id = insert_with_sequential_id(
            self.store.as_ref(),
            collections::LAB_REPORTS,
            "reportId",
            "LAB",
            1000,
            document,
        )
        .await?;

        info!("Saved lab report {} ({}) for {}", report_id, request.test_name, request.patient_id);
        Ok(report_id)
    }

    /// Append a vitals reading. The patient may be named by user id or mobile;
    /// the stored reading always carries the patient's user id.
    pub async fn update_vitals(&self, request: UpdateVitalsRequest) -> Result<String, AdminError> {
        let by_id = Filter::new().eq("user_id", request.patient_id.as_str());
        let by_mobile = Filter::new().eq("mobile", request.patient_id.as_str());

        let patient = match self.store.find_one(collections::USERS, &by_id).await? {
            Some(patient) => Some(patient),
            None => self.store.find_one(collections::USERS, &by_mobile).await?,
        };
        let Some(patient) = patient else {
            warn!("Vitals submitted for unknown patient {}", request.patient_id);
            return Err(AdminError::PatientNotFound);
        };

        let patient_id = text_field(&patient, "user_id");
        if patient_id.is_empty() {
            warn!("Patient matching {} has no user_id", request.patient_id);
            return Err(AdminError::PatientNotFound);
        }

        let mut document = to_document(&request)?;
        document.insert("patient_id".into(), json!(patient_id));
        document.insert("created_at".into(), json!(Utc::now().to_rfc3339()));

        self.store
            .insert(collections::VITALS, serde_json::Value::Object(document))
            .await?;

        info!("Recorded vitals for {} (submitted as {})", patient_id, request.patient_id);
        Ok(patient_id)
    }
}
