use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use appointment_cell::models::{DEFAULT_END_HOUR, DEFAULT_START_HOUR};
use shared_database::{collections, Filter, RecordStore};
use shared_utils::documents::strip_private_fields;

use crate::models::{AdminError, CreateUserRequest, RegisterPatientRequest, RegisterStaffRequest, UserType};
use crate::services::{conflict_or, find_patient};

/// Accounts across the patient, doctor, admin and staff collections.
pub struct UserDirectoryService {
    store: Arc<dyn RecordStore>,
}

impl UserDirectoryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// First record holding `user_id` in users, doctors or admins, in that order.
    async fn find_any_user(&self, user_id: &str) -> Result<Option<Value>, AdminError> {
        let lookups = [
            (collections::USERS, "user_id"),
            (collections::DOCTORS, "doctorId"),
            (collections::ADMINS, "adminId"),
        ];

        for (collection, field) in lookups {
            if let Some(found) = self
                .store
                .find_one(collection, &Filter::new().eq(field, user_id))
                .await?
            {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserType, AdminError> {
        let user_type: UserType = request.user_type.parse()?;

        if self.find_any_user(&request.user_id).await?.is_some() {
            return Err(AdminError::UserIdExists);
        }

        let (collection, document) = match user_type {
            UserType::Admin => (
                collections::ADMINS,
                json!({
                    "adminId": request.user_id,
                    "password": request.password,
                    "name": request.name,
                    "role": request.role_or_spec.clone().unwrap_or_else(|| "Admin".to_string()),
                    "contact": request.contact,
                    "status": request.status,
                }),
            ),
            UserType::Doctor => {
                if request.time_slots.is_empty() {
                    return Err(AdminError::TimeSlotsRequired);
                }
                validate_working_hours(request.start_hour, request.end_hour)?;

                let mut doctor = Map::new();
                doctor.insert("doctorId".into(), json!(request.user_id));
                doctor.insert("role".into(), json!("doctor"));
                doctor.insert("password".into(), json!(request.password));
                doctor.insert("name".into(), json!(request.name));
                doctor.insert("roleOrSpec".into(), json!(request.role_or_spec));
                doctor.insert("contact".into(), json!(request.contact));
                doctor.insert("status".into(), json!(request.status));
                doctor.insert("timeSlots".into(), json!(request.time_slots));
                if let Some(start) = request.start_hour {
                    doctor.insert("startHour".into(), json!(start));
                }
                if let Some(end) = request.end_hour {
                    doctor.insert("endHour".into(), json!(end));
                }
                (collections::DOCTORS, Value::Object(doctor))
            }
            UserType::Patient => (
                collections::USERS,
                json!({
                    "user_id": request.user_id,
                    "role": "patient",
                    "password": request.password,
                    "name": request.name,
                    "roleOrSpec": request.role_or_spec,
                    "contact": request.contact,
                    "mobile": request.contact,
                    "status": request.status,
                }),
            ),
        };

        self.store
            .insert(collection, document)
            .await
            .map_err(|e| conflict_or(e, AdminError::UserIdExists))?;

        info!("Created {} {}", user_type, request.user_id);
        Ok(user_type)
    }

    pub async fn register_patient(&self, request: RegisterPatientRequest) -> Result<String, AdminError> {
        let existing = self
            .store
            .find_one(collections::USERS, &Filter::new().eq("user_id", request.patient_id.as_str()))
            .await?;
        if existing.is_some() {
            return Err(AdminError::PatientExists);
        }

        let document = json!({
            "user_id": request.patient_id,
            "role": "patient",
            "dob": request.dob,
            "password": request.password,
            "name": request.name,
            "age": request.age,
            "gender": request.gender,
            "mobile": request.mobile,
            "address": request.address,
            "disease": request.disease,
            "assignedDoctor": request.assigned_doctor,
            "status": request.status,
        });

        self.store
            .insert(collections::USERS, document)
            .await
            .map_err(|e| conflict_or(e, AdminError::PatientExists))?;

        info!("Registered patient {}", request.patient_id);
        Ok(request.patient_id)
    }

    pub async fn get_patient_summary(&self, patient_id: &str) -> Result<Value, AdminError> {
        let patient = find_patient(self.store.as_ref(), patient_id)
            .await?
            .ok_or(AdminError::PatientNotFound)?;

        let field = |name: &str| patient.get(name).cloned().unwrap_or(Value::Null);
        Ok(json!({
            "patientId": field("user_id"),
            "name": field("name"),
            "age": field("age"),
            "gender": field("gender"),
            "mobile": field("mobile"),
            "address": field("address"),
            "disease": field("disease"),
            "assignedDoctor": field("assignedDoctor"),
            "status": field("status"),
        }))
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Value, AdminError> {
        debug!("Looking up user {}", user_id);
        self.find_any_user(user_id)
            .await?
            .map(strip_private_fields)
            .ok_or(AdminError::UserNotFound)
    }

    pub async fn register_staff(&self, request: RegisterStaffRequest) -> Result<String, AdminError> {
        let existing = self
            .store
            .find_one(collections::STAFF, &Filter::new().eq("staffId", request.staff_id.as_str()))
            .await?;
        if existing.is_some() {
            return Err(AdminError::StaffExists);
        }

        let document = json!({
            "staffId": request.staff_id,
            "name": request.name,
            "password": request.password,
            "role": request.role,
            "department": request.department,
            "shift": request.shift,
            "contactNumber": request.contact_number,
            "availability": request.availability,
        });

        self.store
            .insert(collections::STAFF, document)
            .await
            .map_err(|e| conflict_or(e, AdminError::StaffExists))?;

        info!("Registered staff {}", request.staff_id);
        Ok(request.staff_id)
    }
}

/// `0 <= start < end <= 24`, with the scheduling defaults filling a missing bound.
fn validate_working_hours(start: Option<i64>, end: Option<i64>) -> Result<(), AdminError> {
    if start.is_none() && end.is_none() {
        return Ok(());
    }
    let start = start.unwrap_or(DEFAULT_START_HOUR);
    let end = end.unwrap_or(DEFAULT_END_HOUR);

    if !(0..=24).contains(&start) || !(0..=24).contains(&end) || start >= end {
        return Err(AdminError::InvalidWorkingHours(format!(
            "start {} and end {} must satisfy 0 <= start < end <= 24",
            start, end
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_hours_bounds() {
        assert!(validate_working_hours(None, None).is_ok());
        assert!(validate_working_hours(Some(8), Some(12)).is_ok());
        assert!(validate_working_hours(Some(0), Some(24)).is_ok());
        assert!(validate_working_hours(Some(12), None).is_ok());
        assert!(validate_working_hours(Some(18), None).is_err());
        assert!(validate_working_hours(Some(10), Some(10)).is_err());
        assert!(validate_working_hours(Some(-1), Some(5)).is_err());
        assert!(validate_working_hours(None, Some(25)).is_err());
    }
}
