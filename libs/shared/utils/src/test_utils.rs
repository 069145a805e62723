use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::{AppConfig, StoreBackend};
use shared_database::{collections, AppState, InMemoryStore, RecordStore};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_backend: StoreBackend::Memory,
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            ..AppConfig::default()
        }
    }

    /// Router state over a fresh in-memory store with the production indexes.
    pub fn to_state(&self) -> (Arc<AppState>, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::with_default_indexes());
        let state = AppState::new(self.to_app_config(), store.clone());
        (Arc::new(state), store)
    }
}

pub struct MockRecords;

impl MockRecords {
    pub fn doctor(doctor_id: &str) -> Value {
        json!({
            "doctorId": doctor_id,
            "role": "doctor",
            "password": "doctor-pass",
            "name": "Dr. Meera Iyer",
            "roleOrSpec": " Cardiology ",
            "contact": "9000000001",
            "status": "Active",
            "timeSlots": ["09:00 AM", "10:00 AM"]
        })
    }

    pub fn doctor_with_hours(doctor_id: &str, start_hour: i64, end_hour: i64) -> Value {
        let mut doctor = Self::doctor(doctor_id);
        doctor["startHour"] = json!(start_hour);
        doctor["endHour"] = json!(end_hour);
        doctor
    }

    pub fn patient(patient_id: &str) -> Value {
        json!({
            "user_id": patient_id,
            "role": "patient",
            "dob": "1990-04-12",
            "password": "patient-pass",
            "name": "Ravi Kumar",
            "age": 35,
            "gender": "Male",
            "mobile": "9876543210",
            "address": "12 Lake Road",
            "disease": "Hypertension",
            "assignedDoctor": "DOC-1",
            "status": "Active"
        })
    }

    pub fn appointment(doctor_id: &str, patient_id: &str, date: &str, time: &str) -> Value {
        json!({
            "doctor_id": doctor_id,
            "patient_id": patient_id,
            "date": date,
            "time": time,
            "reason": "Routine checkup",
            "mobilenumber": "9876543210",
            "status": "Pending"
        })
    }
}

pub struct TestFixtures;

impl TestFixtures {
    pub async fn seed(store: &dyn RecordStore, collection: &str, document: Value) -> String {
        store
            .insert(collection, document)
            .await
            .expect("seeding the test store should succeed")
    }

    pub async fn seed_doctor(store: &dyn RecordStore, doctor_id: &str) -> String {
        Self::seed(store, collections::DOCTORS, MockRecords::doctor(doctor_id)).await
    }

    pub async fn seed_patient(store: &dyn RecordStore, patient_id: &str) -> String {
        Self::seed(store, collections::USERS, MockRecords::patient(patient_id)).await
    }
}
