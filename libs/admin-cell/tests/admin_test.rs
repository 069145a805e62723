use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use admin_cell::models::*;
use admin_cell::router::admin_routes;
use admin_cell::services::{AdmissionService, ClinicalRecordService, PharmacyService, UserDirectoryService};
use patient_cell::services::PatientService;
use shared_database::{collections, Filter, InMemoryStore, RecordStore};
use shared_utils::test_utils::{MockRecords, TestConfig, TestFixtures};

const PATIENT_ID: &str = "PID-100200";

fn create_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::with_default_indexes())
}

fn doctor_request(user_id: &str) -> CreateUserRequest {
    serde_json::from_value(json!({
        "userType": "Doctor",
        "userId": user_id,
        "password": "pw",
        "name": "Dr. Meera Iyer",
        "roleOrSpec": "Cardiology",
        "contact": "9000000001",
        "timeSlots": ["09:00 AM", "10:00 AM"]
    }))
    .unwrap()
}

fn admission_request(patient_id: &str) -> CreateAdmissionRequest {
    CreateAdmissionRequest {
        patient_id: patient_id.to_string(),
        admission_type: "Emergency".to_string(),
        ward: "ICU".to_string(),
        bed_number: "B-12".to_string(),
    }
}

fn medicine_request(name: &str, batch: &str) -> AddMedicineRequest {
    serde_json::from_value(json!({
        "medicineName": name,
        "batchNumber": batch,
        "expiryDate": "2026-12-31",
        "price": 12.5,
        "stockQty": 200
    }))
    .unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_create_user_per_type_and_duplicate_ids() {
    let store = create_store();
    let service = UserDirectoryService::new(store.clone());

    assert_eq!(service.create_user(doctor_request("U-1")).await.unwrap(), UserType::Doctor);

    // The id space is shared across patients, doctors and admins.
    let mut admin: CreateUserRequest = doctor_request("U-1");
    admin.user_type = "admin".to_string();
    assert_matches!(service.create_user(admin).await, Err(AdminError::UserIdExists));

    let mut nurse = doctor_request("U-2");
    nurse.user_type = "nurse".to_string();
    assert_matches!(service.create_user(nurse).await, Err(AdminError::InvalidUserType));

    let mut no_slots = doctor_request("U-3");
    no_slots.time_slots.clear();
    assert_matches!(service.create_user(no_slots).await, Err(AdminError::TimeSlotsRequired));

    let user = service.get_user("U-1").await.unwrap();
    assert_eq!(user["doctorId"], "U-1");
    assert!(user.get("password").is_none());
    assert_matches!(service.get_user("U-9").await, Err(AdminError::UserNotFound));
}

#[tokio::test]
async fn test_doctor_working_hours_are_stored_and_validated() {
    let store = create_store();
    let service = UserDirectoryService::new(store.clone());

    let mut early = doctor_request("DOC-E");
    early.start_hour = Some(6);
    early.end_hour = Some(10);
    service.create_user(early).await.unwrap();

    let stored = store
        .find_one(collections::DOCTORS, &Filter::new().eq("doctorId", "DOC-E"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["startHour"], 6);
    assert_eq!(stored["endHour"], 10);

    let mut inverted = doctor_request("DOC-X");
    inverted.start_hour = Some(15);
    inverted.end_hour = Some(11);
    assert_matches!(service.create_user(inverted).await, Err(AdminError::InvalidWorkingHours(_)));
}

#[tokio::test]
async fn test_admissions_flow() {
    let store = create_store();
    TestFixtures::seed_patient(store.as_ref(), PATIENT_ID).await;
    let service = AdmissionService::new(store.clone());

    assert_matches!(
        service.create_admission(admission_request("PID-0")).await,
        Err(AdminError::PatientNotFound)
    );

    let first = service.create_admission(admission_request(PATIENT_ID)).await.unwrap();
    let second = service.create_admission(admission_request(PATIENT_ID)).await.unwrap();
    assert_eq!(first, "ADM-100001");
    assert_eq!(second, "ADM-100002");

    let mismatch = DoctorAssignmentRequest {
        admission_id: first.clone(),
        patient_id: "PID-0".to_string(),
        doctor_name: "Dr. Rao".to_string(),
        department: "Cardiology".to_string(),
        doctor_role: "Consultant".to_string(),
        notes: None,
    };
    assert_matches!(service.assign_doctor(&mismatch).await, Err(AdminError::PatientMismatch));

    let assignment = DoctorAssignmentRequest {
        patient_id: PATIENT_ID.to_string(),
        notes: Some("Monitor overnight".to_string()),
        ..mismatch
    };
    service.assign_doctor(&assignment).await.unwrap();

    let admission = service.get_admission(&first).await.unwrap();
    assert_eq!(admission["patientName"], "Ravi Kumar");
    assert_eq!(admission["doctorName"], "Dr. Rao");
    assert_eq!(admission["notes"], "Monitor overnight");
    assert!(admission["admissionDateTime"].is_string());

    let unknown = DoctorAssignmentRequest {
        admission_id: "ADM-1".to_string(),
        ..assignment
    };
    assert_matches!(service.assign_doctor(&unknown).await, Err(AdminError::AdmissionNotFound));
}

#[tokio::test]
async fn test_medicine_ids_and_batch_uniqueness() {
    let store = create_store();
    let service = PharmacyService::new(store.clone());

    assert_eq!(service.add_medicine(medicine_request("Paracetamol", "B1")).await.unwrap(), "MED-1001");
    assert_eq!(service.add_medicine(medicine_request("Paracetamol", "B2")).await.unwrap(), "MED-1002");

    let mut explicit = medicine_request("Ibuprofen", "B1");
    explicit.medicine_id = Some("IBU-7".to_string());
    assert_eq!(service.add_medicine(explicit).await.unwrap(), "IBU-7");

    assert_matches!(
        service.add_medicine(medicine_request("Paracetamol", "B1")).await,
        Err(AdminError::MedicineBatchExists)
    );
    assert_eq!(store.count(collections::PHARMACY, &Filter::new()).await.unwrap(), 3);
}

#[tokio::test]
async fn test_concurrent_staff_registration_admits_one() {
    let store = create_store();

    let attempts = (0..5).map(|i| {
        let service = UserDirectoryService::new(store.clone());
        let request: RegisterStaffRequest = serde_json::from_value(json!({
            "staffId": "ST-1",
            "name": format!("Nurse {}", i),
            "password": "pw",
            "role": "Nurse",
            "department": "ICU",
            "shift": "Night",
            "contactNumber": "9000000002"
        }))
        .unwrap();
        async move { service.register_staff(request).await }
    });
    let results = futures::future::join_all(attempts).await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, AdminError::StaffExists)));
}

#[tokio::test]
async fn test_lab_reports_and_vitals_require_a_patient() {
    let store = create_store();
    TestFixtures::seed_patient(store.as_ref(), PATIENT_ID).await;
    let service = ClinicalRecordService::new(store.clone());

    let report: AddLabReportRequest = serde_json::from_value(json!({
        "patientId": PATIENT_ID,
        "patientName": "Ravi Kumar",
        "testName": "CBC",
        "technician": "Anil",
        "bp": "120/80",
        "bloodSugar": "110"
    }))
    .unwrap();
    assert_eq!(service.add_lab_report(report.clone()).await.unwrap(), "LAB-1001");

    let stranger = AddLabReportRequest {
        patient_id: "PID-0".to_string(),
        ..report
    };
    assert_matches!(service.add_lab_report(stranger).await, Err(AdminError::PatientNotFound));

    // Vitals accept the registered mobile number and resolve it to the user id.
    let by_mobile = UpdateVitalsRequest {
        patient_id: "9876543210".to_string(),
        heart_rate: Some(72),
        blood_pressure: Some("118/76".to_string()),
        temperature: Some(98.4),
        spo2: Some(99),
        respiration_rate: None,
        blood_sugar: None,
    };
    assert_eq!(service.update_vitals(by_mobile.clone()).await.unwrap(), PATIENT_ID);

    let unknown = UpdateVitalsRequest {
        patient_id: "0000000000".to_string(),
        ..by_mobile
    };
    assert_matches!(service.update_vitals(unknown).await, Err(AdminError::PatientNotFound));

    let stored = store
        .find_many(collections::VITALS, &Filter::new().eq("patient_id", PATIENT_ID))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_vitals_recorded_by_mobile_are_readable_by_user_id() {
    let store = create_store();
    TestFixtures::seed_patient(store.as_ref(), PATIENT_ID).await;
    let clinical = ClinicalRecordService::new(store.clone());
    let patients = PatientService::new(store.clone());

    let reading = UpdateVitalsRequest {
        patient_id: "9876543210".to_string(),
        heart_rate: Some(72),
        blood_pressure: None,
        temperature: None,
        spo2: None,
        respiration_rate: None,
        blood_sugar: None,
    };
    clinical.update_vitals(reading).await.unwrap();

    let latest = patients.get_latest_vitals(PATIENT_ID).await.unwrap();
    assert_eq!(latest["patient_id"], PATIENT_ID);
    assert_eq!(latest["heart_rate"], 72);
    assert_eq!(patients.get_all_vitals(PATIENT_ID).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_routes() {
    let (state, store) = TestConfig::default().to_state();
    let app = admin_routes(state);

    let (status, body) = send(
        app.clone(),
        "POST",
        "/patient-register",
        Some(json!({
            "patientId": PATIENT_ID,
            "password": "pw",
            "name": "Ravi Kumar",
            "age": 35,
            "dob": "1990-04-12",
            "gender": "Male",
            "mobile": "9876543210",
            "address": "12 Lake Road",
            "disease": "Hypertension",
            "assignedDoctor": "DOC-1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Patient registered successfully", "patientId": PATIENT_ID}));

    let mut again = MockRecords::patient(PATIENT_ID);
    again["patientId"] = json!(PATIENT_ID);
    let (status, body) = send(app.clone(), "POST", "/patient-register", Some(again)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Patient already exists");

    let (status, summary) = send(app.clone(), "GET", &format!("/{}", PATIENT_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["patientId"], PATIENT_ID);
    assert_eq!(summary["status"], "Active");

    let (status, body) = send(
        app.clone(),
        "POST",
        "/admission-create",
        Some(json!({"patientId": PATIENT_ID, "admissionType": "Planned", "ward": "W2", "bedNumber": "4"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admissionId"], "ADM-100001");

    let (status, admission) = send(app.clone(), "GET", "/admissions/ADM-100001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admission["ward"], "W2");

    let (status, body) = send(
        app.clone(),
        "POST",
        "/create-user",
        Some(json!({"userType": "Admin", "userId": PATIENT_ID, "password": "pw", "name": "X", "contact": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID already exists");

    let (status, body) = send(
        app.clone(),
        "POST",
        "/create-user",
        Some(json!({"userType": "Admin", "userId": "ADM-ROOT", "password": "pw", "name": "Root", "contact": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Admin created successfully", "user_id": "ADM-ROOT"}));

    let (status, user) = send(app.clone(), "GET", "/get-user/ADM-ROOT", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "Admin");
    assert!(user.get("password").is_none());

    let (status, body) = send(app, "GET", "/PID-0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Patient not found");

    assert_eq!(store.count(collections::USERS, &Filter::new()).await.unwrap(), 1);
}
