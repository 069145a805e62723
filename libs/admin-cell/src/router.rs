// libs/admin-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // User master
        .route("/create-user", post(handlers::create_user))
        .route("/patient-register", post(handlers::register_patient))
        .route("/staff-register", post(handlers::register_staff))
        .route("/get-user/{user_id}", get(handlers::get_user))

        // Admissions
        .route("/admission-create", post(handlers::create_admission))
        .route("/doctor-department-assign", post(handlers::assign_doctor))
        .route("/admissions/{admission_id}", get(handlers::get_admission))

        // Pharmacy, lab and bedside records
        .route("/medicine-add", post(handlers::add_medicine))
        .route("/lab-report-add", post(handlers::add_lab_report))
        .route("/vitals/update", post(handlers::update_vitals))

        .route("/{patient_id}", get(handlers::get_patient))
        .with_state(state)
}
