use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::AppState;

use crate::handlers;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lab-reports/{patient_id}", get(handlers::get_lab_reports))
        .route("/prescriptions/{patient_id}", get(handlers::get_prescriptions))
        .route("/vitals/all/{patient_id}", get(handlers::get_all_vitals))
        .route("/vitals/{patient_id}", get(handlers::get_latest_vitals))
        .route("/{patient_id}", get(handlers::get_patient_profile))
        .with_state(state)
}
