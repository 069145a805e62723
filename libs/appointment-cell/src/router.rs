// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Scheduling engine
        .route("/timeslots", get(handlers::get_time_slots))
        .route("/create", post(handlers::create_appointment))
        .route("/status", put(handlers::update_appointment_status))

        // Listings
        .route("/doctor/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/patient/{patient_id}", get(handlers::get_patient_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))

        .with_state(state)
}
