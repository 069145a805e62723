use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/save-prescriptions", post(handlers::save_prescription))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(state)
}
