// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    AppointmentListQuery, CreateAppointmentRequest, TimeSlot, TimeSlotQuery, UpdateStatusRequest,
};
use crate::services::{AppointmentBookingService, AvailabilityService};

#[axum::debug_handler]
pub async fn get_time_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimeSlotQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let availability_service = AvailabilityService::new(state.store.clone());

    let slots = availability_service
        .get_time_slots(&query.doctor_id, &query.date)
        .await?;

    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(state.store.clone());

    let id = booking_service.book_appointment(request).await?;

    Ok(Json(json!({
        "detail": "Appointment booked successfully",
        "id": id
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(state.store.clone());

    let appointment = booking_service
        .update_status(&request.id, &request.status)
        .await?;

    Ok(Json(json!({
        "detail": "Appointment status updated",
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(state.store.clone());

    let appointment = booking_service.get_appointment(&appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(state.store.clone());

    let appointments = booking_service
        .list_doctor_appointments(&doctor_id, query)
        .await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(state.store.clone());

    let appointments = booking_service
        .list_patient_appointments(&patient_id)
        .await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}
