// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use shared_database::{Filter, RecordStore};

use crate::models::{
    Appointment, AppointmentError, AppointmentListQuery, AppointmentStatus,
    CreateAppointmentRequest,
};
use crate::services::repository::AppointmentRepository;
use crate::services::slots::{ensure_canonical_date, slot_hour};

pub struct AppointmentBookingService {
    repository: AppointmentRepository,
}

impl AppointmentBookingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repository: AppointmentRepository::new(store),
        }
    }

    /// Book one slot. Returns the new appointment id.
    ///
    /// The pre-insert lookup gives the common case a clean answer; the
    /// store's unique index on `(doctor_id, date, time)` settles races.
    pub async fn book_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<String, AppointmentError> {
        info!("Booking {} on {} with doctor {} for patient {}",
              request.time, request.date, request.doctor_id, request.patient_id);

        validate_booking_request(&request)?;

        let doctor = self
            .repository
            .find_doctor(&request.doctor_id)
            .await?
            .ok_or(AppointmentError::DoctorNotFound)?;

        if !doctor.working_hours().slot_labels().contains(&request.time) {
            warn!("Doctor {} does not offer slot '{}'", request.doctor_id, request.time);
            return Err(AppointmentError::SlotNotOffered { time: request.time });
        }

        if self
            .repository
            .find_appointment(&request.doctor_id, &request.date, &request.time)
            .await?
            .is_some()
        {
            warn!("Slot {} on {} already booked for doctor {}",
                  request.time, request.date, request.doctor_id);
            return Err(AppointmentError::AlreadyBooked);
        }

        let status = request
            .status
            .filter(|s| !s.trim().is_empty())
            .map(AppointmentStatus::from)
            .unwrap_or_default();

        let document = json!({
            "doctor_id": request.doctor_id,
            "patient_id": request.patient_id,
            "date": request.date,
            "time": request.time,
            "reason": request.reason,
            "mobilenumber": request.mobilenumber,
            "status": status,
        });

        let id = self
            .repository
            .insert_appointment(document)
            .await
            .map_err(|e| {
                if e.is_duplicate() {
                    warn!("Lost booking race for {} on {} with doctor {}",
                          request.time, request.date, request.doctor_id);
                    AppointmentError::AlreadyBooked
                } else {
                    AppointmentError::from(e)
                }
            })?;

        info!("Appointment {} booked", id);
        Ok(id)
    }

    /// Overwrite the status unconditionally; no transition table applies.
    pub async fn update_status(
        &self,
        appointment_id: &str,
        status: &str,
    ) -> Result<Appointment, AppointmentError> {
        if status.trim().is_empty() {
            return Err(AppointmentError::ValidationError("status must not be empty".to_string()));
        }
        let status = AppointmentStatus::from(status);

        let updated = self
            .repository
            .update_appointment_status(appointment_id, &status)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} is now {}", appointment_id, updated.status);
        Ok(updated)
    }

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.repository
            .find_appointment_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn list_doctor_appointments(
        &self,
        doctor_id: &str,
        query: AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Listing appointments for doctor {} with {:?}", doctor_id, query);

        let mut filter = Filter::new().eq("doctor_id", doctor_id);
        if let Some(date) = query.date {
            filter = filter.eq("date", date);
        }
        let wanted_status = query.status.map(AppointmentStatus::from);

        let mut appointments: Vec<Appointment> = self
            .repository
            .find_by(&filter)
            .await?
            .into_iter()
            .filter(|a| wanted_status.as_ref().map_or(true, |s| &a.status == s))
            .collect();

        sort_chronologically(&mut appointments);
        Ok(appointments)
    }

    pub async fn list_patient_appointments(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Listing appointments for patient {}", patient_id);

        let mut appointments = self
            .repository
            .find_by(&Filter::new().eq("patient_id", patient_id))
            .await?;

        sort_chronologically(&mut appointments);
        Ok(appointments)
    }
}

fn validate_booking_request(request: &CreateAppointmentRequest) -> Result<(), AppointmentError> {
    if request.doctor_id.trim().is_empty() {
        return Err(AppointmentError::ValidationError("doctor_id is required".to_string()));
    }
    if request.patient_id.trim().is_empty() {
        return Err(AppointmentError::ValidationError("patient_id is required".to_string()));
    }

    ensure_canonical_date(&request.date)
}

/// Date order, then slot hour; unparseable labels go last.
fn sort_chronologically(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| slot_hour(&a.time).unwrap_or(u32::MAX).cmp(&slot_hour(&b.time).unwrap_or(u32::MAX)))
    });
}
