use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use shared_database::RecordStore;

use crate::models::{AppointmentError, TimeSlot};
use crate::services::repository::AppointmentRepository;
use crate::services::slots::ensure_canonical_date;

pub struct AvailabilityService {
    repository: AppointmentRepository,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repository: AppointmentRepository::new(store),
        }
    }

    /// Every slot of the doctor's day, flagged available unless some
    /// appointment (of any status) already holds its label. `date` must be
    /// canonical `YYYY-MM-DD`, the same form booking stores.
    pub async fn get_time_slots(
        &self,
        doctor_id: &str,
        date: &str,
    ) -> Result<Vec<TimeSlot>, AppointmentError> {
        debug!("Resolving time slots for doctor {} on {}", doctor_id, date);
        ensure_canonical_date(date)?;

        let doctor = self
            .repository
            .find_doctor(doctor_id)
            .await?
            .ok_or(AppointmentError::DoctorNotFound)?;

        let labels = doctor.working_hours().slot_labels();

        let booked = self.repository.find_appointments(doctor_id, date).await?;
        let booked_times: HashSet<&str> = booked.iter().map(|a| a.time.as_str()).collect();

        let slots = resolve_slots(labels, &booked_times);
        debug!(
            "Doctor {} has {} of {} slots free on {}",
            doctor_id,
            slots.iter().filter(|s| s.available).count(),
            slots.len(),
            date
        );

        Ok(slots)
    }
}

/// Pair each label with its 1-based position and availability.
pub fn resolve_slots(labels: Vec<String>, booked: &HashSet<&str>) -> Vec<TimeSlot> {
    labels
        .into_iter()
        .enumerate()
        .map(|(index, time)| TimeSlot {
            id: (index + 1).to_string(),
            available: !booked.contains(time.as_str()),
            time,
        })
        .collect()
}
