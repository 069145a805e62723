use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::{AppointmentError, WorkingHours};

const SLOT_LABEL_FORMAT: &str = "%I:%M %p";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Appointments are keyed by the zero-padded `YYYY-MM-DD` string, so any
/// other spelling of a day is rejected rather than matched loosely.
pub fn ensure_canonical_date(date: &str) -> Result<(), AppointmentError> {
    let canonical = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| AppointmentError::InvalidDate(date.to_string()))?;
    if canonical != date {
        return Err(AppointmentError::InvalidDate(date.to_string()));
    }
    Ok(())
}

/// Hourly slot labels for `[start_hour, end_hour)`, e.g. `"09:00 AM"`.
///
/// Hours are clamped to the 24-hour day; an empty or inverted window yields
/// no slots.
pub fn generate_slots(start_hour: i64, end_hour: i64) -> Vec<String> {
    let start = start_hour.clamp(0, 24);
    let end = end_hour.clamp(0, 24);

    (start..end)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour as u32, 0, 0))
        .map(|time| time.format(SLOT_LABEL_FORMAT).to_string())
        .collect()
}

impl WorkingHours {
    pub fn slot_labels(&self) -> Vec<String> {
        generate_slots(self.start_hour, self.end_hour)
    }
}

/// Hour (0-23) a slot label stands for, if it is a well-formed label.
pub fn slot_hour(label: &str) -> Option<u32> {
    NaiveTime::parse_from_str(label, SLOT_LABEL_FORMAT)
        .ok()
        .filter(|time| time.minute() == 0)
        .map(|time| time.hour())
}
