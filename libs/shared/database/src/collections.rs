//! Collection names and the unique indexes every store must honour.

pub const USERS: &str = "users";
pub const DOCTORS: &str = "doctors";
pub const ADMINS: &str = "admins";
pub const APPOINTMENTS: &str = "appointments";
pub const ADMISSIONS: &str = "admission";
pub const STAFF: &str = "staff";
pub const PHARMACY: &str = "pharmacy";
pub const LAB_REPORTS: &str = "lab_report";
pub const PRESCRIPTIONS: &str = "prescriptions";
pub const VITALS: &str = "vitals";

/// `(collection, fields)` pairs. The appointment index is the booking
/// invariant: one appointment per doctor, date and slot label.
pub fn unique_indexes() -> Vec<(&'static str, &'static [&'static str])> {
    vec![
        (APPOINTMENTS, &["doctor_id", "date", "time"]),
        (DOCTORS, &["doctorId"]),
        (USERS, &["user_id"]),
        (ADMINS, &["adminId"]),
        (STAFF, &["staffId"]),
        (PHARMACY, &["medicineName", "batchNumber"]),
        (ADMISSIONS, &["admissionId"]),
        (LAB_REPORTS, &["reportId"]),
    ]
}
