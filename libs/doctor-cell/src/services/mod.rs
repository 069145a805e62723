pub mod doctor;
pub mod prescription;

pub use doctor::DoctorService;
pub use prescription::PrescriptionService;
