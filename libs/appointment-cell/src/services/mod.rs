pub mod availability;
pub mod booking;
pub mod repository;
pub mod slots;

pub use availability::AvailabilityService;
pub use booking::AppointmentBookingService;
pub use repository::AppointmentRepository;
