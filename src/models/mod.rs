pub mod appointment;
pub mod enums;
pub mod profile;

pub use appointment::{AppointmentRecord, CancellationReason};
pub use enums::{AppointmentStatus, AppointmentTime, CancellationOption, TreatmentType};
pub use profile::{Address, EmergencyContact, PatientProfile, Preferences};
