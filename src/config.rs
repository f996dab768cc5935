use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Dentista";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clinic opens its first slot at 09:00 local time.
pub const FIRST_SLOT_HOUR: u32 = 9;
/// Slots offered per day: 09:00 through 16:00.
pub const SLOT_COUNT: u32 = 8;
pub const SLOT_INTERVAL_MINUTES: i64 = 60;

/// How far ahead the date picker lets a patient book.
pub const BOOKING_WINDOW_MONTHS: u32 = 3;

/// Longest follow-up interval a clinician can set on a record.
pub const MAX_FOLLOW_UP_DAYS: u32 = 365;

/// Simulated fetch latency before the initial data is available.
pub const INITIAL_LOAD_DELAY: Duration = Duration::from_secs(1);

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("info,dentista_lib={}", if cfg!(debug_assertions) { "debug" } else { "info" })
}

/// Values stamped onto every newly booked appointment.
///
/// The app has no clinic-side scheduling, so doctor and location come from
/// here rather than from an availability source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicConfig {
    pub default_doctor: String,
    pub default_location: String,
    pub default_visit_notes: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            default_doctor: "Dr. Ana Sousa".into(),
            default_location: "Clínica Dental Principal, Piso 2".into(),
            default_visit_notes: "Please arrive 15 minutes before your appointment. \
                Remember to bring your insurance card and identification."
                .into(),
        }
    }
}
