pub mod config;
pub mod error;
pub mod models;
pub mod catalog; // Treatment metadata and follow-up policy
pub mod slots; // Slot generation + booking window
pub mod lifecycle; // Drafts and appointment transitions
pub mod book; // Upcoming/history ownership
pub mod profile_session; // Profile edit buffer
pub mod seed; // Example data provider
pub mod loader; // Simulated initial fetch
pub mod dashboard; // Home screen summary
pub mod core_state;

pub use catalog::{TreatmentCatalog, TreatmentMetadata};
pub use core_state::CoreState;
pub use error::{AppointmentError, ModelError};
pub use lifecycle::{AppointmentLifecycle, BookingDraft};
pub use profile_session::{EditBuffer, ProfileError, ProfileSession};
pub use slots::SlotGenerator;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default
/// filter. Calling it again is a no-op.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} core v{}", config::APP_NAME, config::APP_VERSION);
    }
}
