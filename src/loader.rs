//! Initial data load.
//!
//! The app simulates a backend fetch: it waits a fixed delay, then reads
//! everything from the seed provider. Resolves exactly once. Dropping the
//! future cancels it; `load_initial_data_until` also accepts an explicit
//! cancel signal.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::AppointmentError;
use crate::models::appointment::AppointmentRecord;
use crate::models::profile::PatientProfile;
use crate::seed::SeedDataProvider;

/// Everything the dashboard, appointment list and history screens start from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialData {
    pub profile: PatientProfile,
    pub upcoming: Vec<AppointmentRecord>,
    pub past: Vec<AppointmentRecord>,
}

pub async fn load_initial_data<P: SeedDataProvider + ?Sized>(
    provider: &P,
    delay: Duration,
) -> Result<InitialData, AppointmentError> {
    tokio::time::sleep(delay).await;

    let profile = provider.patient();
    let upcoming = provider.upcoming(&profile)?;
    let past = provider.past(&profile)?;

    tracing::info!(
        profile_id = %profile.id,
        upcoming = upcoming.len(),
        past = past.len(),
        "Initial data loaded"
    );
    Ok(InitialData {
        profile,
        upcoming,
        past,
    })
}

/// Like [`load_initial_data`], but gives up when `cancel` fires (or its
/// sender is dropped) first. Returns `Ok(None)` when cancelled.
pub async fn load_initial_data_until<P: SeedDataProvider + ?Sized>(
    provider: &P,
    delay: Duration,
    cancel: oneshot::Receiver<()>,
) -> Result<Option<InitialData>, AppointmentError> {
    tokio::select! {
        result = load_initial_data(provider, delay) => result.map(Some),
        _ = cancel => {
            tracing::info!("Initial data load cancelled");
            Ok(None)
        }
    }
}
