//! Application state for one patient session.
//!
//! `CoreState` owns the profile session and the appointment book. The app
//! has a single UI actor, so there is no locking: whoever holds the state
//! is the only editor.

use chrono::{Local, NaiveDate, TimeZone};

use crate::book::AppointmentBook;
use crate::dashboard::{self, DashboardSummary};
use crate::error::AppointmentError;
use crate::lifecycle::AppointmentLifecycle;
use crate::loader::InitialData;
use crate::profile_session::ProfileSession;

#[derive(Debug, Clone)]
pub struct CoreState<Tz: TimeZone = Local> {
    profile: ProfileSession,
    appointments: AppointmentBook<Tz>,
}

impl<Tz: TimeZone> CoreState<Tz> {
    /// Populate from a finished initial load.
    pub fn from_initial(
        data: InitialData,
        lifecycle: AppointmentLifecycle<Tz>,
    ) -> Result<Self, AppointmentError> {
        let records = data.upcoming.into_iter().chain(data.past);
        Ok(Self {
            profile: ProfileSession::new(data.profile),
            appointments: AppointmentBook::with_records(lifecycle, records)?,
        })
    }

    pub fn profile(&self) -> &ProfileSession {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut ProfileSession {
        &mut self.profile
    }

    pub fn appointments(&self) -> &AppointmentBook<Tz> {
        &self.appointments
    }

    pub fn appointments_mut(&mut self) -> &mut AppointmentBook<Tz> {
        &mut self.appointments
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        dashboard::summarize(
            self.profile.current(),
            self.appointments.upcoming(),
            self.appointments.history(),
            today,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClinicConfig;
    use crate::loader::load_initial_data;
    use crate::models::enums::{AppointmentStatus, TreatmentType};
    use crate::seed::ExampleSeedData;
    use crate::slots::SlotGenerator;
    use chrono::Utc;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    async fn make_state() -> CoreState<Utc> {
        let data = load_initial_data(&ExampleSeedData::new(today()), Duration::ZERO)
            .await
            .unwrap();
        CoreState::from_initial(
            data,
            AppointmentLifecycle::with_slot_generator(
                SlotGenerator::with_timezone(Utc),
                ClinicConfig::default(),
            ),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn initial_load_fills_book_and_profile() {
        let state = make_state().await;
        assert_eq!(state.appointments().upcoming().len(), 2);
        assert_eq!(state.appointments().history().len(), 2);
        assert!(!state.profile().is_editing());
    }

    #[tokio::test]
    async fn book_then_cancel_flows_through_dashboard() {
        let mut state = make_state().await;
        let patient_id = state.profile().current().id;
        let day = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

        let book = state.appointments_mut();
        let mut draft = book.start_booking(patient_id, day);
        draft.select_treatment(TreatmentType::Extraction);
        book.lifecycle()
            .select_slot(&mut draft, day.and_hms_opt(9, 0, 0).unwrap())
            .unwrap();
        let booked = book.book(&draft).unwrap();

        let summary = state.dashboard(today());
        assert_eq!(summary.upcoming_count, 3);
        assert_eq!(summary.next_appointment.as_ref().map(|r| r.id), Some(booked.id));

        let cancelled = state
            .appointments_mut()
            .cancel(booked.id, "Schedule conflict", None)
            .unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(state.dashboard(today()).upcoming_count, 2);
    }

    #[tokio::test]
    async fn profile_edit_shows_on_dashboard() {
        let mut state = make_state().await;
        let mut buffer = state.profile_mut().begin().unwrap();
        buffer.name = "João P. Silva".into();
        state.profile_mut().commit(buffer).unwrap();

        assert_eq!(state.dashboard(today()).patient_name, "João P. Silva");
    }
}
