//! Appointment book: exclusive owner of the patient's appointment records.
//!
//! Scheduled records live in `upcoming` (soonest first); Cancelled and
//! Completed records move to `history` (most recent first). Records are
//! changed only by running a lifecycle transition and storing its result,
//! and a failed transition leaves both lists untouched.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use uuid::Uuid;

use crate::error::AppointmentError;
use crate::lifecycle::{AppointmentLifecycle, BookingDraft};
use crate::models::appointment::AppointmentRecord;
use crate::models::enums::TreatmentType;

#[derive(Debug, Clone)]
pub struct AppointmentBook<Tz: TimeZone = Local> {
    lifecycle: AppointmentLifecycle<Tz>,
    upcoming: Vec<AppointmentRecord>,
    history: Vec<AppointmentRecord>,
}

impl<Tz: TimeZone> AppointmentBook<Tz> {
    pub fn new(lifecycle: AppointmentLifecycle<Tz>) -> Self {
        Self {
            lifecycle,
            upcoming: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Build a book from existing records (seed data), sorting each into
    /// upcoming or history by status. A record whose fields contradict its
    /// status rejects the whole batch.
    pub fn with_records(
        lifecycle: AppointmentLifecycle<Tz>,
        records: impl IntoIterator<Item = AppointmentRecord>,
    ) -> Result<Self, AppointmentError> {
        let mut book = Self::new(lifecycle);
        for record in records {
            if let Some(problem) = record.inconsistency() {
                tracing::warn!(
                    appointment_id = %record.id,
                    status = %record.status,
                    problem,
                    "Rejected injected appointment record"
                );
                return Err(AppointmentError::InconsistentRecord { id: record.id, problem });
            }
            book.store(record);
        }
        Ok(book)
    }

    pub fn lifecycle(&self) -> &AppointmentLifecycle<Tz> {
        &self.lifecycle
    }

    /// Scheduled appointments, soonest first.
    pub fn upcoming(&self) -> &[AppointmentRecord] {
        &self.upcoming
    }

    /// Cancelled and completed appointments, most recent first.
    pub fn history(&self) -> &[AppointmentRecord] {
        &self.history
    }

    pub fn get(&self, id: Uuid) -> Option<&AppointmentRecord> {
        self.upcoming
            .iter()
            .chain(self.history.iter())
            .find(|r| r.id == id)
    }

    /// Start a draft for this book's patient flow.
    pub fn start_booking(&self, patient_id: Uuid, date: NaiveDate) -> BookingDraft {
        BookingDraft::new(patient_id, date)
    }

    pub fn book(&mut self, draft: &BookingDraft) -> Result<AppointmentRecord, AppointmentError> {
        let record = self.lifecycle.commit(draft)?;
        self.store(record.clone());
        Ok(record)
    }

    pub fn reschedule(
        &mut self,
        id: Uuid,
        new_date: NaiveDate,
        new_slot: NaiveDateTime,
        new_treatment: TreatmentType,
    ) -> Result<AppointmentRecord, AppointmentError> {
        let current = self.find(id)?;
        let updated = self
            .lifecycle
            .reschedule(current, new_date, new_slot, new_treatment)?;
        Ok(self.replace(updated))
    }

    pub fn cancel(
        &mut self,
        id: Uuid,
        reason: &str,
        details: Option<&str>,
    ) -> Result<AppointmentRecord, AppointmentError> {
        let current = self.find(id)?;
        let updated = self.lifecycle.cancel(current, reason, details)?;
        Ok(self.replace(updated))
    }

    pub fn complete(
        &mut self,
        id: Uuid,
        treatment_notes: impl Into<String>,
    ) -> Result<AppointmentRecord, AppointmentError> {
        let current = self.find(id)?;
        let updated = self.lifecycle.complete(current, treatment_notes)?;
        Ok(self.replace(updated))
    }

    pub fn override_follow_up(
        &mut self,
        id: Uuid,
        follow_up_in_days: Option<u32>,
    ) -> Result<AppointmentRecord, AppointmentError> {
        let current = self.find(id)?;
        let updated = self.lifecycle.override_follow_up(current, follow_up_in_days)?;
        Ok(self.replace(updated))
    }

    fn find(&self, id: Uuid) -> Result<&AppointmentRecord, AppointmentError> {
        self.get(id).ok_or(AppointmentError::NotFound(id))
    }

    /// Swap in the transitioned value, moving it to history when terminal.
    fn replace(&mut self, updated: AppointmentRecord) -> AppointmentRecord {
        self.upcoming.retain(|r| r.id != updated.id);
        self.history.retain(|r| r.id != updated.id);
        self.store(updated.clone());
        updated
    }

    fn store(&mut self, record: AppointmentRecord) {
        if record.is_terminal() {
            self.history.push(record);
            self.history
                .sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        } else {
            self.upcoming.push(record);
            self.upcoming.sort_by_key(|r| r.scheduled_at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClinicConfig;
    use crate::models::enums::AppointmentStatus;
    use crate::slots::SlotGenerator;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
        day.and_hms_opt(hour, 0, 0).unwrap()
    }

    fn make_book() -> AppointmentBook<Utc> {
        AppointmentBook::new(AppointmentLifecycle::with_slot_generator(
            SlotGenerator::with_timezone(Utc),
            ClinicConfig::default(),
        ))
    }

    fn book_at(book: &mut AppointmentBook<Utc>, day: NaiveDate, hour: u32) -> AppointmentRecord {
        let mut draft = book.start_booking(Uuid::nil(), day);
        book.lifecycle().select_slot(&mut draft, at(day, hour)).unwrap();
        book.book(&draft).unwrap()
    }

    #[test]
    fn new_book_is_empty() {
        let book = make_book();
        assert!(book.upcoming().is_empty());
        assert!(book.history().is_empty());
    }

    #[test]
    fn upcoming_is_ordered_soonest_first() {
        let mut book = make_book();
        let later = book_at(&mut book, date(2024, 6, 20), 10);
        let sooner = book_at(&mut book, date(2024, 6, 12), 15);

        let ids: Vec<Uuid> = book.upcoming().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
    }

    #[test]
    fn incomplete_draft_leaves_book_unchanged() {
        let mut book = make_book();
        let draft = book.start_booking(Uuid::nil(), date(2024, 6, 12));
        assert_eq!(book.book(&draft), Err(AppointmentError::IncompleteSelection));
        assert!(book.upcoming().is_empty());
    }

    #[test]
    fn cancel_moves_record_to_history() {
        let mut book = make_book();
        let record = book_at(&mut book, date(2024, 6, 12), 9);

        let cancelled = book.cancel(record.id, "No longer needed", None).unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert!(book.upcoming().is_empty());
        assert_eq!(book.history().len(), 1);
        assert_eq!(book.get(record.id).unwrap().status, AppointmentStatus::Cancelled);

        // Terminal: a second cancel is rejected and nothing moves.
        assert!(matches!(
            book.cancel(record.id, "Schedule conflict", None),
            Err(AppointmentError::InvalidTransition { .. })
        ));
        assert_eq!(book.history().len(), 1);
    }

    #[test]
    fn failed_cancel_leaves_record_scheduled() {
        let mut book = make_book();
        let record = book_at(&mut book, date(2024, 6, 12), 9);
        assert_eq!(
            book.cancel(record.id, "Other", None),
            Err(AppointmentError::MissingReason)
        );
        assert_eq!(book.upcoming(), &[record]);
    }

    #[test]
    fn reschedule_reorders_upcoming() {
        let mut book = make_book();
        let first = book_at(&mut book, date(2024, 6, 12), 9);
        let second = book_at(&mut book, date(2024, 6, 14), 9);

        let new_day = date(2024, 6, 20);
        let moved = book
            .reschedule(first.id, new_day, at(new_day, 13), TreatmentType::Filling)
            .unwrap();
        assert_eq!(moved.scheduled_at, at(new_day, 13));

        let ids: Vec<Uuid> = book.upcoming().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn complete_orders_history_most_recent_first() {
        let mut book = make_book();
        let older = book_at(&mut book, date(2024, 3, 1), 10);
        let newer = book_at(&mut book, date(2024, 5, 1), 10);

        book.complete(older.id, "").unwrap();
        book.complete(newer.id, "Teeth polished").unwrap();

        let ids: Vec<Uuid> = book.history().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut book = make_book();
        let id = Uuid::new_v4();
        assert_eq!(book.complete(id, "x"), Err(AppointmentError::NotFound(id)));
        assert_eq!(
            book.override_follow_up(id, Some(10)),
            Err(AppointmentError::NotFound(id))
        );
    }

    #[test]
    fn with_records_partitions_by_status() {
        let mut source = make_book();
        let a = book_at(&mut source, date(2024, 6, 12), 9);
        let b = book_at(&mut source, date(2024, 6, 13), 9);
        let b_done = source.complete(b.id, "").unwrap();

        let book =
            AppointmentBook::with_records(source.lifecycle().clone(), vec![b_done, a.clone()])
                .unwrap();
        assert_eq!(book.upcoming(), &[a]);
        assert_eq!(book.history().len(), 1);
    }

    #[test]
    fn with_records_rejects_contradictory_record() {
        let mut source = make_book();
        let good = book_at(&mut source, date(2024, 6, 12), 9);
        let noted = AppointmentRecord {
            treatment_notes: Some("Teeth polished".into()),
            ..book_at(&mut source, date(2024, 6, 13), 9)
        };

        let err = AppointmentBook::with_records(source.lifecycle().clone(), vec![good, noted.clone()])
            .unwrap_err();
        assert!(matches!(
            err,
            AppointmentError::InconsistentRecord { id, .. } if id == noted.id
        ));
    }
}
