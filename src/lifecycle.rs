//! Appointment lifecycle: booking drafts and the transitions applied to
//! committed records.
//!
//! ```text
//! Draft ──commit──▶ Scheduled ──reschedule──▶ Scheduled
//!                       │
//!                       ├──cancel────▶ Cancelled  (terminal)
//!                       └──complete──▶ Completed  (terminal)
//! ```
//!
//! Transitions take the current record by reference and return a new value.
//! All checks run before anything is built, so a failed transition leaves
//! the caller's record as it was.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::TreatmentCatalog;
use crate::config::{ClinicConfig, MAX_FOLLOW_UP_DAYS};
use crate::error::AppointmentError;
use crate::models::appointment::{AppointmentRecord, CancellationReason};
use crate::models::enums::{AppointmentStatus, CancellationOption, TreatmentType};
use crate::slots::SlotGenerator;

// ═══════════════════════════════════════════════════════════
// BookingDraft: uncommitted selection
// ═══════════════════════════════════════════════════════════

/// In-progress booking. The slot starts unset and can only be set through
/// [`AppointmentLifecycle::select_slot`], so a chosen slot always belongs to
/// the draft's date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDraft {
    patient_id: Uuid,
    date: NaiveDate,
    time_slot: Option<NaiveDateTime>,
    treatment: TreatmentType,
}

impl BookingDraft {
    /// New draft for `date` with the picker's default treatment (Checkup).
    pub fn new(patient_id: Uuid, date: NaiveDate) -> Self {
        Self {
            patient_id,
            date,
            time_slot: None,
            treatment: TreatmentType::Checkup,
        }
    }

    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time_slot(&self) -> Option<NaiveDateTime> {
        self.time_slot
    }

    pub fn treatment(&self) -> TreatmentType {
        self.treatment
    }

    /// Whether the confirm button can be enabled.
    pub fn is_complete(&self) -> bool {
        self.time_slot.is_some()
    }

    /// Change the date. A slot picked for another day is dropped.
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.time_slot.is_some_and(|slot| slot.date() != date) {
            self.time_slot = None;
        }
        self.date = date;
    }

    pub fn select_treatment(&mut self, treatment: TreatmentType) {
        self.treatment = treatment;
    }

    pub fn clear_slot(&mut self) {
        self.time_slot = None;
    }
}

// ═══════════════════════════════════════════════════════════
// Transitions
// ═══════════════════════════════════════════════════════════

/// Named transitions, used in rejection errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Reschedule,
    Cancel,
    Complete,
    OverrideFollowUp,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reschedule => "reschedule",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
            Self::OverrideFollowUp => "change the follow-up of",
        }
    }
}

/// Validates drafts and applies transitions to appointment records.
#[derive(Debug, Clone)]
pub struct AppointmentLifecycle<Tz: TimeZone = Local> {
    catalog: TreatmentCatalog,
    slots: SlotGenerator<Tz>,
    clinic: ClinicConfig,
}

impl AppointmentLifecycle<Local> {
    pub fn new(clinic: ClinicConfig) -> Self {
        Self::with_slot_generator(SlotGenerator::new(), clinic)
    }
}

impl Default for AppointmentLifecycle<Local> {
    fn default() -> Self {
        Self::new(ClinicConfig::default())
    }
}

impl<Tz: TimeZone> AppointmentLifecycle<Tz> {
    pub fn with_slot_generator(slots: SlotGenerator<Tz>, clinic: ClinicConfig) -> Self {
        Self {
            catalog: TreatmentCatalog::new(),
            slots,
            clinic,
        }
    }

    pub fn catalog(&self) -> &TreatmentCatalog {
        &self.catalog
    }

    pub fn slots(&self) -> &SlotGenerator<Tz> {
        &self.slots
    }

    pub fn clinic(&self) -> &ClinicConfig {
        &self.clinic
    }

    /// Pick a slot on the draft. It must be one of the draft date's slots.
    pub fn select_slot(
        &self,
        draft: &mut BookingDraft,
        slot: NaiveDateTime,
    ) -> Result<(), AppointmentError> {
        self.slots.ensure_available(draft.date, slot)?;
        draft.time_slot = Some(slot);
        Ok(())
    }

    /// Turn a complete draft into a Scheduled record. Follow-up policy comes
    /// from the catalogue; doctor, location and notes from the clinic config.
    pub fn commit(&self, draft: &BookingDraft) -> Result<AppointmentRecord, AppointmentError> {
        let slot = draft.time_slot.ok_or(AppointmentError::IncompleteSelection)?;
        let metadata = self.catalog.metadata(draft.treatment);

        let record = AppointmentRecord {
            id: Uuid::new_v4(),
            patient_id: draft.patient_id,
            scheduled_at: slot,
            treatment_type: draft.treatment,
            status: AppointmentStatus::Scheduled,
            doctor_name: self.clinic.default_doctor.clone(),
            location: self.clinic.default_location.clone(),
            notes: self.clinic.default_visit_notes.clone(),
            treatment_notes: None,
            follow_up_in_days: metadata.follow_up_days,
            cancellation_reason: None,
        };

        tracing::info!(
            appointment_id = %record.id,
            treatment = %record.treatment_type,
            scheduled_at = %record.scheduled_at,
            "Appointment booked"
        );
        Ok(record)
    }

    /// Move a Scheduled appointment to another slot and treatment.
    ///
    /// Doctor, location, notes and the follow-up policy fixed at booking
    /// time are carried over unchanged, even when the treatment changes.
    pub fn reschedule(
        &self,
        record: &AppointmentRecord,
        new_date: NaiveDate,
        new_slot: NaiveDateTime,
        new_treatment: TreatmentType,
    ) -> Result<AppointmentRecord, AppointmentError> {
        ensure_scheduled(record, Transition::Reschedule)?;
        self.slots.ensure_available(new_date, new_slot)?;

        let rescheduled = AppointmentRecord {
            scheduled_at: new_slot,
            treatment_type: new_treatment,
            ..record.clone()
        };

        tracing::info!(
            appointment_id = %record.id,
            from = %record.scheduled_at,
            to = %new_slot,
            treatment = %new_treatment,
            "Appointment rescheduled"
        );
        Ok(rescheduled)
    }

    /// Cancel a Scheduled appointment. Terminal.
    ///
    /// `reason` is a picker label ("Schedule conflict") or free text. The
    /// "Other" option needs a non-empty `details` elaboration.
    pub fn cancel(
        &self,
        record: &AppointmentRecord,
        reason: &str,
        details: Option<&str>,
    ) -> Result<AppointmentRecord, AppointmentError> {
        ensure_scheduled(record, Transition::Cancel)?;
        let reason = parse_cancellation_reason(reason, details)?;

        tracing::info!(
            appointment_id = %record.id,
            reason = reason.option.as_str(),
            "Appointment cancelled"
        );
        Ok(AppointmentRecord {
            status: AppointmentStatus::Cancelled,
            cancellation_reason: Some(reason),
            ..record.clone()
        })
    }

    /// Mark a Scheduled appointment as done. Terminal.
    ///
    /// Blank notes fall back to the catalogue's note for the treatment.
    /// The follow-up policy is kept as it is on the record.
    pub fn complete(
        &self,
        record: &AppointmentRecord,
        treatment_notes: impl Into<String>,
    ) -> Result<AppointmentRecord, AppointmentError> {
        ensure_scheduled(record, Transition::Complete)?;

        let mut notes = treatment_notes.into();
        if notes.trim().is_empty() {
            notes = self.catalog.generate_treatment_note(record.treatment_type);
        }

        tracing::info!(appointment_id = %record.id, "Appointment completed");
        Ok(AppointmentRecord {
            status: AppointmentStatus::Completed,
            treatment_notes: Some(notes),
            ..record.clone()
        })
    }

    /// Replace the follow-up interval derived at booking time.
    /// `None` clears the follow-up.
    pub fn override_follow_up(
        &self,
        record: &AppointmentRecord,
        follow_up_in_days: Option<u32>,
    ) -> Result<AppointmentRecord, AppointmentError> {
        ensure_scheduled(record, Transition::OverrideFollowUp)?;
        if let Some(days) = follow_up_in_days {
            if days == 0 || days > MAX_FOLLOW_UP_DAYS {
                return Err(AppointmentError::FollowUpOutOfRange(days));
            }
        }

        tracing::debug!(
            appointment_id = %record.id,
            follow_up_in_days = ?follow_up_in_days,
            "Follow-up overridden"
        );
        Ok(AppointmentRecord {
            follow_up_in_days,
            ..record.clone()
        })
    }
}

/// Every transition entry point goes through here: only Scheduled records
/// can move.
fn ensure_scheduled(record: &AppointmentRecord, transition: Transition) -> Result<(), AppointmentError> {
    if record.status == AppointmentStatus::Scheduled {
        return Ok(());
    }
    tracing::warn!(
        appointment_id = %record.id,
        status = %record.status,
        transition = transition.as_str(),
        "Rejected lifecycle transition"
    );
    Err(AppointmentError::InvalidTransition {
        action: transition.as_str(),
        status: record.status,
    })
}

/// Resolve picker text plus optional elaboration into a stored reason.
///
/// Text that matches no picker option is kept verbatim as an "Other"
/// elaboration.
pub fn parse_cancellation_reason(
    reason: &str,
    details: Option<&str>,
) -> Result<CancellationReason, AppointmentError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppointmentError::MissingReason);
    }
    let details = details
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    match CancellationOption::from_label(reason) {
        Some(CancellationOption::Other) => match details {
            Some(details) => Ok(CancellationReason {
                option: CancellationOption::Other,
                details: Some(details),
            }),
            None => Err(AppointmentError::MissingReason),
        },
        Some(option) => Ok(CancellationReason { option, details }),
        None => Ok(CancellationReason {
            option: CancellationOption::Other,
            details: Some(reason.to_string()),
        }),
    }
}
