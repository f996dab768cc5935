use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AppointmentStatus, CancellationOption, TreatmentType};
use crate::config::MAX_FOLLOW_UP_DAYS;

/// A single appointment. Created by committing a booking draft and changed
/// only through lifecycle transitions, each of which yields a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub scheduled_at: NaiveDateTime,
    pub treatment_type: TreatmentType,
    pub status: AppointmentStatus,
    pub doctor_name: String,
    pub location: String,
    pub notes: String,
    /// Set only once the appointment is Completed.
    pub treatment_notes: Option<String>,
    /// `Some` exactly when a follow-up visit is needed.
    pub follow_up_in_days: Option<u32>,
    /// Set only once the appointment is Cancelled.
    pub cancellation_reason: Option<CancellationReason>,
}

impl AppointmentRecord {
    pub fn needs_follow_up(&self) -> bool {
        self.follow_up_in_days.is_some()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }

    /// Date the follow-up visit falls due. Only completed visits have one.
    pub fn follow_up_due(&self) -> Option<NaiveDate> {
        match (self.status, self.follow_up_in_days) {
            (AppointmentStatus::Completed, Some(days)) => {
                Some(self.date() + Duration::days(i64::from(days)))
            }
            _ => None,
        }
    }

    /// First field that contradicts the record's status, if any. Records
    /// built through the lifecycle never have one; injected ones might.
    pub fn inconsistency(&self) -> Option<&'static str> {
        if self.treatment_notes.is_some() && self.status != AppointmentStatus::Completed {
            return Some("treatment notes on a record that is not completed");
        }
        if self.cancellation_reason.is_some() && self.status != AppointmentStatus::Cancelled {
            return Some("cancellation reason on a record that is not cancelled");
        }
        match self.follow_up_in_days {
            Some(days) if days == 0 || days > MAX_FOLLOW_UP_DAYS => {
                Some("follow-up interval out of range")
            }
            _ => None,
        }
    }
}

/// Why a patient cancelled. `details` carries the free-text elaboration,
/// required when the option is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationReason {
    pub option: CancellationOption,
    pub details: Option<String>,
}

impl CancellationReason {
    pub fn describe(&self) -> String {
        match &self.details {
            Some(details) => format!("{}: {}", self.option.label(), details),
            None => self.option.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled() -> AppointmentRecord {
        AppointmentRecord {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            scheduled_at: NaiveDate::from_ymd_opt(2024, 6, 10)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            treatment_type: TreatmentType::Filling,
            status: AppointmentStatus::Scheduled,
            doctor_name: "Dr. Ana Sousa".into(),
            location: "Piso 2".into(),
            notes: String::new(),
            treatment_notes: None,
            follow_up_in_days: Some(30),
            cancellation_reason: None,
        }
    }

    #[test]
    fn consistent_records_pass() {
        let record = scheduled();
        assert_eq!(record.inconsistency(), None);

        let done = AppointmentRecord {
            status: AppointmentStatus::Completed,
            treatment_notes: Some("Composite filling".into()),
            ..record.clone()
        };
        assert_eq!(done.inconsistency(), None);

        let cancelled = AppointmentRecord {
            status: AppointmentStatus::Cancelled,
            cancellation_reason: Some(CancellationReason {
                option: CancellationOption::FeelingBetter,
                details: None,
            }),
            ..record
        };
        assert_eq!(cancelled.inconsistency(), None);
    }

    #[test]
    fn status_contradictions_are_reported() {
        let with_notes = AppointmentRecord {
            treatment_notes: Some("Teeth polished".into()),
            ..scheduled()
        };
        assert!(with_notes.inconsistency().is_some());

        let with_reason = AppointmentRecord {
            status: AppointmentStatus::Completed,
            cancellation_reason: Some(CancellationReason {
                option: CancellationOption::Other,
                details: Some("moved abroad".into()),
            }),
            ..scheduled()
        };
        assert!(with_reason.inconsistency().is_some());

        let zero_days = AppointmentRecord {
            follow_up_in_days: Some(0),
            ..scheduled()
        };
        assert_eq!(zero_days.inconsistency(), Some("follow-up interval out of range"));
    }

    #[test]
    fn follow_up_due_only_after_completion() {
        let record = scheduled();
        assert_eq!(record.follow_up_due(), None);
        let done = AppointmentRecord {
            status: AppointmentStatus::Completed,
            ..record
        };
        assert_eq!(done.follow_up_due(), NaiveDate::from_ymd_opt(2024, 7, 10));
    }
}
