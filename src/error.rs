//! Error types for the appointment domain.
//!
//! Every variant is a local validation failure the presentation layer can
//! show as an alert. None of them are fatal, and an operation that returns
//! one of these has left every record untouched.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use crate::models::enums::AppointmentStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    #[error("Please select a time slot before confirming the booking")]
    IncompleteSelection,

    #[error("The {} slot is not available on {date}", .slot.format("%H:%M"))]
    SlotNotAvailable { date: NaiveDate, slot: NaiveDateTime },

    #[error("Cannot {action} an appointment that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: AppointmentStatus,
    },

    #[error("Please select a reason for cancellation")]
    MissingReason,

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("Appointment not found: {0}")]
    NotFound(Uuid),

    #[error("Follow-up interval out of range: {0} days")]
    FollowUpOutOfRange(u32),

    #[error("Appointment {id} is inconsistent: {problem}")]
    InconsistentRecord { id: Uuid, problem: &'static str },
}

/// Errors from parsing stored or user-supplied enum values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
