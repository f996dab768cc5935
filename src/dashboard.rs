//! Dashboard data for the home screen.
//!
//! Greeting, the next scheduled visit, follow-ups owed from completed
//! treatments, and the static dental-care tips.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::appointment::AppointmentRecord;
use crate::models::enums::TreatmentType;
use crate::models::profile::PatientProfile;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DentalTip {
    pub icon_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// A follow-up visit owed after a completed treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpReminder {
    pub appointment_id: Uuid,
    pub treatment_type: TreatmentType,
    pub due: NaiveDate,
    pub overdue: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub patient_name: String,
    pub next_appointment: Option<AppointmentRecord>,
    pub upcoming_count: usize,
    /// Ordered by due date, earliest first.
    pub follow_ups: Vec<FollowUpReminder>,
    pub tips: Vec<DentalTip>,
}

pub const DENTAL_TIPS: &[DentalTip] = &[
    DentalTip {
        icon_id: "toothbrush",
        title: "Brushing",
        description: "Brush teeth twice daily for 2 minutes using fluoride toothpaste",
    },
    DentalTip {
        icon_id: "slash.circle",
        title: "Flossing",
        description: "Floss once daily to clean between teeth where brushes can't reach",
    },
    DentalTip {
        icon_id: "cup.and.saucer.fill",
        title: "Diet",
        description: "Limit sugary foods and drinks to protect your teeth and gums",
    },
];

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the dashboard from the current profile and appointment lists.
/// `upcoming` and `past` need not be sorted.
pub fn summarize(
    profile: &PatientProfile,
    upcoming: &[AppointmentRecord],
    past: &[AppointmentRecord],
    today: NaiveDate,
) -> DashboardSummary {
    let next_appointment = upcoming
        .iter()
        .filter(|r| !r.is_terminal())
        .min_by_key(|r| r.scheduled_at)
        .cloned();

    let mut follow_ups: Vec<FollowUpReminder> = past
        .iter()
        .filter_map(|r| {
            r.follow_up_due().map(|due| FollowUpReminder {
                appointment_id: r.id,
                treatment_type: r.treatment_type,
                due,
                overdue: due < today,
            })
        })
        .collect();
    follow_ups.sort_by_key(|f| f.due);

    DashboardSummary {
        patient_name: profile.name.clone(),
        next_appointment,
        upcoming_count: upcoming.iter().filter(|r| !r.is_terminal()).count(),
        follow_ups,
        tips: DENTAL_TIPS.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
