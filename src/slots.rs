//! Time-slot generation for the booking and reschedule pickers.
//!
//! Deterministic: a calendar date always yields the same hourly slots from
//! 09:00 to 16:00 local time. There is no availability source behind this,
//! so no double-booking check happens here.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, TimeZone};

use crate::config::{BOOKING_WINDOW_MONTHS, FIRST_SLOT_HOUR, SLOT_COUNT, SLOT_INTERVAL_MINUTES};
use crate::error::AppointmentError;

/// Produces candidate start times. Slots are wall-clock times in `tz`.
#[derive(Debug, Clone)]
pub struct SlotGenerator<Tz: TimeZone = Local> {
    tz: Tz,
}

impl SlotGenerator<Local> {
    pub fn new() -> Self {
        Self { tz: Local }
    }
}

impl Default for SlotGenerator<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> SlotGenerator<Tz> {
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    /// Hourly slots for `date`, strictly increasing, first at 09:00.
    ///
    /// Fails with `InvalidDate` when the date's midnight or opening time does
    /// not exist in the generator's time zone.
    pub fn available_slots(&self, date: NaiveDate) -> Result<Vec<NaiveDateTime>, AppointmentError> {
        let invalid = || AppointmentError::InvalidDate(date.to_string());

        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        self.tz
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(invalid)?;

        let opening = date.and_hms_opt(FIRST_SLOT_HOUR, 0, 0).ok_or_else(invalid)?;
        let start = self
            .tz
            .from_local_datetime(&opening)
            .earliest()
            .ok_or_else(invalid)?;

        let slots: Vec<NaiveDateTime> = (0..i64::from(SLOT_COUNT))
            .map(|i| (start.clone() + Duration::minutes(i * SLOT_INTERVAL_MINUTES)).naive_local())
            .collect();

        tracing::debug!(%date, count = slots.len(), "Generated appointment slots");
        Ok(slots)
    }

    /// Same as [`available_slots`](Self::available_slots) for a raw
    /// year/month/day triple, which may not name a real calendar date.
    pub fn available_slots_on(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Vec<NaiveDateTime>, AppointmentError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            AppointmentError::InvalidDate(format!("{year:04}-{month:02}-{day:02}"))
        })?;
        self.available_slots(date)
    }

    /// Fails with `SlotNotAvailable` unless `slot` is one of the slots
    /// generated for `date`.
    pub fn ensure_available(&self, date: NaiveDate, slot: NaiveDateTime) -> Result<(), AppointmentError> {
        if self.available_slots(date)?.contains(&slot) {
            Ok(())
        } else {
            Err(AppointmentError::SlotNotAvailable { date, slot })
        }
    }
}

/// Dates the booking picker offers: today through three months ahead.
///
/// The end keeps today's day number and rolls into the following month when
/// the target month is shorter (Nov 30 ends on Mar 2, not Feb 28).
pub fn booking_window(today: NaiveDate) -> RangeInclusive<NaiveDate> {
    let end = today
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(BOOKING_WINDOW_MONTHS)))
        .and_then(|first| first.checked_add_days(Days::new(u64::from(today.day0()))))
        .unwrap_or(NaiveDate::MAX);
    today..=end
}
