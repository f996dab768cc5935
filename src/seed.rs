//! Seed data: the only data source the app has.
//!
//! Providers are injected at startup. `ExampleSeedData` supplies the demo
//! patient and four appointments dated relative to `today`, all built
//! through the lifecycle so they obey the same invariants as real bookings.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::config::ClinicConfig;
use crate::error::AppointmentError;
use crate::lifecycle::{AppointmentLifecycle, BookingDraft};
use crate::models::appointment::AppointmentRecord;
use crate::models::enums::{AppointmentTime, TreatmentType};
use crate::models::profile::{Address, EmergencyContact, PatientProfile, Preferences};
use crate::slots::SlotGenerator;

/// Supplies the initial profile and appointments.
pub trait SeedDataProvider: Send + Sync {
    fn patient(&self) -> PatientProfile;

    /// Scheduled appointments for `patient`.
    fn upcoming(&self, patient: &PatientProfile) -> Result<Vec<AppointmentRecord>, AppointmentError>;

    /// Completed or cancelled appointments for `patient`.
    fn past(&self, patient: &PatientProfile) -> Result<Vec<AppointmentRecord>, AppointmentError>;
}

/// Demo data: João Silva, two upcoming visits and two completed ones.
#[derive(Debug, Clone)]
pub struct ExampleSeedData {
    today: NaiveDate,
    patient_id: Uuid,
    clinic: ClinicConfig,
}

impl ExampleSeedData {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_clinic(today, ClinicConfig::default())
    }

    pub fn with_clinic(today: NaiveDate, clinic: ClinicConfig) -> Self {
        Self {
            today,
            patient_id: Uuid::new_v4(),
            clinic,
        }
    }

    /// Seed slots are wall-clock times; UTC has no DST gaps, so seeding
    /// never trips over an unresolvable local time.
    fn lifecycle(&self, clinic: ClinicConfig) -> AppointmentLifecycle<Utc> {
        AppointmentLifecycle::with_slot_generator(SlotGenerator::with_timezone(Utc), clinic)
    }

    fn scheduled(
        &self,
        lifecycle: &AppointmentLifecycle<Utc>,
        patient: &PatientProfile,
        days_from_today: i64,
        hour: u32,
        treatment: TreatmentType,
    ) -> Result<AppointmentRecord, AppointmentError> {
        let date = self.today + Duration::days(days_from_today);
        let slot = date
            .and_hms_opt(hour, 0, 0)
            .ok_or_else(|| AppointmentError::InvalidDate(date.to_string()))?;

        let mut draft = BookingDraft::new(patient.id, date);
        draft.select_treatment(treatment);
        lifecycle.select_slot(&mut draft, slot)?;
        lifecycle.commit(&draft)
    }
}

impl SeedDataProvider for ExampleSeedData {
    fn patient(&self) -> PatientProfile {
        PatientProfile {
            id: self.patient_id,
            name: "João Silva".into(),
            email: "joao.silva@exemplo.pt".into(),
            phone: "912 345 678".into(),
            birth_date: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap_or_default(),
            address: Address {
                street: "Rua da Liberdade, 123".into(),
                city: "Lisboa".into(),
                state: "Lisboa".into(),
                zip_code: "1250-096".into(),
            },
            emergency_contact: EmergencyContact {
                name: "Maria Silva".into(),
                relationship: "Spouse".into(),
                phone: "913 987 654".into(),
            },
            preferences: Preferences {
                appointment_reminders: true,
                email_notifications: true,
                sms_notifications: false,
                preferred_appointment_time: AppointmentTime::Afternoon,
            },
        }
    }

    fn upcoming(&self, patient: &PatientProfile) -> Result<Vec<AppointmentRecord>, AppointmentError> {
        let lifecycle = self.lifecycle(self.clinic.clone());
        Ok(vec![
            self.scheduled(&lifecycle, patient, 3, 10, TreatmentType::Checkup)?,
            self.scheduled(&lifecycle, patient, 10, 10, TreatmentType::Cleaning)?,
        ])
    }

    fn past(&self, patient: &PatientProfile) -> Result<Vec<AppointmentRecord>, AppointmentError> {
        let third_floor = self.lifecycle(ClinicConfig {
            default_doctor: "Dr. Manuel Costa".into(),
            default_location: "Clínica Dental Principal, Piso 3".into(),
            ..self.clinic.clone()
        });
        let root_canal = self.scheduled(&third_floor, patient, -45, 14, TreatmentType::RootCanal)?;
        let root_canal = third_floor.complete(
            &root_canal,
            "Root canal therapy completed on lower left premolar. Canal sealed. Temporary crown placed.",
        )?;

        let lifecycle = self.lifecycle(self.clinic.clone());
        let cleaning = self.scheduled(&lifecycle, patient, -90, 14, TreatmentType::Cleaning)?;
        // Six-monthly recall set by the hygienist.
        let cleaning = lifecycle.override_follow_up(&cleaning, Some(180))?;
        let cleaning = lifecycle.complete(
            &cleaning,
            "Full dental cleaning performed. Tartar and plaque removed. Teeth polished.",
        )?;

        Ok(vec![root_canal, cleaning])
    }
}
