//! Treatment catalogue: fixed metadata for every treatment type.
//!
//! Pure lookup: display name, icon, canned completion note and follow-up
//! policy. The enumeration is closed, so every lookup succeeds.

use serde::Serialize;

use crate::models::enums::TreatmentType;

/// Everything the app knows about a treatment type.
///
/// `follow_up_days` is `Some` exactly when `requires_follow_up` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreatmentMetadata {
    pub treatment: TreatmentType,
    pub display_name: &'static str,
    pub icon_id: &'static str,
    pub default_note: &'static str,
    pub requires_follow_up: bool,
    pub follow_up_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreatmentCatalog;

impl TreatmentCatalog {
    pub fn new() -> Self {
        Self
    }

    /// All treatment types in picker order. Stable across calls.
    pub fn all_treatments(&self) -> &'static [TreatmentType] {
        TreatmentType::ALL
    }

    pub fn metadata(&self, treatment: TreatmentType) -> TreatmentMetadata {
        let follow_up_days = follow_up_days(treatment);
        TreatmentMetadata {
            treatment,
            display_name: display_name(treatment),
            icon_id: icon_id(treatment),
            default_note: treatment_note(treatment),
            requires_follow_up: follow_up_days.is_some(),
            follow_up_days,
        }
    }

    /// Completion note recorded when a visit of this type is marked Completed.
    pub fn generate_treatment_note(&self, treatment: TreatmentType) -> String {
        treatment_note(treatment).to_string()
    }
}

fn display_name(treatment: TreatmentType) -> &'static str {
    match treatment {
        TreatmentType::Checkup => "Checkup",
        TreatmentType::Cleaning => "Cleaning",
        TreatmentType::Filling => "Filling",
        TreatmentType::RootCanal => "Root Canal",
        TreatmentType::Extraction => "Extraction",
        TreatmentType::Consultation => "Consultation",
    }
}

fn icon_id(treatment: TreatmentType) -> &'static str {
    match treatment {
        TreatmentType::Checkup => "heart.text.square.fill",
        TreatmentType::Cleaning => "sparkles",
        TreatmentType::Filling => "seal.fill",
        TreatmentType::RootCanal => "waveform.path.ecg",
        TreatmentType::Extraction => "scissors",
        TreatmentType::Consultation => "text.bubble.fill",
    }
}

fn treatment_note(treatment: TreatmentType) -> &'static str {
    match treatment {
        TreatmentType::Checkup => {
            "Regular dental checkup completed. No cavities found. Good oral hygiene maintained."
        }
        TreatmentType::Cleaning => {
            "Full dental cleaning performed. Tartar and plaque removed. Teeth polished."
        }
        TreatmentType::Filling => {
            "Filling performed on upper right molar. Composite material used. Patient tolerated procedure well."
        }
        TreatmentType::RootCanal => {
            "Root canal therapy completed on lower left premolar. Canal sealed. Temporary crown placed."
        }
        TreatmentType::Extraction => {
            "Extraction of wisdom tooth completed. No complications during procedure. Post-operative care instructions provided."
        }
        TreatmentType::Consultation => {
            "Initial consultation for orthodontic treatment. Discussed treatment options and costs."
        }
    }
}

fn follow_up_days(treatment: TreatmentType) -> Option<u32> {
    match treatment {
        TreatmentType::RootCanal => Some(14),
        TreatmentType::Extraction => Some(7),
        TreatmentType::Filling => Some(30),
        TreatmentType::Checkup | TreatmentType::Cleaning | TreatmentType::Consultation => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_up_present_iff_required() {
        let catalog = TreatmentCatalog::new();
        for &treatment in catalog.all_treatments() {
            let meta = catalog.metadata(treatment);
            assert_eq!(
                meta.follow_up_days.is_some(),
                meta.requires_follow_up,
                "{treatment} breaks the follow-up invariant"
            );
        }
    }

    #[test]
    fn follow_up_intervals() {
        let catalog = TreatmentCatalog::new();
        assert_eq!(catalog.metadata(TreatmentType::RootCanal).follow_up_days, Some(14));
        assert_eq!(catalog.metadata(TreatmentType::Extraction).follow_up_days, Some(7));
        assert_eq!(catalog.metadata(TreatmentType::Filling).follow_up_days, Some(30));
        for treatment in [
            TreatmentType::Checkup,
            TreatmentType::Cleaning,
            TreatmentType::Consultation,
        ] {
            let meta = catalog.metadata(treatment);
            assert!(!meta.requires_follow_up);
            assert_eq!(meta.follow_up_days, None);
        }
    }

    #[test]
    fn all_treatments_order_is_stable() {
        let catalog = TreatmentCatalog::new();
        let first = catalog.all_treatments().to_vec();
        let second = catalog.all_treatments().to_vec();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                TreatmentType::Checkup,
                TreatmentType::Cleaning,
                TreatmentType::Filling,
                TreatmentType::RootCanal,
                TreatmentType::Extraction,
                TreatmentType::Consultation,
            ]
        );
    }

    #[test]
    fn display_names_and_icons() {
        let catalog = TreatmentCatalog::new();
        let root_canal = catalog.metadata(TreatmentType::RootCanal);
        assert_eq!(root_canal.display_name, "Root Canal");
        assert_eq!(root_canal.icon_id, "waveform.path.ecg");
        assert_eq!(catalog.metadata(TreatmentType::Cleaning).icon_id, "sparkles");
    }

    #[test]
    fn treatment_note_matches_metadata_default() {
        let catalog = TreatmentCatalog::new();
        for &treatment in catalog.all_treatments() {
            let note = catalog.generate_treatment_note(treatment);
            assert!(!note.is_empty());
            assert_eq!(note, catalog.metadata(treatment).default_note);
        }
        assert!(catalog
            .generate_treatment_note(TreatmentType::Extraction)
            .contains("wisdom tooth"));
    }
}
