use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// `ALL` lists the variants in declaration order.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(TreatmentType {
    Checkup => "checkup",
    Cleaning => "cleaning",
    Filling => "filling",
    RootCanal => "root_canal",
    Extraction => "extraction",
    Consultation => "consultation",
});

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl AppointmentStatus {
    /// Cancelled and Completed accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

str_enum!(AppointmentTime {
    Morning => "morning",
    Afternoon => "afternoon",
    Evening => "evening",
});

impl AppointmentTime {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }
}

str_enum!(CancellationOption {
    ScheduleConflict => "schedule_conflict",
    FoundAnotherProvider => "found_another_provider",
    NoLongerNeeded => "no_longer_needed",
    FeelingBetter => "feeling_better",
    FinancialReasons => "financial_reasons",
    Other => "other",
});

impl CancellationOption {
    /// Text shown on the reason picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ScheduleConflict => "Schedule conflict",
            Self::FoundAnotherProvider => "Found another provider",
            Self::NoLongerNeeded => "No longer needed",
            Self::FeelingBetter => "Feeling better",
            Self::FinancialReasons => "Financial reasons",
            Self::Other => "Other",
        }
    }

    /// Match a picker label or a stored key, ignoring case and surrounding space.
    pub fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.iter().copied().find(|option| {
            option.label().eq_ignore_ascii_case(text) || option.as_str() == text
        })
    }
}
