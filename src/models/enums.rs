use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The literal is both the display form and the wire form.
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
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

str_enum!(StaffRole {
    Doctor => "Doctor",
    Nurse => "Nurse",
    ClinicAdministrator => "Clinic_Administrator",
    Pharmacist => "Pharmacist",
});

str_enum!(UserType {
    Patient => "patient",
    Clinic => "clinic",
    Staff => "staff",
    Admin => "admin",
});

impl StaffRole {
    /// Doctors and nurses sign in to the medical portal, so they need a password.
    pub fn requires_password(&self) -> bool {
        matches!(self, Self::Doctor | Self::Nurse)
    }

    /// Roles allowed to record visits, diagnoses and prescriptions.
    pub fn can_record_visits(&self) -> bool {
        self.requires_password()
    }

    /// Human label ("Clinic Administrator" rather than the wire form).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Nurse => "Nurse",
            Self::ClinicAdministrator => "Clinic Administrator",
            Self::Pharmacist => "Pharmacist",
        }
    }
}
