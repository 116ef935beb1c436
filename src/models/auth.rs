use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clinic::Clinic;
use super::enums::UserType;
use super::patient::Patient;
use super::staff::Staff;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

/// The signed-in principal. Role dispatch matches on the variant instead of
/// guessing the record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthUser {
    Patient(Patient),
    Clinic(Clinic),
    Staff(Staff),
    Admin(AdminUser),
}

impl AuthUser {
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Patient(_) => UserType::Patient,
            Self::Clinic(_) => UserType::Clinic,
            Self::Staff(_) => UserType::Staff,
            Self::Admin(_) => UserType::Admin,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Patient(p) => p.id,
            Self::Clinic(c) => c.id,
            Self::Staff(s) => s.id,
            Self::Admin(a) => a.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Patient(p) => &p.full_name,
            Self::Clinic(c) => &c.name,
            Self::Staff(s) => &s.full_name,
            Self::Admin(a) => &a.full_name,
        }
    }

    /// Clinic the principal belongs to, if any.
    pub fn clinic_id(&self) -> Option<Uuid> {
        match self {
            Self::Patient(p) => Some(p.clinic_id),
            Self::Clinic(c) => Some(c.id),
            Self::Staff(s) => Some(s.clinic_id),
            Self::Admin(_) => None,
        }
    }

    pub fn as_patient(&self) -> Option<&Patient> {
        match self {
            Self::Patient(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_clinic(&self) -> Option<&Clinic> {
        match self {
            Self::Clinic(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_staff(&self) -> Option<&Staff> {
        match self {
            Self::Staff(s) => Some(s),
            _ => None,
        }
    }
}

/// Body returned by every login and registration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}
