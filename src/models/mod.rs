//! Domain records exchanged with the backend.
//!
//! All entities are flat records linked by id. Persistence and referential
//! integrity belong to the backend; these types only fix the wire shape.

pub mod analytics;
pub mod auth;
pub mod clinic;
pub mod diagnosis;
pub mod enums;
pub mod pagination;
pub mod patient;
pub mod prescription;
pub mod requests;
pub mod settings;
pub mod staff;
pub mod visit;

pub use analytics::*;
pub use auth::*;
pub use clinic::Clinic;
pub use diagnosis::Diagnosis;
pub use enums::{Gender, StaffRole, UserType};
pub use pagination::*;
pub use patient::{age_on, Patient};
pub use prescription::Prescription;
pub use requests::*;
pub use settings::SystemSettings;
pub use staff::Staff;
pub use visit::{Visit, VisitDetail};

/// A string did not match any variant of a wire enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}
