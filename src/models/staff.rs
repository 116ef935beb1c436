use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::StaffRole;

/// Clinic staff member. The password only exists on the creation payload
/// (`NewStaff`) and is never returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub full_name: String,
    pub role: StaffRole,
    pub phone: String,
    pub email: String,
    pub clinic_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
