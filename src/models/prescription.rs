use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub visit_id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    pub instructions: String,
    /// Always at least 1.
    pub duration_days: u32,
    pub created_at: DateTime<Utc>,
}
