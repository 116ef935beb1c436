use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: Uuid,
    pub visit_id: Uuid,
    /// ICD-10 style code, e.g. `J45.909`.
    pub diagnosis_code: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
