use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub district: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
