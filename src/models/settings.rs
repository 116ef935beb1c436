use serde::{Deserialize, Serialize};

use crate::config::{APP_NAME, DEFAULT_PER_PAGE};

/// System-wide preferences edited on the admin settings screen. Held
/// client-side only; no backend endpoint stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub system_name: String,
    pub support_email: String,
    pub default_page_size: u32,
    pub session_timeout_minutes: u32,
    pub allow_patient_self_registration: bool,
    pub maintenance_mode: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            system_name: APP_NAME.to_string(),
            support_email: "support@ruralcare.example".to_string(),
            default_page_size: DEFAULT_PER_PAGE,
            session_timeout_minutes: 60,
            allow_patient_self_registration: true,
            maintenance_mode: false,
        }
    }
}
