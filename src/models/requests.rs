//! Request payloads and small response bodies.
//!
//! Payloads are produced by the `validation` forms; constructing them by hand
//! skips local checks and leaves validation to the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Gender, StaffRole};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub phone: String,
    pub clinic_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterClinicRequest {
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub district: String,
    /// Login email for the clinic account.
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Patient created by a clinic; the clinic is taken from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub email: String,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub phone: String,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePatientProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdatePatientProfile {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.address.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStaff {
    pub full_name: String,
    pub role: StaffRole,
    pub phone: String,
    pub email: String,
    /// Present for Doctor and Nurse accounts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVisit {
    pub patient_id: Uuid,
    /// Required when a clinic records the visit; medical staff record
    /// visits under their own id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<Uuid>,
    pub visit_date: NaiveDate,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiagnosis {
    pub diagnosis_code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPrescription {
    pub medication_name: String,
    pub dosage: String,
    pub instructions: String,
    pub duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// System-wide record counts for the admin portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_clinics: u64,
    pub total_patients: u64,
    pub total_staff: u64,
    pub total_visits: u64,
    pub total_diagnoses: u64,
    pub total_prescriptions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_without_password_omits_field() {
        let staff = NewStaff {
            full_name: "Grace Banda".into(),
            role: StaffRole::Pharmacist,
            phone: "0999".into(),
            email: "grace@example.org".into(),
            password: None,
        };
        let json = serde_json::to_value(&staff).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "Pharmacist");
    }

    #[test]
    fn empty_profile_update_serializes_to_empty_object() {
        let update = UpdatePatientProfile::default();
        assert!(update.is_empty());
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
    }

    #[test]
    fn visit_date_is_iso() {
        let visit = NewVisit {
            patient_id: Uuid::nil(),
            staff_id: None,
            visit_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            reason: "Cough".into(),
            notes: None,
        };
        let json = serde_json::to_value(&visit).unwrap();
        assert_eq!(json["visit_date"], "2024-03-09");
        assert!(json.get("staff_id").is_none());
    }
}
