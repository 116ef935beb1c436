//! Synchronous form validation.
//!
//! Each form holds the raw strings a user typed. `validate` either produces
//! the typed request payload or the message shown in the form's error
//! banner. Invalid forms never reach the API client.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use uuid::Uuid;

use crate::config::{MAX_PER_PAGE, MIN_PASSWORD_LEN};
use crate::models::{
    ChangePasswordRequest, Gender, LoginRequest, NewDiagnosis, NewPatient, NewPrescription,
    NewStaff, NewVisit, Patient, RegisterClinicRequest, RegisterPatientRequest, StaffRole,
    SystemSettings, UpdatePatientProfile,
};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// ICD-10 shape: letter, two alphanumerics, optional dot and up to four more.
static ICD10_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9][0-9A-Z](\.[0-9A-Z]{1,4})?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please select a {0}")]
    Selection(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("{0} must be a valid date (YYYY-MM-DD)")]
    InvalidDate(&'static str),
    #[error("Date of birth cannot be in the future")]
    BirthDateInFuture,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("New password must differ from the current password")]
    PasswordUnchanged,
    #[error("Password is required for {0} accounts")]
    PasswordRequired(StaffRole),
    #[error("Diagnosis code must look like an ICD-10 code (e.g. J45.909)")]
    InvalidDiagnosisCode,
    #[error("Duration must be a whole number of days, at least 1")]
    InvalidDuration,
    #[error("No changes to save")]
    NothingToUpdate,
    #[error("{field} must be a whole number between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}

// ─── field helpers ──────────────────────────────────────────

fn required(value: &str, label: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(label));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn email(value: &str) -> Result<String, ValidationError> {
    let value = required(value, "Email")?;
    if !EMAIL.is_match(&value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(value.to_lowercase())
}

fn gender(value: &str) -> Result<Gender, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::Selection("gender"))
}

fn selected_id(value: &str, what: &'static str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| ValidationError::Selection(what))
}

fn date(value: &str, label: &'static str) -> Result<NaiveDate, ValidationError> {
    let value = required(value, label)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(label))
}

fn birth_date(value: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let dob = date(value, "Date of birth")?;
    if dob > today {
        return Err(ValidationError::BirthDateInFuture);
    }
    Ok(dob)
}

fn bounded(value: &str, field: &'static str, min: u32, max: u32) -> Result<u32, ValidationError> {
    match value.trim().parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(ValidationError::OutOfRange { field, min, max }),
    }
}

fn new_password(password: &str, confirm: &str) -> Result<String, ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(password.to_string())
}

// ─── forms ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let email = required(&self.email, "Email")?.to_lowercase();
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        Ok(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }
}

/// Patient self sign-up.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: String,
    pub date_of_birth: String,
    pub address: String,
    pub phone: String,
    pub clinic_id: String,
}

impl PatientRegistrationForm {
    pub fn validate(&self, today: NaiveDate) -> Result<RegisterPatientRequest, ValidationError> {
        let full_name = required(&self.full_name, "Full name")?;
        let email = email(&self.email)?;
        let gender = gender(&self.gender)?;
        let date_of_birth = birth_date(&self.date_of_birth, today)?;
        let address = required(&self.address, "Address")?;
        let phone = required(&self.phone, "Phone")?;
        let clinic_id = selected_id(&self.clinic_id, "clinic")?;
        let password = new_password(&self.password, &self.confirm_password)?;

        Ok(RegisterPatientRequest {
            email,
            password,
            full_name,
            gender,
            date_of_birth,
            address,
            phone,
            clinic_id,
        })
    }
}

/// Patient registered by clinic staff; no account password.
#[derive(Debug, Clone, Default)]
pub struct NewPatientForm {
    pub full_name: String,
    pub email: String,
    pub gender: String,
    pub date_of_birth: String,
    pub address: String,
    pub phone: String,
}

impl NewPatientForm {
    pub fn validate(&self, today: NaiveDate) -> Result<NewPatient, ValidationError> {
        Ok(NewPatient {
            full_name: required(&self.full_name, "Full name")?,
            email: email(&self.email)?,
            gender: gender(&self.gender)?,
            date_of_birth: birth_date(&self.date_of_birth, today)?,
            address: required(&self.address, "Address")?,
            phone: required(&self.phone, "Phone")?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClinicRegistrationForm {
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub district: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl ClinicRegistrationForm {
    pub fn validate(&self) -> Result<RegisterClinicRequest, ValidationError> {
        Ok(RegisterClinicRequest {
            name: required(&self.name, "Clinic name")?,
            address: required(&self.address, "Address")?,
            contact_number: required(&self.contact_number, "Contact number")?,
            district: required(&self.district, "District")?,
            email: email(&self.email)?,
            password: new_password(&self.password, &self.confirm_password)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaffForm {
    pub full_name: String,
    /// Wire form of the role (`Doctor`, `Clinic_Administrator`, ...).
    pub role: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl StaffForm {
    pub fn validate(&self) -> Result<NewStaff, ValidationError> {
        let full_name = required(&self.full_name, "Full name")?;
        let role: StaffRole = self
            .role
            .trim()
            .parse()
            .map_err(|_| ValidationError::Selection("role"))?;
        let phone = required(&self.phone, "Phone")?;
        let email = email(&self.email)?;

        let password = if role.requires_password() {
            if self.password.is_empty() {
                return Err(ValidationError::PasswordRequired(role));
            }
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(ValidationError::PasswordTooShort {
                    min: MIN_PASSWORD_LEN,
                });
            }
            Some(self.password.clone())
        } else {
            None
        };

        Ok(NewStaff {
            full_name,
            role,
            phone,
            email,
            password,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisitForm {
    pub patient_id: String,
    /// Only used by the clinic portal; blank for medical staff.
    pub staff_id: String,
    pub visit_date: String,
    pub reason: String,
    pub notes: String,
}

impl VisitForm {
    pub fn validate(&self) -> Result<NewVisit, ValidationError> {
        let patient_id = selected_id(&self.patient_id, "patient")?;
        let staff_id = match optional(&self.staff_id) {
            Some(id) => Some(selected_id(&id, "staff member")?),
            None => None,
        };
        Ok(NewVisit {
            patient_id,
            staff_id,
            visit_date: date(&self.visit_date, "Visit date")?,
            reason: required(&self.reason, "Reason for visit")?,
            notes: optional(&self.notes),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosisForm {
    pub diagnosis_code: String,
    pub description: String,
}

impl DiagnosisForm {
    pub fn validate(&self) -> Result<NewDiagnosis, ValidationError> {
        let code = required(&self.diagnosis_code, "Diagnosis code")?.to_uppercase();
        if !ICD10_CODE.is_match(&code) {
            return Err(ValidationError::InvalidDiagnosisCode);
        }
        Ok(NewDiagnosis {
            diagnosis_code: code,
            description: required(&self.description, "Description")?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrescriptionForm {
    pub medication_name: String,
    pub dosage: String,
    pub instructions: String,
    pub duration_days: String,
}

impl PrescriptionForm {
    pub fn validate(&self) -> Result<NewPrescription, ValidationError> {
        let medication_name = required(&self.medication_name, "Medication name")?;
        let dosage = required(&self.dosage, "Dosage")?;
        let instructions = required(&self.instructions, "Instructions")?;
        let duration_days = match self.duration_days.trim().parse::<u32>() {
            Ok(days) if days >= 1 => days,
            _ => return Err(ValidationError::InvalidDuration),
        };
        Ok(NewPrescription {
            medication_name,
            dosage,
            instructions,
            duration_days,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, ValidationError> {
        if self.current_password.is_empty() {
            return Err(ValidationError::Required("Current password"));
        }
        let new_password = new_password(&self.new_password, &self.confirm_password)?;
        if new_password == self.current_password {
            return Err(ValidationError::PasswordUnchanged);
        }
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password,
        })
    }
}

/// Editable patient profile fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub full_name: String,
    pub address: String,
    pub phone: String,
}

impl ProfileForm {
    /// Pre-filled from the current record.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            full_name: patient.full_name.clone(),
            address: patient.address.clone(),
            phone: patient.phone.clone(),
        }
    }

    /// Only fields that differ from `current` are sent.
    pub fn validate(&self, current: &Patient) -> Result<UpdatePatientProfile, ValidationError> {
        let full_name = required(&self.full_name, "Full name")?;
        let address = required(&self.address, "Address")?;
        let phone = required(&self.phone, "Phone")?;

        let update = UpdatePatientProfile {
            full_name: (full_name != current.full_name).then_some(full_name),
            address: (address != current.address).then_some(address),
            phone: (phone != current.phone).then_some(phone),
        };
        if update.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(update)
    }
}

/// Admin system settings, edited locally.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub system_name: String,
    pub support_email: String,
    pub default_page_size: String,
    pub session_timeout_minutes: String,
    pub allow_patient_self_registration: bool,
    pub maintenance_mode: bool,
}

impl SettingsForm {
    pub fn from_settings(settings: &SystemSettings) -> Self {
        Self {
            system_name: settings.system_name.clone(),
            support_email: settings.support_email.clone(),
            default_page_size: settings.default_page_size.to_string(),
            session_timeout_minutes: settings.session_timeout_minutes.to_string(),
            allow_patient_self_registration: settings.allow_patient_self_registration,
            maintenance_mode: settings.maintenance_mode,
        }
    }

    pub fn validate(&self) -> Result<SystemSettings, ValidationError> {
        Ok(SystemSettings {
            system_name: required(&self.system_name, "System name")?,
            support_email: email(&self.support_email)?,
            default_page_size: bounded(
                &self.default_page_size,
                "Default page size",
                1,
                MAX_PER_PAGE,
            )?,
            session_timeout_minutes: bounded(
                &self.session_timeout_minutes,
                "Session timeout",
                5,
                24 * 60,
            )?,
            allow_patient_self_registration: self.allow_patient_self_registration,
            maintenance_mode: self.maintenance_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn registration() -> PatientRegistrationForm {
        PatientRegistrationForm {
            full_name: "Amina Phiri".into(),
            email: "Amina@Example.org".into(),
            password: "secret123".into(),
            confirm_password: "secret123".into(),
            gender: "Female".into(),
            date_of_birth: "2000-06-15".into(),
            address: "Area 25, Lilongwe".into(),
            phone: "+265 999 000 111".into(),
            clinic_id: Uuid::new_v4().to_string(),
        }
    }

    fn staff_form(role: &str, password: &str) -> StaffForm {
        StaffForm {
            full_name: "Chikondi Mwale".into(),
            role: role.into(),
            phone: "0888 123 456".into(),
            email: "chikondi@example.org".into(),
            password: password.into(),
        }
    }

    #[test]
    fn valid_registration_builds_request() {
        let req = registration().validate(today()).unwrap();
        assert_eq!(req.email, "amina@example.org");
        assert_eq!(req.gender, Gender::Female);
        assert_eq!(req.date_of_birth, NaiveDate::from_ymd_opt(2000, 6, 15).unwrap());
    }

    #[test]
    fn empty_gender_asks_to_select_gender() {
        let form = PatientRegistrationForm {
            gender: String::new(),
            ..registration()
        };
        let err = form.validate(today()).unwrap_err();
        assert_eq!(err.to_string(), "Please select a gender");
    }

    #[test]
    fn password_mismatch_and_length() {
        let form = PatientRegistrationForm {
            confirm_password: "secret124".into(),
            ..registration()
        };
        assert_eq!(form.validate(today()).unwrap_err(), ValidationError::PasswordMismatch);

        let form = PatientRegistrationForm {
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..registration()
        };
        assert_eq!(
            form.validate(today()).unwrap_err().to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn future_birth_date_rejected() {
        let form = PatientRegistrationForm {
            date_of_birth: "2030-01-01".into(),
            ..registration()
        };
        assert_eq!(form.validate(today()).unwrap_err(), ValidationError::BirthDateInFuture);
    }

    #[test]
    fn malformed_email_rejected() {
        let form = NewPatientForm {
            full_name: "Yohane Banda".into(),
            email: "yohane.example.org".into(),
            gender: "Male".into(),
            date_of_birth: "1980-01-01".into(),
            address: "Dedza".into(),
            phone: "0999".into(),
        };
        assert_eq!(form.validate(today()).unwrap_err(), ValidationError::InvalidEmail);
    }

    #[test]
    fn missing_clinic_selection() {
        let form = PatientRegistrationForm {
            clinic_id: String::new(),
            ..registration()
        };
        assert_eq!(
            form.validate(today()).unwrap_err().to_string(),
            "Please select a clinic"
        );
    }

    #[test]
    fn doctor_without_password_is_rejected() {
        let err = staff_form("Doctor", "").validate().unwrap_err();
        assert_eq!(err, ValidationError::PasswordRequired(StaffRole::Doctor));
        assert_eq!(err.to_string(), "Password is required for Doctor accounts");
    }

    #[test]
    fn nurse_needs_long_enough_password() {
        let err = staff_form("Nurse", "abc").validate().unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooShort { min: 6 });
    }

    #[test]
    fn administrator_does_not_need_password() {
        let staff = staff_form("Clinic_Administrator", "").validate().unwrap();
        assert_eq!(staff.role, StaffRole::ClinicAdministrator);
        assert_eq!(staff.password, None);
    }

    #[test]
    fn pharmacist_password_is_dropped() {
        let staff = staff_form("Pharmacist", "ignored-secret").validate().unwrap();
        assert_eq!(staff.password, None);
    }

    #[test]
    fn unknown_role_asks_for_selection() {
        let err = staff_form("", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please select a role");
    }

    #[test]
    fn diagnosis_code_is_normalized() {
        let form = DiagnosisForm {
            diagnosis_code: " j45.909 ".into(),
            description: "Asthma".into(),
        };
        assert_eq!(form.validate().unwrap().diagnosis_code, "J45.909");

        for code in ["B54", "A09", "E11.9"] {
            let form = DiagnosisForm {
                diagnosis_code: code.into(),
                description: "x".into(),
            };
            assert!(form.validate().is_ok(), "{code} should be accepted");
        }
    }

    #[test]
    fn diagnosis_code_shape_enforced() {
        for code in ["45.9", "J4", "J45.", "J45.12345", "malaria"] {
            let form = DiagnosisForm {
                diagnosis_code: code.into(),
                description: "x".into(),
            };
            assert_eq!(
                form.validate().unwrap_err(),
                ValidationError::InvalidDiagnosisCode,
                "{code} should be rejected"
            );
        }
    }

    #[test]
    fn prescription_duration_at_least_one_day() {
        let mut form = PrescriptionForm {
            medication_name: "Amoxicillin".into(),
            dosage: "500mg".into(),
            instructions: "Three times daily after meals".into(),
            duration_days: "0".into(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidDuration);
        form.duration_days = "seven".into();
        assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidDuration);
        form.duration_days = " 7 ".into();
        assert_eq!(form.validate().unwrap().duration_days, 7);
    }

    #[test]
    fn visit_form_optional_staff_and_notes() {
        let form = VisitForm {
            patient_id: Uuid::new_v4().to_string(),
            staff_id: String::new(),
            visit_date: "2024-03-02".into(),
            reason: "Fever".into(),
            notes: "  ".into(),
        };
        let visit = form.validate().unwrap();
        assert_eq!(visit.staff_id, None);
        assert_eq!(visit.notes, None);

        let bad = VisitForm {
            visit_date: "02/03/2024".into(),
            ..form
        };
        assert_eq!(
            bad.validate().unwrap_err().to_string(),
            "Visit date must be a valid date (YYYY-MM-DD)"
        );
    }

    #[test]
    fn change_password_rules() {
        let form = ChangePasswordForm {
            current_password: "oldpass1".into(),
            new_password: "newpass1".into(),
            confirm_password: "newpass2".into(),
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Passwords do not match");

        let same = ChangePasswordForm {
            current_password: "oldpass1".into(),
            new_password: "oldpass1".into(),
            confirm_password: "oldpass1".into(),
        };
        assert_eq!(same.validate().unwrap_err(), ValidationError::PasswordUnchanged);
    }

    #[test]
    fn profile_form_sends_only_changes() {
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            email: "amina@example.org".into(),
            full_name: "Amina Phiri".into(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
            address: "Area 25".into(),
            phone: "0999".into(),
            clinic_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        let mut form = ProfileForm::from_patient(&patient);
        assert_eq!(form.validate(&patient).unwrap_err(), ValidationError::NothingToUpdate);

        form.phone = "0888".into();
        let update = form.validate(&patient).unwrap();
        assert_eq!(update.phone.as_deref(), Some("0888"));
        assert!(update.full_name.is_none());
        assert!(update.address.is_none());
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: " ".into(),
            password: "x".into(),
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Email is required");
        let form = LoginForm {
            email: "a@b.co".into(),
            password: String::new(),
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Password is required");
    }

    #[test]
    fn settings_page_size_bounded() {
        let mut form = SettingsForm::from_settings(&SystemSettings::default());
        assert!(form.validate().is_ok());

        form.default_page_size = "0".into();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Default page size must be a whole number between 1 and 100"
        );
        form.default_page_size = "ten".into();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::OutOfRange { field: "Default page size", .. })
        ));
    }
}
