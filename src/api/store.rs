//! In-memory tables behind the stub backend.
//!
//! Nothing is persisted. `Store::seeded()` loads a fixed set of accounts and
//! records (see `fixtures`) that the contract tests and local development
//! rely on.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::api::types::{generate_token, hash_secret, Principal};
use crate::models::{
    AdminUser, AuthUser, Clinic, ClinicFilter, Diagnosis, Gender, NewDiagnosis, NewPatient,
    NewPrescription, NewStaff, NewVisit, Patient, Prescription, RegisterClinicRequest,
    RegisterPatientRequest, Staff, StaffRole, SystemStats, UpdatePatientProfile, UserType, Visit,
    VisitDetail,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Email already registered")]
    EmailTaken,
    #[error("Current password is incorrect")]
    WrongPassword,
    #[error("{0}")]
    Invalid(String),
}

/// Login account. Keyed by portal and lower-cased email.
struct Credential {
    principal: Principal,
    password_hash: [u8; 32],
}

#[derive(Default)]
pub struct Store {
    clinics: Vec<Clinic>,
    patients: Vec<Patient>,
    staff: Vec<Staff>,
    admins: Vec<AdminUser>,
    visits: Vec<Visit>,
    diagnoses: Vec<Diagnosis>,
    prescriptions: Vec<Prescription>,
    credentials: HashMap<(UserType, String), Credential>,
    tokens: HashMap<[u8; 32], Principal>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Store {
    // ── authentication ──────────────────────────────────────

    fn add_credential(&mut self, kind: UserType, email: &str, password: &str, id: Uuid) {
        self.credentials.insert(
            (kind, email.to_lowercase()),
            Credential {
                principal: Principal { kind, id },
                password_hash: hash_secret(password),
            },
        );
    }

    fn email_taken(&self, kind: UserType, email: &str) -> bool {
        self.credentials.contains_key(&(kind, email.to_lowercase()))
    }

    pub fn authenticate(&self, kind: UserType, email: &str, password: &str) -> Option<Principal> {
        self.credentials
            .get(&(kind, email.to_lowercase()))
            .filter(|c| c.password_hash == hash_secret(password))
            .map(|c| c.principal)
    }

    pub fn issue_token(&mut self, principal: Principal) -> String {
        let token = generate_token();
        self.tokens.insert(hash_secret(&token), principal);
        token
    }

    pub fn principal_for(&self, token: &str) -> Option<Principal> {
        self.tokens.get(&hash_secret(token)).copied()
    }

    pub fn change_password(
        &mut self,
        principal: Principal,
        current: &str,
        new: &str,
    ) -> Result<(), StoreError> {
        let credential = self
            .credentials
            .values_mut()
            .find(|c| c.principal == principal)
            .ok_or(StoreError::NotFound("Account"))?;
        if credential.password_hash != hash_secret(current) {
            return Err(StoreError::WrongPassword);
        }
        credential.password_hash = hash_secret(new);
        Ok(())
    }

    pub fn auth_user(&self, principal: Principal) -> Option<AuthUser> {
        match principal.kind {
            UserType::Patient => self.patient(principal.id).cloned().map(AuthUser::Patient),
            UserType::Clinic => self.clinic(principal.id).cloned().map(AuthUser::Clinic),
            UserType::Staff => self.staff_member(principal.id).cloned().map(AuthUser::Staff),
            UserType::Admin => self
                .admins
                .iter()
                .find(|a| a.id == principal.id)
                .cloned()
                .map(AuthUser::Admin),
        }
    }

    // ── registration ────────────────────────────────────────

    pub fn register_patient(&mut self, req: RegisterPatientRequest) -> Result<Patient, StoreError> {
        let email = req.email.to_lowercase();
        if self.email_taken(UserType::Patient, &email)
            || self.patients.iter().any(|p| p.email == email)
        {
            return Err(StoreError::EmailTaken);
        }
        if self.clinic(req.clinic_id).is_none() {
            return Err(StoreError::NotFound("Clinic"));
        }
        let patient = self.insert_patient(
            req.clinic_id,
            NewPatient {
                email: req.email,
                full_name: req.full_name,
                gender: req.gender,
                date_of_birth: req.date_of_birth,
                address: req.address,
                phone: req.phone,
            },
        );
        self.add_credential(UserType::Patient, &patient.email, &req.password, patient.id);
        Ok(patient)
    }

    pub fn register_clinic(&mut self, req: RegisterClinicRequest) -> Result<Clinic, StoreError> {
        if self.email_taken(UserType::Clinic, &req.email) {
            return Err(StoreError::EmailTaken);
        }
        let now = Utc::now();
        let clinic = Clinic {
            id: Uuid::new_v4(),
            name: req.name,
            address: req.address,
            contact_number: req.contact_number,
            district: req.district,
            created_at: now,
            updated_at: now,
        };
        self.add_credential(UserType::Clinic, &req.email, &req.password, clinic.id);
        self.clinics.push(clinic.clone());
        Ok(clinic)
    }

    // ── clinics ─────────────────────────────────────────────

    pub fn clinic(&self, id: Uuid) -> Option<&Clinic> {
        self.clinics.iter().find(|c| c.id == id)
    }

    pub fn search_clinics(&self, filter: &ClinicFilter) -> Vec<Clinic> {
        let mut clinics: Vec<Clinic> = self
            .clinics
            .iter()
            .filter(|c| {
                filter
                    .district
                    .as_deref()
                    .map_or(true, |d| c.district.eq_ignore_ascii_case(d))
            })
            .filter(|c| {
                filter.search.as_deref().map_or(true, |s| {
                    contains_ci(&c.name, s) || contains_ci(&c.district, s) || contains_ci(&c.address, s)
                })
            })
            .cloned()
            .collect();
        clinics.sort_by(|a, b| a.name.cmp(&b.name));
        clinics
    }

    // ── patients ────────────────────────────────────────────

    pub fn patient(&self, id: Uuid) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn patients_in_clinic(&self, clinic_id: Uuid, search: Option<&str>) -> Vec<Patient> {
        let mut patients: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| p.clinic_id == clinic_id)
            .filter(|p| {
                search.map_or(true, |s| {
                    contains_ci(&p.full_name, s) || contains_ci(&p.email, s) || contains_ci(&p.phone, s)
                })
            })
            .cloned()
            .collect();
        patients.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        patients
    }

    fn insert_patient(&mut self, clinic_id: Uuid, new: NewPatient) -> Patient {
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            email: new.email.to_lowercase(),
            full_name: new.full_name,
            gender: new.gender,
            date_of_birth: new.date_of_birth,
            address: new.address,
            phone: new.phone,
            clinic_id,
            created_at: now,
            updated_at: now,
        };
        self.patients.push(patient.clone());
        patient
    }

    pub fn add_patient(&mut self, clinic_id: Uuid, new: NewPatient) -> Result<Patient, StoreError> {
        let email = new.email.to_lowercase();
        if self.patients.iter().any(|p| p.email == email) {
            return Err(StoreError::EmailTaken);
        }
        Ok(self.insert_patient(clinic_id, new))
    }

    pub fn update_patient(
        &mut self,
        id: Uuid,
        update: UpdatePatientProfile,
    ) -> Result<Patient, StoreError> {
        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound("Patient"))?;
        if let Some(full_name) = update.full_name {
            patient.full_name = full_name;
        }
        if let Some(address) = update.address {
            patient.address = address;
        }
        if let Some(phone) = update.phone {
            patient.phone = phone;
        }
        patient.updated_at = Utc::now();
        Ok(patient.clone())
    }

    // ── staff ───────────────────────────────────────────────

    pub fn staff_member(&self, id: Uuid) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn staff_in_clinic(
        &self,
        clinic_id: Uuid,
        search: Option<&str>,
        role: Option<StaffRole>,
    ) -> Vec<Staff> {
        let mut staff: Vec<Staff> = self
            .staff
            .iter()
            .filter(|s| s.clinic_id == clinic_id)
            .filter(|s| role.map_or(true, |r| s.role == r))
            .filter(|s| {
                search.map_or(true, |q| contains_ci(&s.full_name, q) || contains_ci(&s.email, q))
            })
            .cloned()
            .collect();
        staff.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        staff
    }

    pub fn add_staff(&mut self, clinic_id: Uuid, new: NewStaff) -> Result<Staff, StoreError> {
        let email = new.email.to_lowercase();
        if self.staff.iter().any(|s| s.email == email) {
            return Err(StoreError::EmailTaken);
        }
        let password = match (new.role.requires_password(), new.password) {
            (true, None) => {
                return Err(StoreError::Invalid(format!(
                    "password is required for {} accounts",
                    new.role
                )))
            }
            (true, Some(p)) => Some(p),
            (false, _) => None,
        };

        let now = Utc::now();
        let staff = Staff {
            id: Uuid::new_v4(),
            full_name: new.full_name,
            role: new.role,
            phone: new.phone,
            email,
            clinic_id,
            created_at: now,
            updated_at: now,
        };
        if let Some(password) = password {
            self.add_credential(UserType::Staff, &staff.email, &password, staff.id);
        }
        self.staff.push(staff.clone());
        Ok(staff)
    }

    // ── visits ──────────────────────────────────────────────

    pub fn visit(&self, id: Uuid) -> Option<&Visit> {
        self.visits.iter().find(|v| v.id == id)
    }

    fn sorted_visits<'a>(visits: impl Iterator<Item = &'a Visit>) -> Vec<Visit> {
        let mut visits: Vec<Visit> = visits.cloned().collect();
        visits.sort_by(|a, b| {
            b.visit_date
                .cmp(&a.visit_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        visits
    }

    /// Newest first.
    pub fn visits_for_patient(&self, patient_id: Uuid) -> Vec<Visit> {
        Self::sorted_visits(self.visits.iter().filter(|v| v.patient_id == patient_id))
    }

    /// Newest first, optionally for one patient.
    pub fn visits_in_clinic(&self, clinic_id: Uuid, patient_id: Option<Uuid>) -> Vec<Visit> {
        Self::sorted_visits(
            self.visits
                .iter()
                .filter(|v| v.clinic_id == clinic_id)
                .filter(|v| patient_id.map_or(true, |p| v.patient_id == p)),
        )
    }

    pub fn add_visit(
        &mut self,
        clinic_id: Uuid,
        staff_id: Uuid,
        new: NewVisit,
    ) -> Result<Visit, StoreError> {
        match self.patient(new.patient_id) {
            Some(p) if p.clinic_id == clinic_id => {}
            _ => return Err(StoreError::NotFound("Patient")),
        }
        match self.staff_member(staff_id) {
            Some(s) if s.clinic_id == clinic_id => {}
            _ => return Err(StoreError::NotFound("Staff member")),
        }
        if new.reason.trim().is_empty() {
            return Err(StoreError::Invalid("reason is required".into()));
        }

        let visit = Visit {
            id: Uuid::new_v4(),
            patient_id: new.patient_id,
            staff_id,
            clinic_id,
            visit_date: new.visit_date,
            reason: new.reason,
            notes: new.notes,
            created_at: Utc::now(),
        };
        self.visits.push(visit.clone());
        Ok(visit)
    }

    pub fn visit_detail(&self, id: Uuid) -> Option<VisitDetail> {
        let visit = self.visit(id)?.clone();
        Some(VisitDetail {
            diagnoses: self.diagnoses_for(id),
            prescriptions: self.prescriptions_for(id),
            visit,
        })
    }

    pub fn diagnoses_for(&self, visit_id: Uuid) -> Vec<Diagnosis> {
        self.diagnoses
            .iter()
            .filter(|d| d.visit_id == visit_id)
            .cloned()
            .collect()
    }

    pub fn prescriptions_for(&self, visit_id: Uuid) -> Vec<Prescription> {
        self.prescriptions
            .iter()
            .filter(|p| p.visit_id == visit_id)
            .cloned()
            .collect()
    }

    /// All prescriptions across a patient's visits, newest visit first.
    pub fn prescriptions_for_patient(&self, patient_id: Uuid) -> Vec<Prescription> {
        self.visits_for_patient(patient_id)
            .iter()
            .flat_map(|v| self.prescriptions_for(v.id))
            .collect()
    }

    pub fn add_diagnosis(
        &mut self,
        visit_id: Uuid,
        new: NewDiagnosis,
    ) -> Result<Diagnosis, StoreError> {
        if self.visit(visit_id).is_none() {
            return Err(StoreError::NotFound("Visit"));
        }
        if new.diagnosis_code.trim().is_empty() {
            return Err(StoreError::Invalid("diagnosis_code is required".into()));
        }
        let diagnosis = Diagnosis {
            id: Uuid::new_v4(),
            visit_id,
            diagnosis_code: new.diagnosis_code,
            description: new.description,
            created_at: Utc::now(),
        };
        self.diagnoses.push(diagnosis.clone());
        Ok(diagnosis)
    }

    pub fn add_prescription(
        &mut self,
        visit_id: Uuid,
        new: NewPrescription,
    ) -> Result<Prescription, StoreError> {
        if self.visit(visit_id).is_none() {
            return Err(StoreError::NotFound("Visit"));
        }
        if new.duration_days < 1 {
            return Err(StoreError::Invalid(
                "duration_days must be at least 1".into(),
            ));
        }
        let prescription = Prescription {
            id: Uuid::new_v4(),
            visit_id,
            medication_name: new.medication_name,
            dosage: new.dosage,
            instructions: new.instructions,
            duration_days: new.duration_days,
            created_at: Utc::now(),
        };
        self.prescriptions.push(prescription.clone());
        Ok(prescription)
    }

    // ── admin ───────────────────────────────────────────────

    pub fn stats(&self) -> SystemStats {
        SystemStats {
            total_clinics: self.clinics.len() as u64,
            total_patients: self.patients.len() as u64,
            total_staff: self.staff.len() as u64,
            total_visits: self.visits.len() as u64,
            total_diagnoses: self.diagnoses.len() as u64,
            total_prescriptions: self.prescriptions.len() as u64,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Seed data
// ═══════════════════════════════════════════════════════════

/// Accounts present in `Store::seeded()`. Every account with a password
/// uses `PASSWORD`.
pub mod fixtures {
    pub const PASSWORD: &str = "password123";
    pub const ADMIN_EMAIL: &str = "admin@ruralcare.example";
    /// First clinic, which holds the 25 seeded patients.
    pub const CLINIC_EMAIL: &str = "chitedze@ruralcare.example";
    pub const DOCTOR_EMAIL: &str = "dr.mbewe@ruralcare.example";
    pub const NURSE_EMAIL: &str = "nurse.chirwa@ruralcare.example";
    /// Pharmacist: a staff record without a portal login.
    pub const PHARMACIST_EMAIL: &str = "pharm.nkhata@ruralcare.example";
    /// First seeded patient; has visits with diagnoses and prescriptions.
    pub const PATIENT_EMAIL: &str = "amina.phiri@ruralcare.example";
    /// Patients seeded into the first clinic.
    pub const CLINIC_PATIENTS: usize = 25;
}

const FIRST_NAMES: [&str; fixtures::CLINIC_PATIENTS] = [
    "Amina", "Blessings", "Chikondi", "Dalitso", "Esther", "Fatsani", "Grace", "Hastings",
    "Idah", "Jacob", "Kettie", "Limbani", "Madalitso", "Nomsa", "Owen", "Patience",
    "Precious", "Rhoda", "Sam", "Thoko", "Upile", "Vitumbiko", "Wezi", "Yamikani", "Zione",
];

const LAST_NAMES: [&str; 8] = [
    "Phiri", "Banda", "Mwale", "Tembo", "Zulu", "Kamanga", "Gondwe", "Nyirenda",
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl Store {
    /// Fixed fixture data: one admin, three clinics, 25 patients and four
    /// staff in the first clinic, and a handful of recorded visits.
    pub fn seeded() -> Self {
        use self::fixtures::*;

        let mut store = Store::default();

        let admin = AdminUser {
            id: Uuid::new_v4(),
            full_name: "District Health Officer".into(),
            email: ADMIN_EMAIL.into(),
        };
        store.add_credential(UserType::Admin, ADMIN_EMAIL, PASSWORD, admin.id);
        store.admins.push(admin);

        let clinic_specs = [
            ("Chitedze Community Clinic", "Chitedze, M12 road", "Lilongwe Rural", CLINIC_EMAIL),
            ("Dedza Boma Health Centre", "Boma, Dedza", "Dedza", "dedza@ruralcare.example"),
            ("Ntcheu Rural Clinic", "Ntcheu trading centre", "Ntcheu", "ntcheu@ruralcare.example"),
        ];
        let mut clinic_ids = Vec::new();
        for (i, (name, address, district, email)) in clinic_specs.into_iter().enumerate() {
            let registered = store.register_clinic(RegisterClinicRequest {
                name: name.into(),
                address: address.into(),
                contact_number: format!("+265 1 {:03} 100", 200 + i),
                district: district.into(),
                email: email.into(),
                password: PASSWORD.into(),
            });
            if let Ok(clinic) = registered {
                clinic_ids.push(clinic.id);
            }
        }
        let [home, second, ..] = clinic_ids[..] else {
            return store;
        };

        let staff_specs = [
            ("Dr. Kondwani Mbewe", StaffRole::Doctor, DOCTOR_EMAIL, Some(PASSWORD)),
            ("Mercy Chirwa", StaffRole::Nurse, NURSE_EMAIL, Some(PASSWORD)),
            (
                "Joseph Kachale",
                StaffRole::ClinicAdministrator,
                "admin.kachale@ruralcare.example",
                None,
            ),
            ("Ruth Nkhata", StaffRole::Pharmacist, PHARMACIST_EMAIL, None),
        ];
        let mut staff_ids = Vec::new();
        for (i, (name, role, email, password)) in staff_specs.into_iter().enumerate() {
            let added = store.add_staff(
                home,
                NewStaff {
                    full_name: name.into(),
                    role,
                    phone: format!("+265 999 10{i} 000"),
                    email: email.into(),
                    password: password.map(String::from),
                },
            );
            if let Ok(staff) = added {
                staff_ids.push(staff.id);
            }
        }
        let _ = store.add_staff(
            second,
            NewStaff {
                full_name: "Dr. Alinafe Kumwenda".into(),
                role: StaffRole::Doctor,
                phone: "+265 999 200 000".into(),
                email: "dr.kumwenda@ruralcare.example".into(),
                password: Some(PASSWORD.into()),
            },
        );

        let genders = [Gender::Female, Gender::Male, Gender::Female, Gender::Male, Gender::Other];
        let mut patient_ids = Vec::new();
        for (i, first) in FIRST_NAMES.iter().enumerate() {
            let last = LAST_NAMES[i % LAST_NAMES.len()];
            let request = RegisterPatientRequest {
                email: format!("{}.{}@ruralcare.example", first, last).to_lowercase(),
                password: PASSWORD.into(),
                full_name: format!("{first} {last}"),
                gender: genders[i % genders.len()],
                date_of_birth: date(1950 + (i as i32 * 3) % 70, (i as u32 % 12) + 1, (i as u32 % 28) + 1),
                address: format!("Village {}, Lilongwe Rural", i + 1),
                phone: format!("+265 888 {:03} {:03}", 100 + i, 500 + i),
                clinic_id: home,
            };
            if let Ok(patient) = store.register_patient(request) {
                patient_ids.push(patient.id);
            }
        }
        for (name, gender, dob) in [
            ("Chisomo Lungu", Gender::Male, date(1979, 4, 2)),
            ("Tadala Mvula", Gender::Female, date(2001, 9, 17)),
        ] {
            let _ = store.add_patient(
                second,
                NewPatient {
                    email: format!("{}@ruralcare.example", name.replace(' ', ".")).to_lowercase(),
                    full_name: name.into(),
                    gender,
                    date_of_birth: dob,
                    address: "Dedza".into(),
                    phone: "+265 999 300 000".into(),
                },
            );
        }

        store.seed_visits(home, &staff_ids, &patient_ids);
        store
    }

    fn seed_visits(&mut self, clinic_id: Uuid, staff_ids: &[Uuid], patient_ids: &[Uuid]) {
        let [doctor, nurse, ..] = staff_ids[..] else {
            return;
        };

        let visits = [
            (
                0,
                doctor,
                date(2024, 1, 12),
                "Fever and chills",
                Some("RDT positive"),
                ("B54", "Malaria, unspecified"),
                ("Artemether/Lumefantrine", "80/480mg", "Twice daily with food", 3),
            ),
            (
                0,
                nurse,
                date(2024, 3, 4),
                "Persistent cough",
                None,
                ("J06.9", "Acute upper respiratory infection"),
                ("Amoxicillin", "500mg", "Three times daily", 7),
            ),
            (
                1,
                doctor,
                date(2024, 2, 20),
                "Diarrhoea",
                Some("Mild dehydration"),
                ("A09", "Infectious gastroenteritis and colitis"),
                ("Oral Rehydration Salts", "1 sachet", "After each loose stool", 3),
            ),
            (
                2,
                doctor,
                date(2024, 2, 27),
                "Headache, dizziness",
                Some("BP 162/98"),
                ("I10", "Essential (primary) hypertension"),
                ("Amlodipine", "5mg", "Once daily in the morning", 30),
            ),
            (
                3,
                nurse,
                date(2024, 4, 8),
                "Burning urination",
                None,
                ("N39.0", "Urinary tract infection, site not specified"),
                ("Cotrimoxazole", "960mg", "Twice daily", 5),
            ),
            (
                4,
                doctor,
                date(2024, 5, 15),
                "Wheezing at night",
                None,
                ("J45.909", "Unspecified asthma, uncomplicated"),
                ("Salbutamol inhaler", "100mcg, 2 puffs", "When short of breath", 30),
            ),
        ];

        for (patient, staff_id, visit_date, reason, notes, diagnosis, prescription) in visits {
            let Some(&patient_id) = patient_ids.get(patient) else {
                continue;
            };
            let Ok(visit) = self.add_visit(
                clinic_id,
                staff_id,
                NewVisit {
                    patient_id,
                    staff_id: Some(staff_id),
                    visit_date,
                    reason: reason.into(),
                    notes: notes.map(String::from),
                },
            ) else {
                continue;
            };
            let _ = self.add_diagnosis(
                visit.id,
                NewDiagnosis {
                    diagnosis_code: diagnosis.0.into(),
                    description: diagnosis.1.into(),
                },
            );
            let _ = self.add_prescription(
                visit.id,
                NewPrescription {
                    medication_name: prescription.0.into(),
                    dosage: prescription.1.into(),
                    instructions: prescription.2.into(),
                    duration_days: prescription.3,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn home_clinic(store: &Store) -> Uuid {
        store
            .authenticate(UserType::Clinic, CLINIC_EMAIL, PASSWORD)
            .unwrap()
            .id
    }

    #[test]
    fn seeded_clinic_has_25_patients() {
        let store = Store::seeded();
        let clinic = home_clinic(&store);
        assert_eq!(store.patients_in_clinic(clinic, None).len(), CLINIC_PATIENTS);
    }

    #[test]
    fn seeded_emails_are_unique() {
        let store = Store::seeded();
        let mut emails: Vec<&str> = store.patients.iter().map(|p| p.email.as_str()).collect();
        let total = emails.len();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), total);
    }

    #[test]
    fn authenticate_is_per_portal_and_case_insensitive() {
        let store = Store::seeded();
        assert!(store
            .authenticate(UserType::Patient, "AMINA.PHIRI@ruralcare.example", PASSWORD)
            .is_some());
        assert!(store
            .authenticate(UserType::Admin, PATIENT_EMAIL, PASSWORD)
            .is_none());
        assert!(store
            .authenticate(UserType::Patient, PATIENT_EMAIL, "nope")
            .is_none());
    }

    #[test]
    fn staff_without_password_cannot_authenticate() {
        let store = Store::seeded();
        assert!(store
            .authenticate(UserType::Staff, PHARMACIST_EMAIL, PASSWORD)
            .is_none());
        assert!(store
            .authenticate(UserType::Staff, DOCTOR_EMAIL, PASSWORD)
            .is_some());
    }

    #[test]
    fn tokens_resolve_to_principal() {
        let mut store = Store::seeded();
        let principal = store
            .authenticate(UserType::Admin, ADMIN_EMAIL, PASSWORD)
            .unwrap();
        let token = store.issue_token(principal);
        assert_eq!(store.principal_for(&token), Some(principal));
        assert_eq!(store.principal_for("forged"), None);
        assert!(matches!(store.auth_user(principal), Some(AuthUser::Admin(_))));
    }

    #[test]
    fn search_is_case_insensitive() {
        let store = Store::seeded();
        let clinic = home_clinic(&store);
        let found = store.patients_in_clinic(clinic, Some("PHIRI"));
        assert!(!found.is_empty());
        assert!(found.iter().all(|p| p.full_name.contains("Phiri")));
    }

    #[test]
    fn visits_newest_first() {
        let store = Store::seeded();
        let patient = store
            .authenticate(UserType::Patient, PATIENT_EMAIL, PASSWORD)
            .unwrap();
        let visits = store.visits_for_patient(patient.id);
        assert_eq!(visits.len(), 2);
        assert!(visits[0].visit_date > visits[1].visit_date);
        assert_eq!(store.prescriptions_for_patient(patient.id).len(), 2);
    }

    #[test]
    fn visit_requires_patient_of_same_clinic() {
        let mut store = Store::seeded();
        let home = home_clinic(&store);
        let other_patient = store
            .patients
            .iter()
            .find(|p| p.clinic_id != home)
            .unwrap()
            .id;
        let doctor = store
            .authenticate(UserType::Staff, DOCTOR_EMAIL, PASSWORD)
            .unwrap()
            .id;
        let err = store
            .add_visit(
                home,
                doctor,
                NewVisit {
                    patient_id: other_patient,
                    staff_id: None,
                    visit_date: date(2024, 6, 1),
                    reason: "Check".into(),
                    notes: None,
                },
            )
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("Patient"));
    }

    #[test]
    fn change_password_requires_current() {
        let mut store = Store::seeded();
        let principal = store
            .authenticate(UserType::Patient, PATIENT_EMAIL, PASSWORD)
            .unwrap();
        assert_eq!(
            store.change_password(principal, "wrong", "newpass1"),
            Err(StoreError::WrongPassword)
        );
        store.change_password(principal, PASSWORD, "newpass1").unwrap();
        assert!(store
            .authenticate(UserType::Patient, PATIENT_EMAIL, "newpass1")
            .is_some());
    }

    #[test]
    fn clinic_filter_by_district() {
        let store = Store::seeded();
        let found = store.search_clinics(&ClinicFilter {
            district: Some("dedza".into()),
            search: None,
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Dedza Boma Health Centre");
    }
}
