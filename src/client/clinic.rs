//! Clinic portal: the signed-in clinic's patients, staff and visits.

use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{
    Clinic, NewPatient, NewStaff, NewVisit, PageQuery, Paginated, Patient, PatientFilter, Staff,
    StaffFilter, Visit, VisitFilter,
};

impl ApiClient {
    /// `GET /clinic/profile`
    pub async fn clinic_profile(&self) -> Result<Clinic, ClientError> {
        self.get("/clinic/profile").await
    }

    /// `GET /clinic/patients?page&per_page&search`
    pub async fn clinic_patients(
        &self,
        page: PageQuery,
        filter: &PatientFilter,
    ) -> Result<Paginated<Patient>, ClientError> {
        self.get_page("/clinic/patients", page, filter).await
    }

    /// `GET /clinic/patients/:id`
    pub async fn clinic_patient(&self, patient_id: Uuid) -> Result<Patient, ClientError> {
        self.get(&format!("/clinic/patients/{patient_id}")).await
    }

    /// `POST /clinic/patients`
    pub async fn create_patient(&self, patient: &NewPatient) -> Result<Patient, ClientError> {
        self.post("/clinic/patients", patient).await
    }

    /// `GET /clinic/staff?page&per_page&search&role`
    pub async fn clinic_staff(
        &self,
        page: PageQuery,
        filter: &StaffFilter,
    ) -> Result<Paginated<Staff>, ClientError> {
        self.get_page("/clinic/staff", page, filter).await
    }

    /// `POST /clinic/staff`
    pub async fn create_staff(&self, staff: &NewStaff) -> Result<Staff, ClientError> {
        self.post("/clinic/staff", staff).await
    }

    /// `GET /clinic/visits?page&per_page&patient_id`
    pub async fn clinic_visits(
        &self,
        page: PageQuery,
        filter: &VisitFilter,
    ) -> Result<Paginated<Visit>, ClientError> {
        self.get_page("/clinic/visits", page, filter).await
    }

    /// `POST /clinic/visits`: `staff_id` is required here.
    pub async fn create_clinic_visit(&self, visit: &NewVisit) -> Result<Visit, ClientError> {
        self.post("/clinic/visits", visit).await
    }
}
