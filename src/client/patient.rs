//! Patient portal: the signed-in patient's own records.

use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{
    AuthUser, PageQuery, Paginated, Patient, Prescription, UpdatePatientProfile, Visit,
    VisitDetail,
};

/// Patient portal lists take no filters.
#[derive(serde::Serialize)]
struct NoFilter {}

impl ApiClient {
    /// `GET /patient/profile`
    pub async fn patient_profile(&self) -> Result<Patient, ClientError> {
        self.get("/patient/profile").await
    }

    /// `PUT /patient/profile`: the session's principal is updated in place.
    pub async fn update_patient_profile(
        &self,
        update: &UpdatePatientProfile,
    ) -> Result<Patient, ClientError> {
        let patient: Patient = self.put("/patient/profile", update).await?;
        self.session().set_user(AuthUser::Patient(patient.clone()));
        Ok(patient)
    }

    /// `GET /patient/visits`
    pub async fn patient_visits(&self, page: PageQuery) -> Result<Paginated<Visit>, ClientError> {
        self.get_page("/patient/visits", page, &NoFilter {}).await
    }

    /// `GET /patient/visits/:id`
    pub async fn patient_visit(&self, visit_id: Uuid) -> Result<VisitDetail, ClientError> {
        self.get(&format!("/patient/visits/{visit_id}")).await
    }

    /// `GET /patient/prescriptions`
    pub async fn patient_prescriptions(
        &self,
        page: PageQuery,
    ) -> Result<Paginated<Prescription>, ClientError> {
        self.get_page("/patient/prescriptions", page, &NoFilter {})
            .await
    }
}
