//! Medical portal: doctors and nurses recording visits, diagnoses and
//! prescriptions for patients of their clinic.

use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{
    Diagnosis, NewDiagnosis, NewPrescription, NewVisit, PageQuery, Paginated, Patient,
    PatientFilter, Prescription, Visit, VisitDetail, VisitFilter,
};

impl ApiClient {
    /// `GET /medical/patients?page&per_page&search`
    pub async fn medical_patients(
        &self,
        page: PageQuery,
        filter: &PatientFilter,
    ) -> Result<Paginated<Patient>, ClientError> {
        self.get_page("/medical/patients", page, filter).await
    }

    /// `GET /medical/visits?page&per_page&patient_id`
    pub async fn medical_visits(
        &self,
        page: PageQuery,
        filter: &VisitFilter,
    ) -> Result<Paginated<Visit>, ClientError> {
        self.get_page("/medical/visits", page, filter).await
    }

    /// `POST /medical/visits`: recorded under the signed-in staff member.
    pub async fn create_visit(&self, visit: &NewVisit) -> Result<Visit, ClientError> {
        self.post("/medical/visits", visit).await
    }

    /// `GET /medical/visits/:id`
    pub async fn visit_detail(&self, visit_id: Uuid) -> Result<VisitDetail, ClientError> {
        self.get(&format!("/medical/visits/{visit_id}")).await
    }

    /// `GET /medical/visits/:id/diagnoses`
    pub async fn visit_diagnoses(&self, visit_id: Uuid) -> Result<Vec<Diagnosis>, ClientError> {
        self.get(&format!("/medical/visits/{visit_id}/diagnoses"))
            .await
    }

    /// `POST /medical/visits/:id/diagnoses`
    pub async fn add_diagnosis(
        &self,
        visit_id: Uuid,
        diagnosis: &NewDiagnosis,
    ) -> Result<Diagnosis, ClientError> {
        self.post(&format!("/medical/visits/{visit_id}/diagnoses"), diagnosis)
            .await
    }

    /// `GET /medical/visits/:id/prescriptions`
    pub async fn visit_prescriptions(
        &self,
        visit_id: Uuid,
    ) -> Result<Vec<Prescription>, ClientError> {
        self.get(&format!("/medical/visits/{visit_id}/prescriptions"))
            .await
    }

    /// `POST /medical/visits/:id/prescriptions`
    pub async fn add_prescription(
        &self,
        visit_id: Uuid,
        prescription: &NewPrescription,
    ) -> Result<Prescription, ClientError> {
        self.post(
            &format!("/medical/visits/{visit_id}/prescriptions"),
            prescription,
        )
        .await
    }
}
