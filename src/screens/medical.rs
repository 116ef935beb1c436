//! Visit recording screens for doctors and nurses. `VisitLog` also serves
//! the clinic portal, where the attending staff member is picked by hand.

use std::time::Instant;

use uuid::Uuid;

use super::{Banner, BannerSlot, Portal, ViewState};
use crate::client::{ApiClient, ClientError};
use crate::models::{
    Diagnosis, NewDiagnosis, NewPrescription, NewVisit, PageQuery, Paginated, Prescription, Visit,
    VisitDetail, VisitFilter,
};
use crate::validation::{DiagnosisForm, PrescriptionForm, VisitForm};

/// Visits of the signed-in clinic, optionally for one patient, plus the
/// new-visit form.
pub struct VisitLog {
    client: ApiClient,
    portal: Portal,
    pub filter: VisitFilter,
    pub query: PageQuery,
    pub state: ViewState<Paginated<Visit>>,
    pub form: VisitForm,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl VisitLog {
    pub fn new(client: ApiClient, portal: Portal) -> Self {
        Self {
            client,
            portal,
            filter: VisitFilter::default(),
            query: PageQuery::default(),
            state: ViewState::Loading,
            form: VisitForm::default(),
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub async fn load(&mut self) {
        self.state = ViewState::Loading;
        let result = match self.portal {
            Portal::Clinic => self.client.clinic_visits(self.query, &self.filter).await,
            Portal::Medical => self.client.medical_visits(self.query, &self.filter).await,
        };
        self.state = ViewState::from_result(result);
    }

    pub async fn filter_by_patient(&mut self, patient_id: Option<Uuid>) {
        self.filter.patient_id = patient_id;
        self.query = PageQuery::new(1, self.query.per_page);
        self.load().await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.query = PageQuery::new(page, self.query.per_page);
        self.load().await;
    }

    pub fn begin_record_visit(&mut self) -> Option<NewVisit> {
        let visit = self.banner.accept(self.form.validate())?;
        self.saving = true;
        Some(visit)
    }

    /// Posts to the portal's visit endpoint.
    pub async fn send(&self, visit: &NewVisit) -> Result<Visit, ClientError> {
        match self.portal {
            Portal::Clinic => self.client.create_clinic_visit(visit).await,
            Portal::Medical => self.client.create_visit(visit).await,
        }
    }

    pub async fn finish(&mut self, result: Result<Visit, ClientError>, now: Instant) -> Option<Visit> {
        self.saving = false;
        let visit = self.banner.accept(result)?;
        self.banner.show(Banner::success("Visit recorded", now));
        self.form = VisitForm::default();
        self.load().await;
        Some(visit)
    }

    pub async fn record_visit(&mut self, now: Instant) -> Option<Visit> {
        let visit = self.begin_record_visit()?;
        let result = self.send(&visit).await;
        self.finish(result, now).await
    }
}

/// One visit's detail with the diagnosis and prescription forms. Each
/// successful addition re-fetches the detail.
pub struct VisitWorkspace {
    client: ApiClient,
    visit_id: Uuid,
    pub detail: ViewState<VisitDetail>,
    pub diagnosis_form: DiagnosisForm,
    pub prescription_form: PrescriptionForm,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl VisitWorkspace {
    pub fn new(client: ApiClient, visit_id: Uuid) -> Self {
        Self {
            client,
            visit_id,
            detail: ViewState::Loading,
            diagnosis_form: DiagnosisForm::default(),
            prescription_form: PrescriptionForm::default(),
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub fn visit_id(&self) -> Uuid {
        self.visit_id
    }

    pub async fn load(&mut self) {
        self.detail = ViewState::Loading;
        let result = self.client.visit_detail(self.visit_id).await;
        self.detail = ViewState::from_result(result);
    }

    pub fn begin_diagnosis(&mut self) -> Option<NewDiagnosis> {
        let diagnosis = self.banner.accept(self.diagnosis_form.validate())?;
        self.saving = true;
        Some(diagnosis)
    }

    pub async fn send_diagnosis(&self, diagnosis: &NewDiagnosis) -> Result<Diagnosis, ClientError> {
        self.client.add_diagnosis(self.visit_id, diagnosis).await
    }

    pub async fn finish_diagnosis(
        &mut self,
        result: Result<Diagnosis, ClientError>,
        now: Instant,
    ) -> bool {
        self.saving = false;
        let Some(diagnosis) = self.banner.accept(result) else {
            return false;
        };
        self.banner.show(Banner::success(
            format!("Diagnosis {} added", diagnosis.diagnosis_code),
            now,
        ));
        self.diagnosis_form = DiagnosisForm::default();
        self.load().await;
        true
    }

    pub async fn add_diagnosis(&mut self, now: Instant) -> bool {
        let Some(diagnosis) = self.begin_diagnosis() else {
            return false;
        };
        let result = self.send_diagnosis(&diagnosis).await;
        self.finish_diagnosis(result, now).await
    }

    pub fn begin_prescription(&mut self) -> Option<NewPrescription> {
        let prescription = self.banner.accept(self.prescription_form.validate())?;
        self.saving = true;
        Some(prescription)
    }

    pub async fn send_prescription(
        &self,
        prescription: &NewPrescription,
    ) -> Result<Prescription, ClientError> {
        self.client
            .add_prescription(self.visit_id, prescription)
            .await
    }

    pub async fn finish_prescription(
        &mut self,
        result: Result<Prescription, ClientError>,
        now: Instant,
    ) -> bool {
        self.saving = false;
        let Some(prescription) = self.banner.accept(result) else {
            return false;
        };
        self.banner.show(Banner::success(
            format!("{} prescribed", prescription.medication_name),
            now,
        ));
        self.prescription_form = PrescriptionForm::default();
        self.load().await;
        true
    }

    pub async fn add_prescription(&mut self, now: Instant) -> bool {
        let Some(prescription) = self.begin_prescription() else {
            return false;
        };
        let result = self.send_prescription(&prescription).await;
        self.finish_prescription(result, now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::store::fixtures;
    use crate::client::tests::{signed_in, stub};
    use crate::models::{PatientFilter, StaffFilter, StaffRole, UserType};

    #[tokio::test]
    async fn doctor_records_visit_and_treatment() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Staff, fixtures::DOCTOR_EMAIL).await;
        let patient = client
            .medical_patients(PageQuery::default(), &PatientFilter::default())
            .await
            .unwrap()
            .data
            .remove(0);

        let mut log = VisitLog::new(client.clone(), Portal::Medical);
        log.filter_by_patient(Some(patient.id)).await;
        let before = log.state.ready().unwrap().total;

        log.form = VisitForm {
            patient_id: patient.id.to_string(),
            visit_date: "2024-06-10".into(),
            reason: "Follow-up".into(),
            ..Default::default()
        };
        let now = Instant::now();
        let visit = log.record_visit(now).await.unwrap();
        assert_eq!(log.state.ready().unwrap().total, before + 1);
        assert_eq!(log.banner.visible(now).unwrap().message, "Visit recorded");

        let mut workspace = VisitWorkspace::new(client, visit.id);
        workspace.load().await;
        assert!(workspace.detail.ready().unwrap().diagnoses.is_empty());

        workspace.diagnosis_form = DiagnosisForm {
            diagnosis_code: "b54".into(),
            description: "Malaria, unspecified".into(),
        };
        let diagnosis = workspace.begin_diagnosis().unwrap();
        assert!(workspace.saving);
        let (result, in_flight) = tokio::join!(workspace.send_diagnosis(&diagnosis), async {
            workspace.saving
        });
        assert!(in_flight);
        assert!(workspace.finish_diagnosis(result, now).await);
        assert!(!workspace.saving);
        workspace.prescription_form = PrescriptionForm {
            medication_name: "Paracetamol".into(),
            dosage: "500mg".into(),
            instructions: "Every 6 hours".into(),
            duration_days: "3".into(),
        };
        assert!(workspace.add_prescription(now).await);

        let detail = workspace.detail.ready().unwrap();
        assert_eq!(detail.diagnoses[0].diagnosis_code, "B54");
        assert_eq!(detail.prescriptions[0].duration_days, 3);

        server.shutdown();
    }

    #[tokio::test]
    async fn invalid_duration_stays_local() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Staff, fixtures::NURSE_EMAIL).await;
        let mut log = VisitLog::new(client.clone(), Portal::Medical);
        log.load().await;
        let visit_id = log.state.ready().unwrap().data[0].id;

        let mut workspace = VisitWorkspace::new(client, visit_id);
        workspace.load().await;
        let requests_before = server.context().access_log().len();

        workspace.prescription_form = PrescriptionForm {
            medication_name: "Amoxicillin".into(),
            dosage: "250mg".into(),
            instructions: "Twice daily".into(),
            duration_days: "0".into(),
        };
        assert!(!workspace.add_prescription(Instant::now()).await);
        assert!(!workspace.saving);
        assert_eq!(
            workspace.banner.error(),
            Some("Duration must be a whole number of days, at least 1")
        );
        assert_eq!(server.context().access_log().len(), requests_before);

        server.shutdown();
    }

    #[tokio::test]
    async fn clinic_portal_visit_needs_staff_member() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Clinic, fixtures::CLINIC_EMAIL).await;
        let doctor = client
            .clinic_staff(
                PageQuery::default(),
                &StaffFilter {
                    role: Some(StaffRole::Doctor),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .data
            .remove(0);
        let patient = client
            .clinic_patients(PageQuery::default(), &PatientFilter::default())
            .await
            .unwrap()
            .data
            .remove(0);

        let mut log = VisitLog::new(client, Portal::Clinic);
        log.form = VisitForm {
            patient_id: patient.id.to_string(),
            visit_date: "2024-06-11".into(),
            reason: "Antenatal check".into(),
            ..Default::default()
        };
        assert!(log.record_visit(Instant::now()).await.is_none());
        assert_eq!(log.banner.error(), Some("staff_id is required"));

        log.form.staff_id = doctor.id.to_string();
        let visit = log.record_visit(Instant::now()).await.unwrap();
        assert_eq!(visit.staff_id, doctor.id);

        server.shutdown();
    }
}
