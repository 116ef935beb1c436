//! Patient portal screens.

use std::time::Instant;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{Banner, BannerSlot, ViewState};
use crate::client::{ApiClient, ClientError};
use crate::models::{
    PageQuery, Paginated, Patient, Prescription, UpdatePatientProfile, Visit, VisitDetail,
};
use crate::validation::ProfileForm;

#[derive(Debug, Clone, PartialEq)]
pub struct PatientOverview {
    pub profile: Patient,
    /// Age in whole years on the day the dashboard was loaded.
    pub age: u32,
    pub recent_visits: Paginated<Visit>,
    pub prescriptions: Paginated<Prescription>,
}

pub struct PatientDashboard {
    client: ApiClient,
    pub state: ViewState<PatientOverview>,
}

impl PatientDashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ViewState::Loading,
        }
    }

    pub async fn load(&mut self, today: NaiveDate) {
        self.state = ViewState::Loading;
        let result = self.fetch_all(today).await;
        self.state = ViewState::from_result(result);
    }

    async fn fetch_all(&self, today: NaiveDate) -> Result<PatientOverview, ClientError> {
        let (profile, recent_visits, prescriptions) = tokio::try_join!(
            self.client.patient_profile(),
            self.client.patient_visits(PageQuery::new(1, 5)),
            self.client.patient_prescriptions(PageQuery::default()),
        )?;
        Ok(PatientOverview {
            age: profile.age_on(today),
            profile,
            recent_visits,
            prescriptions,
        })
    }
}

/// Paged visit list with the selected visit's detail alongside.
pub struct VisitHistory {
    client: ApiClient,
    pub query: PageQuery,
    pub visits: ViewState<Paginated<Visit>>,
    pub selected: Option<ViewState<VisitDetail>>,
}

impl VisitHistory {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            query: PageQuery::default(),
            visits: ViewState::Loading,
            selected: None,
        }
    }

    pub async fn load(&mut self) {
        self.visits = ViewState::Loading;
        let result = self.client.patient_visits(self.query).await;
        self.visits = ViewState::from_result(result);
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.query = PageQuery::new(page, self.query.per_page);
        self.load().await;
    }

    pub async fn select(&mut self, visit_id: Uuid) {
        self.selected = Some(ViewState::Loading);
        let result = self.client.patient_visit(visit_id).await;
        self.selected = Some(ViewState::from_result(result));
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}

/// Edit name, address and phone. The saved record replaces the loaded one.
pub struct ProfileEditor {
    client: ApiClient,
    pub profile: ViewState<Patient>,
    pub form: ProfileForm,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl ProfileEditor {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            profile: ViewState::Loading,
            form: ProfileForm::default(),
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub async fn load(&mut self) {
        self.profile = ViewState::Loading;
        let result = self.client.patient_profile().await;
        if let Ok(patient) = &result {
            self.form = ProfileForm::from_patient(patient);
        }
        self.profile = ViewState::from_result(result);
    }

    /// `None` until the profile has loaded, or when the form is rejected.
    pub fn begin_save(&mut self) -> Option<UpdatePatientProfile> {
        let current = self.profile.ready()?;
        let update = self.banner.accept(self.form.validate(current))?;
        self.saving = true;
        Some(update)
    }

    pub async fn send(&self, update: &UpdatePatientProfile) -> Result<Patient, ClientError> {
        self.client.update_patient_profile(update).await
    }

    /// The saved record replaces the loaded one.
    pub fn finish(&mut self, result: Result<Patient, ClientError>, now: Instant) -> bool {
        self.saving = false;
        let Some(patient) = self.banner.accept(result) else {
            return false;
        };
        self.form = ProfileForm::from_patient(&patient);
        self.profile = ViewState::Ready(patient);
        self.banner.show(Banner::success("Profile updated", now));
        true
    }

    pub async fn save(&mut self, now: Instant) -> bool {
        let Some(update) = self.begin_save() else {
            return false;
        };
        let result = self.send(&update).await;
        self.finish(result, now)
    }
}
