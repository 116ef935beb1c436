//! Clinic portal screens. `PatientDirectory` is shared with the medical
//! portal.

use std::time::Instant;

use chrono::NaiveDate;

use super::{Banner, BannerSlot, Generation, Portal, RequestTracker, ViewState};
use crate::client::{ApiClient, ClientError};
use crate::models::{
    search_term, AnalyticsReport, AuthUser, Clinic, NewPatient, NewStaff, PageQuery, Paginated, Patient,
    PatientFilter, Staff, StaffFilter, StaffRole, UserType,
};
use crate::validation::{NewPatientForm, StaffForm};

// ═══════════════════════════════════════════════════════════
// Dashboard
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct ClinicOverview {
    pub clinic: Clinic,
    pub analytics: AnalyticsReport,
    pub staff: Paginated<Staff>,
    pub patients: Paginated<Patient>,
}

pub struct ClinicDashboard {
    client: ApiClient,
    pub state: ViewState<ClinicOverview>,
}

impl ClinicDashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ViewState::Loading,
        }
    }

    pub async fn load(&mut self) {
        self.state = ViewState::Loading;
        let result = self.fetch_all().await;
        self.state = ViewState::from_result(result);
    }

    async fn fetch_all(&self) -> Result<ClinicOverview, ClientError> {
        let Some(AuthUser::Clinic(signed_in)) = self.client.session().user() else {
            return Err(ClientError::NotSignedIn(UserType::Clinic));
        };
        let clinic_id = signed_in.id;

        let staff_filter = StaffFilter::default();
        let patient_filter = PatientFilter::default();
        let (clinic, analytics, staff, patients) = tokio::try_join!(
            self.client.clinic_profile(),
            self.client.clinic_analytics(clinic_id),
            self.client.clinic_staff(PageQuery::default(), &staff_filter),
            self.client.clinic_patients(PageQuery::default(), &patient_filter),
        )?;
        Ok(ClinicOverview {
            clinic,
            analytics,
            staff,
            patients,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Patient directory
// ═══════════════════════════════════════════════════════════

/// A page fetch issued by the directory, tagged with its generation.
#[derive(Debug, Clone)]
pub struct DirectoryRequest {
    generation: Generation,
    query: PageQuery,
    filter: PatientFilter,
}

#[derive(Debug)]
pub struct DirectoryResponse {
    generation: Generation,
    result: Result<Paginated<Patient>, ClientError>,
}

/// Searchable, paged patient list.
///
/// Fetches are split into `begin_*` (records the generation), `fetch` and
/// `apply`, so overlapping searches can be in flight at once. Only the
/// response to the most recently issued request is applied.
pub struct PatientDirectory {
    client: ApiClient,
    portal: Portal,
    tracker: RequestTracker,
    pub search: String,
    pub query: PageQuery,
    pub state: ViewState<Paginated<Patient>>,
    /// A fetch is in flight while earlier results are still shown.
    pub searching: bool,
}

impl PatientDirectory {
    pub fn new(client: ApiClient, portal: Portal) -> Self {
        Self {
            client,
            portal,
            tracker: RequestTracker::default(),
            search: String::new(),
            query: PageQuery::default(),
            state: ViewState::Loading,
            searching: false,
        }
    }

    pub fn portal(&self) -> Portal {
        self.portal
    }

    fn begin(&mut self) -> DirectoryRequest {
        if self.state.ready().is_some() {
            self.searching = true;
        } else {
            self.state = ViewState::Loading;
        }
        DirectoryRequest {
            generation: self.tracker.issue(),
            query: self.query,
            filter: PatientFilter {
                search: search_term(&self.search),
            },
        }
    }

    /// New search term; back to the first page.
    pub fn begin_search(&mut self, input: &str) -> DirectoryRequest {
        self.search = input.to_string();
        self.query = PageQuery::new(1, self.query.per_page);
        self.begin()
    }

    pub fn begin_page(&mut self, page: u32) -> DirectoryRequest {
        self.query = PageQuery::new(page, self.query.per_page);
        self.begin()
    }

    pub fn begin_reload(&mut self) -> DirectoryRequest {
        self.begin()
    }

    pub async fn fetch(&self, request: DirectoryRequest) -> DirectoryResponse {
        let result = match self.portal {
            Portal::Clinic => {
                self.client
                    .clinic_patients(request.query, &request.filter)
                    .await
            }
            Portal::Medical => {
                self.client
                    .medical_patients(request.query, &request.filter)
                    .await
            }
        };
        DirectoryResponse {
            generation: request.generation,
            result,
        }
    }

    /// Apply a response unless a newer request has been issued since.
    /// Returns whether it was applied.
    pub fn apply(&mut self, response: DirectoryResponse) -> bool {
        if !self.tracker.is_current(response.generation) {
            tracing::debug!("Dropping stale patient directory response");
            return false;
        }
        self.searching = false;
        self.state = ViewState::from_result(response.result);
        true
    }

    pub async fn load(&mut self) {
        let request = self.begin_reload();
        let response = self.fetch(request).await;
        self.apply(response);
    }

    pub async fn search(&mut self, input: &str) {
        let request = self.begin_search(input);
        let response = self.fetch(request).await;
        self.apply(response);
    }

    pub async fn go_to_page(&mut self, page: u32) {
        let request = self.begin_page(page);
        let response = self.fetch(request).await;
        self.apply(response);
    }
}

// ═══════════════════════════════════════════════════════════
// Forms
// ═══════════════════════════════════════════════════════════

/// Register a walk-in patient, then refresh the directory.
pub struct PatientIntake {
    client: ApiClient,
    pub form: NewPatientForm,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl PatientIntake {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: NewPatientForm::default(),
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub fn begin_submit(&mut self, today: NaiveDate) -> Option<NewPatient> {
        let patient = self.banner.accept(self.form.validate(today))?;
        self.saving = true;
        Some(patient)
    }

    pub async fn send(&self, patient: &NewPatient) -> Result<Patient, ClientError> {
        self.client.create_patient(patient).await
    }

    /// On success the form is reset and `directory` reloaded.
    pub async fn finish(
        &mut self,
        result: Result<Patient, ClientError>,
        now: Instant,
        directory: &mut PatientDirectory,
    ) -> Option<Patient> {
        self.saving = false;
        let patient = self.banner.accept(result)?;
        self.banner.show(Banner::success(
            format!("Patient {} registered successfully", patient.full_name),
            now,
        ));
        self.form = NewPatientForm::default();
        directory.load().await;
        Some(patient)
    }

    pub async fn submit(
        &mut self,
        today: NaiveDate,
        now: Instant,
        directory: &mut PatientDirectory,
    ) -> Option<Patient> {
        let patient = self.begin_submit(today)?;
        let result = self.send(&patient).await;
        self.finish(result, now, directory).await
    }
}

/// Staff list with a role filter and the add-staff form.
pub struct StaffRoster {
    client: ApiClient,
    pub filter: StaffFilter,
    pub query: PageQuery,
    pub state: ViewState<Paginated<Staff>>,
    pub form: StaffForm,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl StaffRoster {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            filter: StaffFilter::default(),
            query: PageQuery::default(),
            state: ViewState::Loading,
            form: StaffForm::default(),
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub async fn load(&mut self) {
        self.state = ViewState::Loading;
        let result = self.client.clinic_staff(self.query, &self.filter).await;
        self.state = ViewState::from_result(result);
    }

    pub async fn filter_by_role(&mut self, role: Option<StaffRole>) {
        self.filter.role = role;
        self.query = PageQuery::new(1, self.query.per_page);
        self.load().await;
    }

    pub async fn search(&mut self, input: &str) {
        self.filter.search = search_term(input);
        self.query = PageQuery::new(1, self.query.per_page);
        self.load().await;
    }

    pub fn begin_add_staff(&mut self) -> Option<NewStaff> {
        let staff = self.banner.accept(self.form.validate())?;
        self.saving = true;
        Some(staff)
    }

    pub async fn send(&self, staff: &NewStaff) -> Result<Staff, ClientError> {
        self.client.create_staff(staff).await
    }

    /// The list is refetched on success.
    pub async fn finish(&mut self, result: Result<Staff, ClientError>, now: Instant) -> Option<Staff> {
        self.saving = false;
        let staff = self.banner.accept(result)?;
        self.banner.show(Banner::success(
            format!("{} added as {}", staff.full_name, staff.role.label()),
            now,
        ));
        self.form = StaffForm::default();
        self.load().await;
        Some(staff)
    }

    pub async fn add_staff(&mut self, now: Instant) -> Option<Staff> {
        let staff = self.begin_add_staff()?;
        let result = self.send(&staff).await;
        self.finish(result, now).await
    }
}
