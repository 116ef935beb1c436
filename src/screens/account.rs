//! Sign-in, sign-up and password screens.

use std::time::Instant;

use chrono::NaiveDate;

use super::{Banner, BannerSlot, ViewState};
use crate::client::{ApiClient, ClientError};
use crate::config::MAX_PER_PAGE;
use crate::models::{
    AuthUser, ChangePasswordRequest, Clinic, ClinicFilter, LoginRequest, MessageResponse,
    PageQuery, RegisterClinicRequest, RegisterPatientRequest, UserType,
};
use crate::validation::{
    ChangePasswordForm, ClinicRegistrationForm, LoginForm, PatientRegistrationForm,
};

/// One login screen per portal kind; the kind is chosen on submit.
pub struct LoginScreen {
    client: ApiClient,
    pub form: LoginForm,
    pub submitting: bool,
    pub banner: BannerSlot,
}

impl LoginScreen {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: LoginForm::default(),
            submitting: false,
            banner: BannerSlot::default(),
        }
    }

    pub fn begin_submit(&mut self, email: &str, password: &str) -> Option<LoginRequest> {
        self.form.email = email.to_string();
        self.form.password = password.to_string();
        let request = self.banner.accept(self.form.validate())?;
        self.submitting = true;
        Some(request)
    }

    pub async fn send(
        &self,
        kind: UserType,
        request: &LoginRequest,
    ) -> Result<AuthUser, ClientError> {
        self.client.login(kind, request).await
    }

    pub fn finish(&mut self, result: Result<AuthUser, ClientError>) -> Option<AuthUser> {
        self.submitting = false;
        let user = self.banner.accept(result)?;
        self.banner.clear();
        Some(user)
    }

    /// Sign in; on success the client's session holds the token and user.
    pub async fn submit(&mut self, kind: UserType, email: &str, password: &str) -> Option<AuthUser> {
        let request = self.begin_submit(email, password)?;
        let result = self.send(kind, &request).await;
        self.finish(result)
    }
}

/// Patient self sign-up. The clinic is picked from the public directory.
pub struct PatientSignUp {
    client: ApiClient,
    pub form: PatientRegistrationForm,
    pub clinics: ViewState<Vec<Clinic>>,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl PatientSignUp {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: PatientRegistrationForm::default(),
            clinics: ViewState::Loading,
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub async fn load_clinics(&mut self) {
        self.clinics = ViewState::Loading;
        let result = self
            .client
            .clinics(PageQuery::new(1, MAX_PER_PAGE), &ClinicFilter::default())
            .await
            .map(|page| page.data);
        self.clinics = ViewState::from_result(result);
    }

    /// Validate the form. A rejected form never reaches the backend.
    pub fn begin_submit(&mut self, today: NaiveDate) -> Option<RegisterPatientRequest> {
        let request = self.banner.accept(self.form.validate(today))?;
        self.saving = true;
        Some(request)
    }

    pub async fn send(&self, request: &RegisterPatientRequest) -> Result<AuthUser, ClientError> {
        self.client.register_patient(request).await
    }

    pub fn finish(&mut self, result: Result<AuthUser, ClientError>) -> Option<AuthUser> {
        self.saving = false;
        let user = self.banner.accept(result)?;
        self.banner.clear();
        Some(user)
    }

    pub async fn submit(&mut self, today: NaiveDate) -> Option<AuthUser> {
        let request = self.begin_submit(today)?;
        let result = self.send(&request).await;
        self.finish(result)
    }
}

pub struct ClinicSignUp {
    client: ApiClient,
    pub form: ClinicRegistrationForm,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl ClinicSignUp {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: ClinicRegistrationForm::default(),
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub fn begin_submit(&mut self) -> Option<RegisterClinicRequest> {
        let request = self.banner.accept(self.form.validate())?;
        self.saving = true;
        Some(request)
    }

    pub async fn send(&self, request: &RegisterClinicRequest) -> Result<AuthUser, ClientError> {
        self.client.register_clinic(request).await
    }

    pub fn finish(&mut self, result: Result<AuthUser, ClientError>) -> Option<AuthUser> {
        self.saving = false;
        let user = self.banner.accept(result)?;
        self.banner.clear();
        Some(user)
    }

    pub async fn submit(&mut self) -> Option<AuthUser> {
        let request = self.begin_submit()?;
        let result = self.send(&request).await;
        self.finish(result)
    }
}

/// Password change for whichever account is signed in.
pub struct PasswordChange {
    client: ApiClient,
    pub form: ChangePasswordForm,
    pub saving: bool,
    pub banner: BannerSlot,
}

impl PasswordChange {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: ChangePasswordForm::default(),
            saving: false,
            banner: BannerSlot::default(),
        }
    }

    pub fn begin_submit(&mut self) -> Option<ChangePasswordRequest> {
        let request = self.banner.accept(self.form.validate())?;
        self.saving = true;
        Some(request)
    }

    pub async fn send(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ClientError> {
        self.client.change_password(request).await
    }

    /// The form is cleared on success.
    pub fn finish(&mut self, result: Result<MessageResponse, ClientError>, now: Instant) -> bool {
        self.saving = false;
        let Some(response) = self.banner.accept(result) else {
            return false;
        };
        self.form = ChangePasswordForm::default();
        self.banner.show(Banner::success(response.message, now));
        true
    }

    /// Returns whether the password was changed.
    pub async fn submit(&mut self, now: Instant) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let result = self.send(&request).await;
        self.finish(result, now)
    }
}
