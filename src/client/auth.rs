//! Authentication endpoints. Successful logins and registrations store the
//! token and principal in the client's session.

use super::{ApiClient, ClientError};
use crate::models::{
    AuthResponse, AuthUser, ChangePasswordRequest, LoginRequest, MessageResponse,
    RegisterClinicRequest, RegisterPatientRequest, UserType,
};

impl ApiClient {
    /// `POST /auth/login/{patient|clinic|staff|admin}`
    pub async fn login(
        &self,
        kind: UserType,
        credentials: &LoginRequest,
    ) -> Result<AuthUser, ClientError> {
        let path = format!("/auth/login/{}", kind.as_str());
        let response: AuthResponse = self.post(&path, credentials).await?;
        if response.user.user_type() != kind {
            return Err(ClientError::Decode(format!(
                "expected a {} account, got {}",
                kind,
                response.user.user_type()
            )));
        }
        self.establish(response)
    }

    pub async fn login_patient(&self, credentials: &LoginRequest) -> Result<AuthUser, ClientError> {
        self.login(UserType::Patient, credentials).await
    }

    pub async fn login_clinic(&self, credentials: &LoginRequest) -> Result<AuthUser, ClientError> {
        self.login(UserType::Clinic, credentials).await
    }

    pub async fn login_staff(&self, credentials: &LoginRequest) -> Result<AuthUser, ClientError> {
        self.login(UserType::Staff, credentials).await
    }

    pub async fn login_admin(&self, credentials: &LoginRequest) -> Result<AuthUser, ClientError> {
        self.login(UserType::Admin, credentials).await
    }

    /// `POST /auth/register/patient`: creates the account and signs in.
    pub async fn register_patient(
        &self,
        request: &RegisterPatientRequest,
    ) -> Result<AuthUser, ClientError> {
        let response: AuthResponse = self.post("/auth/register/patient", request).await?;
        self.establish(response)
    }

    /// `POST /auth/register/clinic`: creates the account and signs in.
    pub async fn register_clinic(
        &self,
        request: &RegisterClinicRequest,
    ) -> Result<AuthUser, ClientError> {
        let response: AuthResponse = self.post("/auth/register/clinic", request).await?;
        self.establish(response)
    }

    /// `POST /auth/change-password`
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ClientError> {
        self.post("/auth/change-password", request).await
    }

    /// `GET /auth/me`: reloads the signed-in principal into the session.
    pub async fn refresh_profile(&self) -> Result<AuthUser, ClientError> {
        let user: AuthUser = self.get("/auth/me").await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// Local only: forget the token. The backend keeps no logout state.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().sign_out()?;
        tracing::info!("Signed out");
        Ok(())
    }

    fn establish(&self, response: AuthResponse) -> Result<AuthUser, ClientError> {
        let user = response.user.clone();
        self.session().sign_in(response.token, response.user)?;
        tracing::info!(user_type = %user.user_type(), user_id = %user.id(), "Signed in");
        Ok(user)
    }
}
