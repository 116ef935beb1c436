//! Authentication endpoints.
//!
//! - `POST /auth/login/:kind` and `POST /auth/register/{patient,clinic}`: public
//! - `POST /auth/change-password` and `GET /auth/me`: protected

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::store::Store;
use crate::api::types::{ApiContext, Principal};
use crate::config::MIN_PASSWORD_LEN;
use crate::models::{
    AuthResponse, AuthUser, ChangePasswordRequest, LoginRequest, MessageResponse,
    RegisterClinicRequest, RegisterPatientRequest, UserType,
};

fn check_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn respond_with_session(store: &mut Store, principal: Principal) -> Result<AuthResponse, ApiError> {
    let user = store
        .auth_user(principal)
        .ok_or(ApiError::Internal("account vanished after login".into()))?;
    let token = store.issue_token(principal);
    Ok(AuthResponse { token, user })
}

/// `POST /auth/login/:kind`
pub async fn login(
    State(ctx): State<ApiContext>,
    Path(kind): Path<UserType>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let mut store = ctx.write_store()?;
    let principal = store
        .authenticate(kind, request.email.trim(), &request.password)
        .ok_or_else(|| {
            tracing::info!(%kind, "Login rejected");
            ApiError::InvalidCredentials
        })?;
    tracing::info!(%kind, id = %principal.id, "Login succeeded");
    Ok(Json(respond_with_session(&mut store, principal)?))
}

/// `POST /auth/register/patient`
pub async fn register_patient(
    State(ctx): State<ApiContext>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    check_password(&request.password)?;
    let mut store = ctx.write_store()?;
    let patient = store.register_patient(request)?;
    let principal = Principal {
        kind: UserType::Patient,
        id: patient.id,
    };
    Ok((StatusCode::CREATED, Json(respond_with_session(&mut store, principal)?)))
}

/// `POST /auth/register/clinic`
pub async fn register_clinic(
    State(ctx): State<ApiContext>,
    Json(request): Json<RegisterClinicRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    check_password(&request.password)?;
    let mut store = ctx.write_store()?;
    let clinic = store.register_clinic(request)?;
    let principal = Principal {
        kind: UserType::Clinic,
        id: clinic.id,
    };
    Ok((StatusCode::CREATED, Json(respond_with_session(&mut store, principal)?)))
}

/// `POST /auth/change-password`
pub async fn change_password(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    check_password(&request.new_password)?;
    ctx.write_store()?.change_password(
        principal,
        &request.current_password,
        &request.new_password,
    )?;
    Ok(Json(MessageResponse {
        message: "Password updated".into(),
    }))
}

/// `GET /auth/me`
pub async fn me(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<AuthUser>, ApiError> {
    ctx.read_store()?
        .auth_user(principal)
        .map(Json)
        .ok_or(ApiError::Unauthorized)
}
