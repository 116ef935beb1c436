//! Clinic portal endpoints, scoped to the calling clinic.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::{require_clinic, ListQuery};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Principal};
use crate::models::{Clinic, NewPatient, NewStaff, NewVisit, Paginated, Patient, Staff, Visit};

/// `GET /clinic/profile`
pub async fn profile(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Clinic>, ApiError> {
    let clinic_id = require_clinic(&principal)?;
    ctx.read_store()?
        .clinic(clinic_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Clinic not found".into()))
}

/// `GET /clinic/patients?search`
pub async fn patients(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Patient>>, ApiError> {
    let clinic_id = require_clinic(&principal)?;
    let search = query.search();
    let patients = ctx
        .read_store()?
        .patients_in_clinic(clinic_id, search.as_deref());
    Ok(Json(Paginated::paginate(patients, query.page_query())))
}

/// `GET /clinic/patients/:id`
pub async fn patient(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let clinic_id = require_clinic(&principal)?;
    ctx.read_store()?
        .patient(patient_id)
        .filter(|p| p.clinic_id == clinic_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))
}

/// `POST /clinic/patients`
pub async fn create_patient(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Json(patient): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let clinic_id = require_clinic(&principal)?;
    let created = ctx.write_store()?.add_patient(clinic_id, patient)?;
    tracing::info!(clinic = %clinic_id, patient = %created.id, "Patient registered by clinic");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /clinic/staff?search&role`
pub async fn staff(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Staff>>, ApiError> {
    let clinic_id = require_clinic(&principal)?;
    let search = query.search();
    let staff = ctx
        .read_store()?
        .staff_in_clinic(clinic_id, search.as_deref(), query.role);
    Ok(Json(Paginated::paginate(staff, query.page_query())))
}

/// `POST /clinic/staff`
pub async fn create_staff(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Json(staff): Json<NewStaff>,
) -> Result<(StatusCode, Json<Staff>), ApiError> {
    let clinic_id = require_clinic(&principal)?;
    let created = ctx.write_store()?.add_staff(clinic_id, staff)?;
    tracing::info!(clinic = %clinic_id, role = %created.role, "Staff member added");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /clinic/visits?patient_id`
pub async fn visits(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Visit>>, ApiError> {
    let clinic_id = require_clinic(&principal)?;
    let visits = ctx
        .read_store()?
        .visits_in_clinic(clinic_id, query.patient_id);
    Ok(Json(Paginated::paginate(visits, query.page_query())))
}

/// `POST /clinic/visits`. The clinic names the attending staff member.
pub async fn create_visit(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Json(visit): Json<NewVisit>,
) -> Result<(StatusCode, Json<Visit>), ApiError> {
    let clinic_id = require_clinic(&principal)?;
    let staff_id = visit
        .staff_id
        .ok_or_else(|| ApiError::BadRequest("staff_id is required".into()))?;
    let created = ctx.write_store()?.add_visit(clinic_id, staff_id, visit)?;
    Ok((StatusCode::CREATED, Json(created)))
}
