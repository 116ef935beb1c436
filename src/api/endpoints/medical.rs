//! Medical portal endpoints for doctors and nurses.
//!
//! Every visit-scoped route checks that the visit belongs to the caller's
//! clinic; foreign visits answer 404 rather than 403.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::{require_medical, ListQuery};
use crate::api::error::ApiError;
use crate::api::store::Store;
use crate::api::types::{ApiContext, Principal};
use crate::models::{
    Diagnosis, NewDiagnosis, NewPrescription, NewVisit, Paginated, Patient, Prescription, Visit,
    VisitDetail,
};

/// Resolve the caller and make sure `visit_id` is one of their clinic's visits.
fn visit_in_scope(store: &Store, principal: &Principal, visit_id: Uuid) -> Result<(), ApiError> {
    let staff = require_medical(store, principal)?;
    match store.visit(visit_id) {
        Some(v) if v.clinic_id == staff.clinic_id => Ok(()),
        _ => Err(ApiError::NotFound("Visit not found".into())),
    }
}

/// `GET /medical/patients?search`
pub async fn patients(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Patient>>, ApiError> {
    let store = ctx.read_store()?;
    let staff = require_medical(&store, &principal)?;
    let search = query.search();
    let patients = store.patients_in_clinic(staff.clinic_id, search.as_deref());
    Ok(Json(Paginated::paginate(patients, query.page_query())))
}

/// `GET /medical/visits?patient_id`
pub async fn visits(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Visit>>, ApiError> {
    let store = ctx.read_store()?;
    let staff = require_medical(&store, &principal)?;
    let visits = store.visits_in_clinic(staff.clinic_id, query.patient_id);
    Ok(Json(Paginated::paginate(visits, query.page_query())))
}

/// `POST /medical/visits`. The caller is recorded as the attending staff
/// member; any `staff_id` in the body is ignored.
pub async fn create_visit(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Json(visit): Json<NewVisit>,
) -> Result<(StatusCode, Json<Visit>), ApiError> {
    let mut store = ctx.write_store()?;
    let staff = require_medical(&store, &principal)?;
    let created = store.add_visit(staff.clinic_id, staff.id, visit)?;
    tracing::info!(staff = %staff.id, visit = %created.id, "Visit recorded");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /medical/visits/:id`
pub async fn visit(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<VisitDetail>, ApiError> {
    let store = ctx.read_store()?;
    visit_in_scope(&store, &principal, visit_id)?;
    store
        .visit_detail(visit_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Visit not found".into()))
}

/// `GET /medical/visits/:id/diagnoses`
pub async fn diagnoses(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<Vec<Diagnosis>>, ApiError> {
    let store = ctx.read_store()?;
    visit_in_scope(&store, &principal, visit_id)?;
    Ok(Json(store.diagnoses_for(visit_id)))
}

/// `POST /medical/visits/:id/diagnoses`
pub async fn add_diagnosis(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Path(visit_id): Path<Uuid>,
    Json(diagnosis): Json<NewDiagnosis>,
) -> Result<(StatusCode, Json<Diagnosis>), ApiError> {
    let mut store = ctx.write_store()?;
    visit_in_scope(&store, &principal, visit_id)?;
    let created = store.add_diagnosis(visit_id, diagnosis)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /medical/visits/:id/prescriptions`
pub async fn prescriptions(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    let store = ctx.read_store()?;
    visit_in_scope(&store, &principal, visit_id)?;
    Ok(Json(store.prescriptions_for(visit_id)))
}

/// `POST /medical/visits/:id/prescriptions`
pub async fn add_prescription(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Path(visit_id): Path<Uuid>,
    Json(prescription): Json<NewPrescription>,
) -> Result<(StatusCode, Json<Prescription>), ApiError> {
    let mut store = ctx.write_store()?;
    visit_in_scope(&store, &principal, visit_id)?;
    let created = store.add_prescription(visit_id, prescription)?;
    Ok((StatusCode::CREATED, Json(created)))
}
