//! Patient portal endpoints. The caller only ever sees their own records.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use uuid::Uuid;

use super::{require_patient, ListQuery};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Principal};
use crate::models::{Paginated, Patient, Prescription, UpdatePatientProfile, Visit, VisitDetail};

/// `GET /patient/profile`
pub async fn profile(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Patient>, ApiError> {
    let id = require_patient(&principal)?;
    ctx.read_store()?
        .patient(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))
}

/// `PUT /patient/profile`
pub async fn update_profile(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Json(update): Json<UpdatePatientProfile>,
) -> Result<Json<Patient>, ApiError> {
    let id = require_patient(&principal)?;
    if update.is_empty() {
        return Err(ApiError::BadRequest("No changes provided".into()));
    }
    Ok(Json(ctx.write_store()?.update_patient(id, update)?))
}

/// `GET /patient/visits`, newest first.
pub async fn visits(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Visit>>, ApiError> {
    let id = require_patient(&principal)?;
    let visits = ctx.read_store()?.visits_for_patient(id);
    Ok(Json(Paginated::paginate(visits, query.page_query())))
}

/// `GET /patient/visits/:id`
pub async fn visit(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<VisitDetail>, ApiError> {
    let id = require_patient(&principal)?;
    ctx.read_store()?
        .visit_detail(visit_id)
        .filter(|detail| detail.visit.patient_id == id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Visit not found".into()))
}

/// `GET /patient/prescriptions`
pub async fn prescriptions(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Prescription>>, ApiError> {
    let id = require_patient(&principal)?;
    let prescriptions = ctx.read_store()?.prescriptions_for_patient(id);
    Ok(Json(Paginated::paginate(prescriptions, query.page_query())))
}
