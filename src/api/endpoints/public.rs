//! Public clinic directory; no authentication.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use super::ListQuery;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Clinic, ClinicFilter, Paginated};

/// `GET /public/clinics?search&district`
pub async fn clinics(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Clinic>>, ApiError> {
    let filter = ClinicFilter {
        search: query.search(),
        district: query.district(),
    };
    let clinics = ctx.read_store()?.search_clinics(&filter);
    Ok(Json(Paginated::paginate(clinics, query.page_query())))
}

/// `GET /public/clinics/:id`
pub async fn clinic(
    State(ctx): State<ApiContext>,
    Path(clinic_id): Path<Uuid>,
) -> Result<Json<Clinic>, ApiError> {
    ctx.read_store()?
        .clinic(clinic_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Clinic not found".into()))
}
