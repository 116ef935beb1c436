//! Administrator endpoints.

use axum::extract::{Query, State};
use axum::{Extension, Json};

use super::{require_admin, ListQuery};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Principal};
use crate::models::{Clinic, ClinicFilter, Paginated, SystemStats};

/// `GET /admin/stats`
pub async fn stats(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<SystemStats>, ApiError> {
    require_admin(&principal)?;
    Ok(Json(ctx.read_store()?.stats()))
}

/// `GET /admin/clinics?search&district`
pub async fn clinics(
    State(ctx): State<ApiContext>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Clinic>>, ApiError> {
    require_admin(&principal)?;
    let filter = ClinicFilter {
        search: query.search(),
        district: query.district(),
    };
    let clinics = ctx.read_store()?.search_clinics(&filter);
    Ok(Json(Paginated::paginate(clinics, query.page_query())))
}
