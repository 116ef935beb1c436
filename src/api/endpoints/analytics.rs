//! Analytics endpoints. Any signed-in account may read them; the figures
//! come from the same fixed tables the client uses in mock mode.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::analytics::mock;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Principal};
use crate::models::AnalyticsReport;

/// `GET /analytics/system`
pub async fn system(Extension(_principal): Extension<Principal>) -> Json<AnalyticsReport> {
    Json(mock::system_report())
}

/// `GET /analytics/clinics/:id`
pub async fn clinic(
    State(ctx): State<ApiContext>,
    Extension(_principal): Extension<Principal>,
    Path(clinic_id): Path<Uuid>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    if ctx.read_store()?.clinic(clinic_id).is_none() {
        return Err(ApiError::NotFound("Clinic not found".into()));
    }
    Ok(Json(mock::clinic_report()))
}
