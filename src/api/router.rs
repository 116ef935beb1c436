//! Stub backend router.
//!
//! Every route lives under `/api/v1`. Public routes (login, registration,
//! clinic directory) skip authentication; everything else goes through
//! `require_auth`.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. Extension(ApiContext) → 3. Audit logger → 4. Auth validator (protected only)

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Path prefix shared by every route.
pub const API_PREFIX: &str = "/api/v1";

/// Build the stub backend router over `ctx`.
///
/// Middleware uses `Extension<ApiContext>`; handlers use `State<ApiContext>`.
pub fn stub_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/auth/change-password", post(endpoints::auth::change_password))
        .route("/auth/me", get(endpoints::auth::me))
        // Patient portal
        .route(
            "/patient/profile",
            get(endpoints::patient::profile).put(endpoints::patient::update_profile),
        )
        .route("/patient/visits", get(endpoints::patient::visits))
        .route("/patient/visits/:id", get(endpoints::patient::visit))
        .route("/patient/prescriptions", get(endpoints::patient::prescriptions))
        // Clinic portal
        .route("/clinic/profile", get(endpoints::clinic::profile))
        .route(
            "/clinic/patients",
            get(endpoints::clinic::patients).post(endpoints::clinic::create_patient),
        )
        .route("/clinic/patients/:id", get(endpoints::clinic::patient))
        .route(
            "/clinic/staff",
            get(endpoints::clinic::staff).post(endpoints::clinic::create_staff),
        )
        .route(
            "/clinic/visits",
            get(endpoints::clinic::visits).post(endpoints::clinic::create_visit),
        )
        // Medical portal
        .route("/medical/patients", get(endpoints::medical::patients))
        .route(
            "/medical/visits",
            get(endpoints::medical::visits).post(endpoints::medical::create_visit),
        )
        .route("/medical/visits/:id", get(endpoints::medical::visit))
        .route(
            "/medical/visits/:id/diagnoses",
            get(endpoints::medical::diagnoses).post(endpoints::medical::add_diagnosis),
        )
        .route(
            "/medical/visits/:id/prescriptions",
            get(endpoints::medical::prescriptions).post(endpoints::medical::add_prescription),
        )
        // Administration
        .route("/admin/stats", get(endpoints::admin::stats))
        .route("/admin/clinics", get(endpoints::admin::clinics))
        // Analytics
        .route("/analytics/system", get(endpoints::analytics::system))
        .route("/analytics/clinics/:id", get(endpoints::analytics::clinic))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth));

    let public = Router::new()
        .route("/auth/login/:kind", post(endpoints::auth::login))
        .route("/auth/register/patient", post(endpoints::auth::register_patient))
        .route("/auth/register/clinic", post(endpoints::auth::register_clinic))
        .route("/public/clinics", get(endpoints::public::clinics))
        .route("/public/clinics/:id", get(endpoints::public::clinic))
        .with_state(ctx.clone());

    Router::new()
        .nest(API_PREFIX, public.merge(protected))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        // Extension must be outside the audit and auth layers so both can extract ApiContext
        .layer(axum::Extension(ctx))
        .layer(CorsLayer::permissive())
}
