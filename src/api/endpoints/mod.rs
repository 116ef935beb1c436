//! Stub backend endpoint handlers, one module per portal.
//!
//! Handlers take the caller's `Principal` from request extensions (set by
//! the auth middleware) and check the portal with the guards below.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod clinic;
pub mod medical;
pub mod patient;
pub mod public;

use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::store::Store;
use crate::api::types::Principal;
use crate::config::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use crate::models::{search_term, PageQuery, Staff, StaffRole, UserType};

/// Query string accepted by every list endpoint. Each endpoint reads the
/// filters it understands and ignores the rest.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub role: Option<StaffRole>,
    pub patient_id: Option<Uuid>,
    pub district: Option<String>,
}

impl ListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }

    pub fn search(&self) -> Option<String> {
        self.search.as_deref().and_then(search_term)
    }

    pub fn district(&self) -> Option<String> {
        self.district.as_deref().and_then(search_term)
    }
}

pub fn require_patient(principal: &Principal) -> Result<Uuid, ApiError> {
    match principal.kind {
        UserType::Patient => Ok(principal.id),
        _ => Err(ApiError::Forbidden("Patient access required")),
    }
}

pub fn require_clinic(principal: &Principal) -> Result<Uuid, ApiError> {
    match principal.kind {
        UserType::Clinic => Ok(principal.id),
        _ => Err(ApiError::Forbidden("Clinic access required")),
    }
}

pub fn require_admin(principal: &Principal) -> Result<(), ApiError> {
    match principal.kind {
        UserType::Admin => Ok(()),
        _ => Err(ApiError::Forbidden("Admin access required")),
    }
}

/// Staff record of a caller allowed to record visits (doctors, nurses).
pub fn require_medical(store: &Store, principal: &Principal) -> Result<Staff, ApiError> {
    const DENIED: ApiError = ApiError::Forbidden("Medical staff access required");
    if principal.kind != UserType::Staff {
        return Err(DENIED);
    }
    store
        .staff_member(principal.id)
        .filter(|s| s.role.can_record_visits())
        .cloned()
        .ok_or(DENIED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults_to_first_page() {
        let query = ListQuery::default();
        assert_eq!(query.page_query(), PageQuery::new(1, 10));
        assert_eq!(query.search(), None);
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = ListQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.search(), None);
    }

    #[test]
    fn guards_check_portal() {
        let patient = Principal {
            kind: UserType::Patient,
            id: Uuid::new_v4(),
        };
        assert_eq!(require_patient(&patient).unwrap(), patient.id);
        assert!(matches!(
            require_admin(&patient),
            Err(ApiError::Forbidden("Admin access required"))
        ));
        assert!(require_medical(&Store::default(), &patient).is_err());
    }
}
