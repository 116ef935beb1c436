//! Admin portal: system-wide counts and the clinic register.

use super::{ApiClient, ClientError};
use crate::models::{Clinic, ClinicFilter, PageQuery, Paginated, SystemStats};

impl ApiClient {
    /// `GET /admin/stats`
    pub async fn system_stats(&self) -> Result<SystemStats, ClientError> {
        self.get("/admin/stats").await
    }

    /// `GET /admin/clinics?page&per_page&search&district`
    pub async fn admin_clinics(
        &self,
        page: PageQuery,
        filter: &ClinicFilter,
    ) -> Result<Paginated<Clinic>, ClientError> {
        self.get_page("/admin/clinics", page, filter).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::store::fixtures;
    use crate::client::tests::{signed_in, stub};
    use crate::models::{ClinicFilter, PageQuery, UserType};

    #[tokio::test]
    async fn admin_sees_system_counts() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Admin, fixtures::ADMIN_EMAIL).await;
        let stats = client.system_stats().await.unwrap();
        assert_eq!(stats.total_clinics, 3);
        assert!(stats.total_patients >= 25);
        assert!(stats.total_visits > 0);

        let clinics = client
            .admin_clinics(
                PageQuery::default(),
                &ClinicFilter {
                    district: Some("Dedza".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(clinics.total, 1);
        assert_eq!(clinics.data[0].district, "Dedza");

        server.shutdown();
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Clinic, fixtures::CLINIC_EMAIL).await;
        let err = client.system_stats().await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "Admin access required");

        server.shutdown();
    }
}
