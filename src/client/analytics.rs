//! Analytics, served from the configured `AnalyticsSource`.

use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::analytics::AnalyticsSource;
use crate::models::AnalyticsReport;

impl ApiClient {
    /// System-wide analytics (`GET /analytics/system` when remote).
    pub async fn system_analytics(&self) -> Result<AnalyticsReport, ClientError> {
        match self.analytics_source() {
            AnalyticsSource::Mock(mock) => Ok(mock.system_report().await),
            AnalyticsSource::Remote => self.get("/analytics/system").await,
        }
    }

    /// One clinic's analytics (`GET /analytics/clinics/:id` when remote).
    pub async fn clinic_analytics(&self, clinic_id: Uuid) -> Result<AnalyticsReport, ClientError> {
        match self.analytics_source() {
            AnalyticsSource::Mock(mock) => Ok(mock.clinic_report(clinic_id).await),
            AnalyticsSource::Remote => {
                self.get(&format!("/analytics/clinics/{clinic_id}")).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::analytics::{mock, AnalyticsSource, MockAnalytics};
    use crate::api::store::fixtures;
    use crate::client::tests::{signed_in, stub};
    use crate::client::{ApiClient, ClientConfig};
    use crate::models::UserType;
    use crate::session::Session;

    #[tokio::test(start_paused = true)]
    async fn mock_source_never_touches_the_network() {
        // Nothing listens on this address; the mock must not try.
        let client = ApiClient::new(
            ClientConfig {
                analytics: AnalyticsSource::Mock(MockAnalytics::default()),
                ..ClientConfig::with_base_url("http://127.0.0.1:9/api/v1")
            },
            Session::anonymous(),
        )
        .unwrap();

        let started = tokio::time::Instant::now();
        let report = client.system_analytics().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(report, mock::system_report());
    }

    #[tokio::test]
    async fn remote_source_matches_mock_shape() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Clinic, fixtures::CLINIC_EMAIL).await;
        let clinic_id = client.session().user().unwrap().id();

        let system = client.system_analytics().await.unwrap();
        assert_eq!(system, mock::system_report());
        let clinic = client.clinic_analytics(clinic_id).await.unwrap();
        assert_eq!(clinic, mock::clinic_report());

        server.shutdown();
    }
}
