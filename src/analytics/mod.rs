//! Analytics source selection.
//!
//! The client serves analytics either from the mock fixtures (after a
//! simulated network delay) or from the backend's analytics endpoints.
//! Both produce `AnalyticsReport`, so switching is a config change.

pub mod mock;

use std::time::Duration;

use uuid::Uuid;

use crate::config::ANALYTICS_LATENCY;
use crate::models::AnalyticsReport;

/// Where `ApiClient` gets analytics from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsSource {
    Mock(MockAnalytics),
    /// `GET /analytics/system` and `GET /analytics/clinics/:id`.
    Remote,
}

impl Default for AnalyticsSource {
    fn default() -> Self {
        Self::Mock(MockAnalytics::default())
    }
}

/// Fixture analytics with simulated latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAnalytics {
    pub latency: Duration,
}

impl Default for MockAnalytics {
    fn default() -> Self {
        Self {
            latency: ANALYTICS_LATENCY,
        }
    }
}

impl MockAnalytics {
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn system_report(&self) -> AnalyticsReport {
        self.simulate_latency().await;
        mock::system_report()
    }

    /// Every clinic gets the same scaled fixture; the id only shows up in logs.
    pub async fn clinic_report(&self, clinic_id: Uuid) -> AnalyticsReport {
        tracing::debug!(%clinic_id, "Serving mock clinic analytics");
        self.simulate_latency().await;
        mock::clinic_report()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
