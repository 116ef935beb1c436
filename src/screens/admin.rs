//! Administrator screens.

use std::time::Instant;

use super::{Banner, BannerSlot, ViewState};
use crate::client::{ApiClient, ClientError};
use crate::models::{
    AnalyticsReport, Clinic, ClinicFilter, PageQuery, Paginated, SystemSettings, SystemStats,
};
use crate::validation::SettingsForm;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub stats: SystemStats,
    pub analytics: AnalyticsReport,
    pub clinics: Paginated<Clinic>,
}

/// System stats, system analytics and the clinic list, loaded together.
pub struct AdminDashboard {
    client: ApiClient,
    pub filter: ClinicFilter,
    pub query: PageQuery,
    pub state: ViewState<AdminOverview>,
}

impl AdminDashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            filter: ClinicFilter::default(),
            query: PageQuery::default(),
            state: ViewState::Loading,
        }
    }

    pub async fn load(&mut self) {
        self.state = ViewState::Loading;
        let result = self.fetch_all().await;
        self.state = ViewState::from_result(result);
    }

    async fn fetch_all(&self) -> Result<AdminOverview, ClientError> {
        let (stats, analytics, clinics) = tokio::try_join!(
            self.client.system_stats(),
            self.client.system_analytics(),
            self.client.admin_clinics(self.query, &self.filter),
        )?;
        Ok(AdminOverview {
            stats,
            analytics,
            clinics,
        })
    }

    /// Re-query only the clinic table. Other panels keep their data.
    pub async fn filter_clinics(&mut self, filter: ClinicFilter) {
        self.filter = filter;
        self.query = PageQuery::default();
        self.reload_clinics().await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.query = PageQuery::new(page, self.query.per_page);
        self.reload_clinics().await;
    }

    async fn reload_clinics(&mut self) {
        let result = self.client.admin_clinics(self.query, &self.filter).await;
        match result {
            Ok(clinics) => match self.state.ready_mut() {
                Some(overview) => overview.clinics = clinics,
                None => self.load().await,
            },
            Err(err) => self.state = ViewState::Failed(err.to_string()),
        }
    }
}

/// Local-only settings editor.
pub struct SettingsPanel {
    pub settings: SystemSettings,
    pub form: SettingsForm,
    pub banner: BannerSlot,
}

impl SettingsPanel {
    pub fn new(settings: SystemSettings) -> Self {
        Self {
            form: SettingsForm::from_settings(&settings),
            settings,
            banner: BannerSlot::default(),
        }
    }

    /// Apply the form to `settings`. Nothing is sent to the backend.
    pub fn save(&mut self, now: Instant) -> bool {
        match self.form.validate() {
            Ok(settings) => {
                tracing::info!(
                    maintenance_mode = settings.maintenance_mode,
                    "System settings updated"
                );
                self.settings = settings;
                self.banner.show(Banner::success("Settings saved", now));
                true
            }
            Err(err) => {
                self.banner.show(Banner::error(err.to_string()));
                false
            }
        }
    }

    /// Discard edits.
    pub fn reset(&mut self) {
        self.form = SettingsForm::from_settings(&self.settings);
        self.banner.clear();
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new(SystemSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::mock;
    use crate::api::store::fixtures;
    use crate::client::tests::{signed_in, stub};
    use crate::config::SUCCESS_BANNER_TTL;
    use crate::models::UserType;

    #[tokio::test]
    async fn dashboard_loads_all_panels() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Admin, fixtures::ADMIN_EMAIL).await;
        let mut dashboard = AdminDashboard::new(client);

        dashboard.load().await;
        let overview = dashboard.state.ready().unwrap();
        assert_eq!(overview.stats.total_clinics, 3);
        assert_eq!(overview.analytics, mock::system_report());
        assert_eq!(overview.clinics.total, 3);

        dashboard
            .filter_clinics(ClinicFilter {
                district: Some("Ntcheu".into()),
                search: None,
            })
            .await;
        let overview = dashboard.state.ready().unwrap();
        assert_eq!(overview.clinics.total, 1);
        assert_eq!(overview.stats.total_clinics, 3);

        server.shutdown();
    }

    #[tokio::test]
    async fn one_failed_fetch_fails_the_dashboard() {
        let mut server = stub().await;
        // Clinic accounts may read analytics but not admin stats.
        let client = signed_in(&server, UserType::Clinic, fixtures::CLINIC_EMAIL).await;
        let mut dashboard = AdminDashboard::new(client);

        dashboard.load().await;
        assert_eq!(dashboard.state.error(), Some("Admin access required"));

        server.shutdown();
    }

    #[test]
    fn settings_save_and_reset() {
        let mut panel = SettingsPanel::default();
        let now = Instant::now();

        panel.form.support_email = "not-an-email".into();
        assert!(!panel.save(now));
        assert_eq!(panel.banner.error(), Some("Please enter a valid email address"));
        assert_eq!(panel.settings, SystemSettings::default());

        panel.reset();
        panel.form.maintenance_mode = true;
        panel.form.default_page_size = "25".into();
        assert!(panel.save(now));
        assert!(panel.settings.maintenance_mode);
        assert_eq!(panel.settings.default_page_size, 25);
        assert!(panel.banner.visible(now).is_some());
        assert!(panel.banner.visible(now + SUCCESS_BANNER_TTL).is_none());
    }
}
