//! Public clinic directory.

use super::ViewState;
use crate::client::ApiClient;
use crate::models::{search_term, Clinic, ClinicFilter, PageQuery, Paginated};

pub struct ClinicDirectory {
    client: ApiClient,
    pub filter: ClinicFilter,
    pub query: PageQuery,
    pub state: ViewState<Paginated<Clinic>>,
}

impl ClinicDirectory {
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
        let result = self.client.clinics(self.query, &self.filter).await;
        self.state = ViewState::from_result(result);
    }

    pub async fn search(&mut self, input: &str) {
        self.filter.search = search_term(input);
        self.query = PageQuery::new(1, self.query.per_page);
        self.load().await;
    }

    /// `None` shows every district.
    pub async fn filter_district(&mut self, district: Option<&str>) {
        self.filter.district = district.and_then(search_term);
        self.query = PageQuery::new(1, self.query.per_page);
        self.load().await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.query = PageQuery::new(page, self.query.per_page);
        self.load().await;
    }
}
