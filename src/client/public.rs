//! Public endpoints; no token needed.

use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{Clinic, ClinicFilter, PageQuery, Paginated};

impl ApiClient {
    /// `GET /public/clinics?page&per_page&search&district`
    pub async fn clinics(
        &self,
        page: PageQuery,
        filter: &ClinicFilter,
    ) -> Result<Paginated<Clinic>, ClientError> {
        self.get_page("/public/clinics", page, filter).await
    }

    /// `GET /public/clinics/:id`
    pub async fn clinic(&self, clinic_id: Uuid) -> Result<Clinic, ClientError> {
        self.get(&format!("/public/clinics/{clinic_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{client_for, stub};
    use crate::models::{ClinicFilter, PageQuery};
    use crate::session::Session;

    #[tokio::test]
    async fn clinic_directory_search_and_lookup() {
        let mut server = stub().await;
        let client = client_for(&server, Session::anonymous());

        let all = client
            .clinics(PageQuery::default(), &ClinicFilter::default())
            .await
            .unwrap();
        assert_eq!(all.total, 3);

        let found = client
            .clinics(
                PageQuery::default(),
                &ClinicFilter {
                    search: Some("ntcheu".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(found.total, 1);

        let clinic = client.clinic(found.data[0].id).await.unwrap();
        assert_eq!(clinic, found.data[0]);

        let err = client.clinic(uuid::Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "Clinic not found");

        server.shutdown();
    }
}
