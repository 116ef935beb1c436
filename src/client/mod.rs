//! Typed client for the RuralCare REST backend.
//!
//! One method per endpoint, grouped by portal in the submodules. Every
//! request carries `Content-Type: application/json` and, when the session
//! holds a token, `Authorization: Bearer <token>`. Non-2xx responses become
//! `ClientError::Api` with the backend's error message. Nothing is retried.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod clinic;
pub mod error;
pub mod medical;
pub mod patient;
pub mod public;

pub use error::ClientError;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::analytics::AnalyticsSource;
use crate::config;
use crate::models::{PageQuery, Paginated};
use crate::session::Session;

/// Client construction parameters.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` leaves requests without a client-side timeout.
    pub timeout: Option<Duration>,
    pub analytics: AnalyticsSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
            analytics: AnalyticsSource::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults with the base URL taken from `RURALCARE_API_BASE_URL`.
    pub fn from_env() -> Self {
        Self {
            base_url: config::api_base_url(),
            ..Self::default()
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP client bound to one backend and one session.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Session,
    analytics: AnalyticsSource,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            http,
            session,
            analytics: config.analytics,
        })
    }

    /// Client for the environment-configured backend.
    pub fn from_env(session: Session) -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env(), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn analytics_source(&self) -> &AnalyticsSource {
        &self.analytics
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path), "GET", path)
            .await
    }

    pub(crate) async fn get_page<T, F>(
        &self,
        path: &str,
        page: PageQuery,
        filter: &F,
    ) -> Result<Paginated<T>, ClientError>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let builder = self
            .request(Method::GET, path)
            .query(&page.normalized())
            .query(filter);
        self.execute(builder, "GET", path).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::POST, path).json(body), "POST", path)
            .await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::PUT, path).json(body), "PUT", path)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<T, ClientError> {
        tracing::debug!(
            method,
            path,
            authenticated = self.session.is_authenticated(),
            "API request"
        );

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method, path, error = %e, "API request could not be sent");
            ClientError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_response(status.as_u16(), &body);
            tracing::warn!(
                method,
                path,
                status = status.as_u16(),
                error = %err,
                "API request failed"
            );
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(method, path, error = %e, "API response did not match expected shape");
            ClientError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::server::{start_stub_server_on, StubServer};
    use crate::api::store::fixtures;
    use crate::models::{LoginRequest, PatientFilter, UserType};
    use std::net::{IpAddr, Ipv4Addr};

    /// Stub backend on an ephemeral localhost port.
    pub(crate) async fn stub() -> StubServer {
        start_stub_server_on(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
            .await
            .expect("stub server should start")
    }

    pub(crate) fn client_for(server: &StubServer, session: Session) -> ApiClient {
        let config = ClientConfig {
            analytics: AnalyticsSource::Remote,
            ..ClientConfig::with_base_url(server.base_url())
        };
        ApiClient::new(config, session).unwrap()
    }

    /// Client signed in as the given fixture account.
    pub(crate) async fn signed_in(server: &StubServer, kind: UserType, email: &str) -> ApiClient {
        let client = client_for(server, Session::anonymous());
        client
            .login(
                kind,
                &LoginRequest {
                    email: email.into(),
                    password: fixtures::PASSWORD.into(),
                },
            )
            .await
            .expect("fixture login should succeed");
        client
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(
            ClientConfig::with_base_url("http://localhost:3000/api/v1/"),
            Session::anonymous(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
        assert_eq!(client.url("/auth/me"), "http://localhost:3000/api/v1/auth/me");
    }

    #[test]
    fn default_config_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/api/v1");
        assert!(config.timeout.is_none());
        assert!(matches!(config.analytics, AnalyticsSource::Mock(_)));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ApiClient::new(
            ClientConfig::with_base_url("localhost:3000"),
            Session::anonymous(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[tokio::test]
    async fn bearer_header_sent_only_with_token() {
        let mut server = stub().await;

        let anonymous = client_for(&server, Session::anonymous());
        anonymous
            .clinics(PageQuery::default(), &Default::default())
            .await
            .unwrap();

        let authed = client_for(&server, Session::with_token("not-a-real-token"));
        // Public endpoint: a bad token is still sent but not checked.
        authed
            .clinics(PageQuery::default(), &Default::default())
            .await
            .unwrap();

        let log = server.context().access_log();
        assert_eq!(log.len(), 2);
        assert!(!log[0].bearer, "anonymous request must omit Authorization");
        assert!(log[1].bearer, "token must be sent as a bearer header");
        assert!(log.iter().all(|entry| entry.json_content_type));

        server.shutdown();
    }

    #[tokio::test]
    async fn first_page_of_25_patients() {
        let mut server = stub().await;
        let client = signed_in(&server, UserType::Clinic, fixtures::CLINIC_EMAIL).await;

        let page = client
            .clinic_patients(PageQuery::new(1, 10), &PatientFilter::default())
            .await
            .unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);

        let last = client
            .clinic_patients(PageQuery::new(3, 10), &PatientFilter::default())
            .await
            .unwrap();
        assert_eq!(last.data.len(), 5);

        server.shutdown();
    }

    #[tokio::test]
    async fn invalid_credentials_message_passes_through() {
        let mut server = stub().await;
        let client = client_for(&server, Session::anonymous());

        let err = client
            .login(
                UserType::Patient,
                &LoginRequest {
                    email: fixtures::PATIENT_EMAIL.into(),
                    password: "wrong-password".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
        assert!(!client.session().is_authenticated());

        server.shutdown();
    }

    #[tokio::test]
    async fn non_json_error_body_reports_status() {
        let mut server = stub().await;
        let client = client_for(&server, Session::anonymous());

        // Unknown route: axum's default 404 has an empty body.
        let err = client
            .get::<serde_json::Value>("/no/such/route")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404");

        server.shutdown();
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        // Reserve a port, then release it so nothing is listening there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base = format!("http://127.0.0.1:{port}/api/v1");

        let client = ApiClient::new(ClientConfig::with_base_url(base), Session::anonymous())
            .unwrap();
        let err = client
            .clinics(PageQuery::default(), &Default::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(err.to_string(), "Network error");
    }

    #[tokio::test]
    async fn unexpected_success_body_is_decode_error() {
        let mut server = stub().await;
        let client = client_for(&server, Session::anonymous());

        // A clinic page is not a list of strings.
        let err = client
            .get::<Vec<String>>("/public/clinics")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        server.shutdown();
    }
}
