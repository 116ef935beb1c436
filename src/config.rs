use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "RuralCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend base URL used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";

/// Environment variable that overrides the backend base URL.
pub const API_BASE_URL_ENV: &str = "RURALCARE_API_BASE_URL";

/// Override shared with the web frontend's build, read when
/// `API_BASE_URL_ENV` is unset or blank.
pub const PUBLIC_API_BASE_URL_ENV: &str = "NEXT_PUBLIC_API_BASE_URL";

/// Environment variable holding the stub backend bind address.
pub const STUB_ADDR_ENV: &str = "RURALCARE_STUB_ADDR";
pub const DEFAULT_STUB_ADDR: &str = "127.0.0.1:3000";

/// Simulated network latency for mock analytics.
pub const ANALYTICS_LATENCY: Duration = Duration::from_millis(500);

/// How long a success banner stays visible.
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Default `EnvFilter` directive when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "ruralcare_lib=info,ruralcare=info"
}

/// Resolve the backend base URL: `RURALCARE_API_BASE_URL`, then
/// `NEXT_PUBLIC_API_BASE_URL`, then the default.
pub fn api_base_url() -> String {
    base_url_from([
        std::env::var(API_BASE_URL_ENV).ok(),
        std::env::var(PUBLIC_API_BASE_URL_ENV).ok(),
    ])
}

/// First non-blank candidate wins.
fn base_url_from<const N: usize>(candidates: [Option<String>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Bind address for the stub backend.
pub fn stub_addr() -> String {
    std::env::var(STUB_ADDR_ENV).unwrap_or_else(|_| DEFAULT_STUB_ADDR.to_string())
}

/// Get the application data directory.
/// ~/RuralCare/ on all platforms; falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// File holding the persisted session token.
pub fn session_file() -> PathBuf {
    app_data_dir().join("session")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("RuralCare"));
    }

    #[test]
    fn session_file_under_app_data() {
        let file = session_file();
        assert!(file.starts_with(app_data_dir()));
        assert!(file.ends_with("session"));
    }

    #[test]
    fn base_url_defaults_when_unset_or_blank() {
        assert_eq!(base_url_from([None, None]), DEFAULT_API_BASE_URL);
        assert_eq!(
            base_url_from([Some("   ".into()), None]),
            DEFAULT_API_BASE_URL
        );
    }

    #[test]
    fn base_url_override_trims_trailing_slash() {
        assert_eq!(
            base_url_from([Some("https://health.example.org/api/v1/".into()), None]),
            "https://health.example.org/api/v1"
        );
    }

    #[test]
    fn public_base_url_used_when_own_override_missing() {
        let public = Some("https://health.example.org/api/v1".to_string());
        assert_eq!(
            base_url_from([None, public.clone()]),
            "https://health.example.org/api/v1"
        );
        assert_eq!(
            base_url_from([Some(" ".into()), public.clone()]),
            "https://health.example.org/api/v1"
        );
        assert_eq!(
            base_url_from([Some("http://10.0.0.5:3000/api/v1".into()), public]),
            "http://10.0.0.5:3000/api/v1"
        );
    }

    #[test]
    fn api_base_url_reads_public_variable() {
        std::env::remove_var(API_BASE_URL_ENV);
        std::env::set_var(PUBLIC_API_BASE_URL_ENV, "https://health.example.org/api/v1/");
        let resolved = api_base_url();
        std::env::remove_var(PUBLIC_API_BASE_URL_ENV);
        assert_eq!(resolved, "https://health.example.org/api/v1");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn analytics_latency_is_half_a_second() {
        assert_eq!(ANALYTICS_LATENCY.as_millis(), 500);
    }
}
