/// API client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a locally running backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash
    /// (default: `http://localhost:8080/api`).
    pub base_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

/// Default API base URL for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                     |
    /// |--------------------------------|-----------------------------|
    /// | `OPSDESK_API_URL`              | `http://localhost:8080/api` |
    /// | `OPSDESK_REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let base_url = std::env::var("OPSDESK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let request_timeout_secs: u64 = std::env::var("OPSDESK_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("OPSDESK_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self::new(base_url).with_timeout(request_timeout_secs)
    }

    /// Build a configuration pointing at the given base URL. A trailing
    /// slash is trimmed so endpoint paths can always be joined with a
    /// leading one.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
