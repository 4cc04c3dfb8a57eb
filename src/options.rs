/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.bondmcp.com";

/// Staging API endpoint.
pub const STAGING_BASE_URL: &str = "https://api-staging.bondmcp.com";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BONDMCP_PUBLIC_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "BONDMCP_PUBLIC_API_BASE_URL";

/// Deployment the client talks to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Environment {
    #[default]
    Production,
    Staging,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => DEFAULT_BASE_URL,
            Self::Staging => STAGING_BASE_URL,
        }
    }
}

/// How the API key is presented to the server.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`.
    #[default]
    Bearer,
    /// `X-API-Key: <key>`.
    ApiKeyHeader,
}

/// Which failures are retried.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RetryPolicy {
    /// Only HTTP 429 is retried. Network failures and other statuses fail immediately.
    #[default]
    RateLimitOnly,
    /// HTTP 429, 500, 502, 503, 504, connect failures and timeouts are retried.
    Broad,
}

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry delay in milliseconds (exponential strategy).
    pub retry_delay_ms: u64,
    pub retry_policy: RetryPolicy,
    pub auth: AuthScheme,
    /// Upper bound for a whole call, retries and backoff included.
    pub overall_timeout_ms: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_retries: 0,
            retry_delay_ms: 1_000,
            retry_policy: RetryPolicy::RateLimitOnly,
            auth: AuthScheme::Bearer,
            overall_timeout_ms: None,
        }
    }
}
