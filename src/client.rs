use std::fmt;
use std::time::Duration;

use reqwest::{header, StatusCode};
use serde::Serialize;
use tokio::time::sleep;

use crate::{
    api::{
        ApiKeysApi, AskApi, ChatApi, HealthApi, ImportsApi, InsightsApi, LabsApi,
        MedicalRecordsApi, OrchestrateApi, PaymentsApi, SupplementsApi, ToolsApi, WearablesApi,
    },
    decode::{decode_api_error, decode_success_body},
    options::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL},
    request::to_json_map,
    retry, ApiRequest, AuthScheme, BondMcpError, ClientOptions, Environment, JsonMap, Method,
    NetworkErrorKind, QueryParams, Result, RetryPolicy,
};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("bondmcp-rust/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the BondMCP public API.
///
/// Every call goes through one request executor that authenticates, applies
/// the per-attempt timeout, retries rate-limited responses with exponential
/// backoff and maps failures into [`BondMcpError`].
#[derive(Clone)]
pub struct BondMcpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    options: ClientOptions,
}

impl fmt::Debug for BondMcpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BondMcpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl BondMcpClient {
    /// Creates a client for `base_url` authenticating with `api_key`.
    ///
    /// A leading `Bearer ` prefix on the key is dropped; the auth scheme in
    /// [`ClientOptions`] decides how the key is sent.
    pub fn new(base_url: impl Into<String>, api_key: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: normalize_api_key(api_key.as_ref()),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client for the production endpoint.
    pub fn production(api_key: impl AsRef<str>) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    pub fn for_environment(environment: Environment, api_key: impl AsRef<str>) -> Self {
        Self::new(environment.base_url(), api_key)
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `BONDMCP_PUBLIC_API_KEY`: API key (required)
    /// - `BONDMCP_PUBLIC_API_BASE_URL`: endpoint override (optional)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bondmcp_http::BondMcpClient;
    ///
    /// let client = BondMcpClient::from_env().expect("missing BONDMCP_PUBLIC_API_KEY");
    /// ```
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            BondMcpError::Configuration(format!("missing {API_KEY_ENV} environment variable"))
        })?;
        if api_key.trim().is_empty() {
            return Err(BondMcpError::Configuration(format!(
                "{API_KEY_ENV} is set but empty"
            )));
        }
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Ok(Self::new(base_url, api_key))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Uses a caller-provided `reqwest::Client`, e.g. to share a connection pool.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    pub fn ask(&self) -> AskApi<'_> {
        AskApi::new(self)
    }

    pub fn labs(&self) -> LabsApi<'_> {
        LabsApi::new(self)
    }

    pub fn supplements(&self) -> SupplementsApi<'_> {
        SupplementsApi::new(self)
    }

    pub fn wearables(&self) -> WearablesApi<'_> {
        WearablesApi::new(self)
    }

    pub fn medical_records(&self) -> MedicalRecordsApi<'_> {
        MedicalRecordsApi::new(self)
    }

    pub fn insights(&self) -> InsightsApi<'_> {
        InsightsApi::new(self)
    }

    pub fn api_keys(&self) -> ApiKeysApi<'_> {
        ApiKeysApi::new(self)
    }

    pub fn payments(&self) -> PaymentsApi<'_> {
        PaymentsApi::new(self)
    }

    pub fn orchestrate(&self) -> OrchestrateApi<'_> {
        OrchestrateApi::new(self)
    }

    pub fn tools(&self) -> ToolsApi<'_> {
        ToolsApi::new(self)
    }

    pub fn imports(&self) -> ImportsApi<'_> {
        ImportsApi::new(self)
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    /// Executes a request described by a method name.
    ///
    /// `method` is one of `get`, `post`, `put`, `delete` (any case). Anything
    /// else fails with [`BondMcpError::Configuration`] before touching the
    /// network. `data` is the JSON body (ignored for GET); `params` is the
    /// query string (GET only).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        data: Option<JsonMap>,
        params: Option<QueryParams>,
    ) -> Result<JsonMap> {
        let method = method.parse::<Method>()?;
        let request = ApiRequest {
            method,
            path: path.to_owned(),
            body: data,
            query: params.unwrap_or_default(),
        };
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> Result<JsonMap> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn get_with_query(&self, path: &str, query: QueryParams) -> Result<JsonMap> {
        let mut request = ApiRequest::get(path);
        request.query = query;
        self.send(request).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<JsonMap> {
        self.send(ApiRequest::post(path).with_body(to_json_map(body)?))
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<JsonMap> {
        self.send(ApiRequest::put(path).with_body(to_json_map(body)?))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<JsonMap> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Executes one logical API call, retrying according to [`ClientOptions`].
    ///
    /// Returns the decoded JSON object of the first 2xx response. At most
    /// `max_retries + 1` attempts are made.
    pub async fn send(&self, request: ApiRequest) -> Result<JsonMap> {
        match self.options.overall_timeout_ms {
            Some(deadline_ms) => {
                tokio::time::timeout(
                    Duration::from_millis(deadline_ms),
                    self.send_with_retry(&request),
                )
                .await
                .unwrap_or(Err(BondMcpError::Network {
                    kind: NetworkErrorKind::Deadline,
                    source: None,
                }))
            }
            None => self.send_with_retry(&request).await,
        }
    }

    async fn send_with_retry(&self, request: &ApiRequest) -> Result<JsonMap> {
        let url = format!("{}{}", self.base_url, request.path);
        let max_retries = self.options.max_retries;
        let base_delay = Duration::from_millis(self.options.retry_delay_ms);

        for attempt in 0..=max_retries {
            #[cfg(feature = "tracing")]
            tracing::debug!(method = %request.method, url = %url, attempt, "sending API request");

            let response = match self.build_request(request, &url).send().await {
                Ok(response) => response,
                Err(err) if err.is_builder() => {
                    return Err(BondMcpError::Configuration(format!(
                        "invalid request for {url}: {err}"
                    )));
                }
                Err(err) => {
                    if self.should_retry_transport(&err) && attempt < max_retries {
                        self.wait_before_retry(attempt, retry::backoff_delay(base_delay, attempt))
                            .await;
                        continue;
                    }
                    return Err(BondMcpError::from_transport(err));
                }
            };

            let status = response.status();
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response
                .text()
                .await
                .map_err(BondMcpError::from_transport)?;

            if status.is_success() {
                return decode_success_body(&body);
            }

            if self.should_retry_status(status) && attempt < max_retries {
                let delay = retry::next_delay(status, attempt, base_delay, retry_after.as_deref());
                self.wait_before_retry(attempt, delay).await;
                continue;
            }

            return Err(BondMcpError::from_api(decode_api_error(status, &body)));
        }

        Err(BondMcpError::ExhaustedRetries {
            attempts: max_retries.saturating_add(1),
        })
    }

    fn build_request(&self, request: &ApiRequest, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(request.method.to_reqwest(), url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT)
            .timeout(Duration::from_millis(self.options.timeout_ms));

        builder = match self.options.auth {
            AuthScheme::Bearer => builder.bearer_auth(&self.api_key),
            AuthScheme::ApiKeyHeader => builder.header(API_KEY_HEADER, &self.api_key),
        };
        if let Some(query) = request.outgoing_query() {
            builder = builder.query(query);
        }
        if let Some(body) = request.outgoing_body() {
            builder = builder.json(body);
        }
        builder
    }

    fn should_retry_status(&self, status: StatusCode) -> bool {
        match self.options.retry_policy {
            RetryPolicy::RateLimitOnly => status == StatusCode::TOO_MANY_REQUESTS,
            RetryPolicy::Broad => matches!(
                status,
                StatusCode::TOO_MANY_REQUESTS
                    | StatusCode::INTERNAL_SERVER_ERROR
                    | StatusCode::BAD_GATEWAY
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT
            ),
        }
    }

    fn should_retry_transport(&self, err: &reqwest::Error) -> bool {
        self.options.retry_policy == RetryPolicy::Broad && (err.is_timeout() || err.is_connect())
    }

    async fn wait_before_retry(&self, attempt: usize, delay: Duration) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            "retrying API request"
        );

        #[cfg(not(feature = "tracing"))]
        let _ = attempt;

        sleep(delay).await;
    }
}

fn normalize_api_key(key: &str) -> String {
    let trimmed = key.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed[7..].trim_start().to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header;
    use serde_json::json;

    use super::{normalize_api_key, BondMcpClient, USER_AGENT};
    use crate::{ApiRequest, AuthScheme, ClientOptions, Environment};

    fn built(client: &BondMcpClient, request: &ApiRequest) -> reqwest::Request {
        let url = format!("{}{}", client.base_url(), request.path);
        client
            .build_request(request, &url)
            .build()
            .expect("request must build")
    }

    #[test]
    fn normalize_strips_bearer_prefix() {
        assert_eq!(normalize_api_key("  abc123 "), "abc123");
        assert_eq!(normalize_api_key("bEaReR abc123"), "abc123");
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = BondMcpClient::new("https://api.example.com", "secret-key");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn default_headers_use_bearer_auth() {
        let client = BondMcpClient::new("https://api.example.com", "k");
        let request = built(&client, &ApiRequest::get("/health"));

        let headers = request.headers();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer k");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(headers[header::ACCEPT], "application/json");
        assert_eq!(headers[header::USER_AGENT], USER_AGENT);
        assert_eq!(request.url().as_str(), "https://api.example.com/health");
    }

    #[test]
    fn api_key_header_scheme() {
        let client = BondMcpClient::new("https://api.example.com", "k").with_options(
            ClientOptions {
                auth: AuthScheme::ApiKeyHeader,
                ..ClientOptions::default()
            },
        );
        let request = built(&client, &ApiRequest::get("/health"));

        assert_eq!(request.headers()["x-api-key"], "k");
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn get_sends_query_and_no_body() {
        let client = BondMcpClient::new("https://api.example.com", "k");
        let request = ApiRequest::get("/api-keys")
            .with_json(&json!({"ignored": true}))
            .unwrap()
            .with_query("page", "2")
            .with_query("limit", "10");
        let request = built(&client, &request);

        assert_eq!(request.url().query(), Some("page=2&limit=10"));
        assert!(request.body().is_none());
    }

    #[test]
    fn delete_sends_json_body() {
        let client = BondMcpClient::new("https://api.example.com", "k");
        let request = ApiRequest::delete("/api-keys/k1")
            .with_json(&json!({"reason": "rotated"}))
            .unwrap()
            .with_query("ignored", "1");
        let request = built(&client, &request);

        let body = request
            .body()
            .and_then(|body| body.as_bytes())
            .expect("body must be buffered");
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value, json!({"reason": "rotated"}));
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn path_is_appended_verbatim() {
        let client = BondMcpClient::new("https://api.bondmcp.com/api", "k");
        let request = built(&client, &ApiRequest::post("/v1/analyze-medical-record"));
        assert_eq!(
            request.url().as_str(),
            "https://api.bondmcp.com/api/v1/analyze-medical-record"
        );
    }

    #[test]
    fn environment_constructors() {
        let client = BondMcpClient::for_environment(Environment::Staging, "k");
        assert_eq!(client.base_url(), "https://api-staging.bondmcp.com");
        assert_eq!(
            BondMcpClient::production("k").base_url(),
            "https://api.bondmcp.com"
        );
    }
}
