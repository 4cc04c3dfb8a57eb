//! `bondmcp-http` is an async HTTP client for the BondMCP public health API.
//!
//! All calls go through one request executor, [`BondMcpClient::send`], which:
//! - authenticates with a bearer token or `X-API-Key` header
//! - bounds each attempt by a timeout
//! - retries HTTP 429 with exponential backoff, honoring `Retry-After`
//! - maps failures into [`BondMcpError`]
//!
//! Resource facades ([`BondMcpClient::ask`], [`BondMcpClient::labs`],
//! [`BondMcpClient::supplements`], ...) shape typed payloads and delegate to it.

pub mod api;
mod client;
pub mod credentials;
mod decode;
mod error;
mod options;
mod request;
pub mod retry;
pub mod types;
mod wire;

pub use client::{BondMcpClient, USER_AGENT};
pub use error::{ApiError, BondMcpError, NetworkErrorKind, DEFAULT_ERROR_CODE};
pub use options::{
    AuthScheme, ClientOptions, Environment, RetryPolicy, API_KEY_ENV, BASE_URL_ENV,
    DEFAULT_BASE_URL, STAGING_BASE_URL,
};
pub use request::{ApiRequest, Method, QueryParams};

/// JSON object returned by successful calls.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

pub type Result<T> = std::result::Result<T, BondMcpError>;
