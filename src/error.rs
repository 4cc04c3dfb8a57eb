use std::fmt;

use crate::JsonMap;

/// Error code used when the server does not provide one.
pub const DEFAULT_ERROR_CODE: &str = "api_error";

/// Error payload of a non-success API response.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    /// Human-readable message from the server, or the raw response text.
    pub message: String,
    /// HTTP status code of the response.
    pub status: u16,
    /// Machine-readable error code (`"api_error"` when absent).
    pub code: String,
    /// Structured details attached by the server, if any.
    pub details: Option<JsonMap>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            code: DEFAULT_ERROR_CODE.to_owned(),
            details: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_details(mut self, details: JsonMap) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.code, self.message)
    }
}

/// Failure class of a [`BondMcpError::Network`] error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NetworkErrorKind {
    /// The connection could not be established.
    Connect,
    /// A single attempt exceeded the per-request timeout.
    Timeout,
    /// The whole call exceeded `ClientOptions::overall_timeout_ms`.
    Deadline,
    /// Any other transport failure (TLS, body read, redirect loop, ...).
    Other,
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connect => "failed to connect to API",
            Self::Timeout => "request timed out",
            Self::Deadline => "overall deadline exceeded",
            Self::Other => "request failed",
        };
        f.write_str(label)
    }
}

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum BondMcpError {
    /// Invalid request descriptor or client setup; raised before any network attempt.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Connection failure or timeout.
    #[error("network error: {kind}")]
    Network {
        kind: NetworkErrorKind,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// Non-success HTTP status returned by the API.
    #[error("API error {0}")]
    Api(ApiError),
    /// HTTP 429 returned after all retries were used.
    #[error("rate limit exceeded {0}")]
    RateLimited(ApiError),
    /// The retry loop ended without producing an outcome.
    #[error("exceeded maximum retry attempts ({attempts})")]
    ExhaustedRetries { attempts: usize },
    /// Response decoding or shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
}

impl BondMcpError {
    pub(crate) fn network(kind: NetworkErrorKind, source: reqwest::Error) -> Self {
        Self::Network {
            kind,
            source: Some(source),
        }
    }

    /// Classifies a `reqwest` transport error.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let kind = if err.is_connect() {
            NetworkErrorKind::Connect
        } else if err.is_timeout() {
            NetworkErrorKind::Timeout
        } else {
            NetworkErrorKind::Other
        };
        Self::network(kind, err)
    }

    /// Builds the terminal error for a non-success response.
    pub(crate) fn from_api(error: ApiError) -> Self {
        if error.status == 429 {
            Self::RateLimited(error)
        } else {
            Self::Api(error)
        }
    }

    /// Returns the API error payload for `Api` and `RateLimited` errors.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) | Self::RateLimited(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the HTTP status code if the server produced a response.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|error| error.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns the network failure class, if this is a network error.
    pub fn network_kind(&self) -> Option<NetworkErrorKind> {
        match self {
            Self::Network { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, BondMcpError, NetworkErrorKind, DEFAULT_ERROR_CODE};

    #[test]
    fn api_error_defaults_code() {
        let error = ApiError::new(400, "bad request");
        assert_eq!(error.code, DEFAULT_ERROR_CODE);
        assert!(error.details.is_none());
    }

    #[test]
    fn status_429_maps_to_rate_limited() {
        let err = BondMcpError::from_api(ApiError::new(429, "slow down"));
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(429));

        let err = BondMcpError::from_api(ApiError::new(503, "unavailable"));
        assert!(matches!(err, BondMcpError::Api(_)));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn display_includes_status_code_and_message() {
        let err = BondMcpError::Api(ApiError::new(500, "boom").with_code("internal"));
        assert_eq!(err.to_string(), "API error 500 (internal): boom");
    }

    #[test]
    fn network_error_exposes_kind() {
        let err = BondMcpError::Network {
            kind: NetworkErrorKind::Deadline,
            source: None,
        };
        assert!(err.is_network());
        assert_eq!(err.network_kind(), Some(NetworkErrorKind::Deadline));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "network error: overall deadline exceeded");
    }
}
