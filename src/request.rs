use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{BondMcpError, JsonMap, Result};

/// Query string parameters, in insertion order.
pub type QueryParams = Vec<(String, String)>;

/// HTTP methods accepted by the API.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = BondMcpError;

    /// Parses a method name case-insensitively.
    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(BondMcpError::Configuration(format!(
                "unsupported HTTP method: {value}"
            ))),
        }
    }
}

/// Single API call: method, path relative to the base URL, optional body and query.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Appended verbatim to the client's base URL.
    pub path: String,
    /// JSON body; sent for POST/PUT/DELETE, ignored for GET.
    pub body: Option<JsonMap>,
    /// Query parameters; sent for GET only.
    pub query: QueryParams,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: JsonMap) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `payload` as the request body.
    ///
    /// The payload must serialize to a JSON object.
    pub fn with_json<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self> {
        let body = to_json_map(payload)?;
        Ok(self.with_body(body))
    }

    pub fn with_query<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Body to put on the wire; GET requests never carry one.
    pub(crate) fn outgoing_body(&self) -> Option<&JsonMap> {
        self.body.as_ref().filter(|_| self.method != Method::Get)
    }

    /// Query to put on the wire; only GET requests carry one.
    pub(crate) fn outgoing_query(&self) -> Option<&QueryParams> {
        (self.method == Method::Get && !self.query.is_empty()).then_some(&self.query)
    }
}

pub(crate) fn to_json_map<T: Serialize + ?Sized>(payload: &T) -> Result<JsonMap> {
    match serde_json::to_value(payload) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(BondMcpError::Configuration(format!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(err) => Err(BondMcpError::Configuration(format!(
            "request body could not be serialized: {err}"
        ))),
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
