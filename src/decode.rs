use reqwest::StatusCode;

use crate::{
    request::json_kind,
    wire::{ErrorEnvelope, ErrorField},
    ApiError, BondMcpError, JsonMap,
};

/// Builds an [`ApiError`] from a non-success response.
///
/// Never fails: bodies that are not JSON, or JSON without a usable message,
/// degrade to the raw response text with the default error code.
pub(crate) fn decode_api_error(status: StatusCode, body: &str) -> ApiError {
    let fallback = || fallback_message(status, body);

    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return ApiError::new(status.as_u16(), fallback());
    };

    match envelope.error {
        Some(ErrorField::Detailed(error)) => {
            let message = error
                .message
                .filter(|message| !message.is_empty())
                .or(envelope.message)
                .unwrap_or_else(fallback);
            let mut api_error = ApiError::new(status.as_u16(), message);
            if let Some(code) = error.code.filter(|code| !code.is_empty()) {
                api_error = api_error.with_code(code);
            }
            if let Some(serde_json::Value::Object(details)) = error.details {
                api_error = api_error.with_details(details);
            }
            api_error
        }
        Some(ErrorField::Text(message)) if !message.is_empty() => {
            ApiError::new(status.as_u16(), message)
        }
        _ => {
            let message = envelope
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(fallback);
            ApiError::new(status.as_u16(), message)
        }
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    if !body.trim().is_empty() {
        return body.to_owned();
    }
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {}: {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// Decodes a 2xx body into a JSON object. Empty bodies decode to an empty object.
pub(crate) fn decode_success_body(body: &str) -> Result<JsonMap, BondMcpError> {
    if body.trim().is_empty() {
        return Ok(JsonMap::new());
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(BondMcpError::Decode(format!(
            "expected JSON object in response, got {}",
            json_kind(&other)
        ))),
        Err(err) => Err(BondMcpError::Decode(format!(
            "invalid response JSON: {err}; body: {body}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use crate::{decode, BondMcpError, DEFAULT_ERROR_CODE};

    #[test]
    fn structured_error_body() {
        let body = json!({
            "error": {"message": "bad", "code": "invalid_request", "details": {"field": "query"}}
        })
        .to_string();
        let error = decode::decode_api_error(StatusCode::BAD_REQUEST, &body);

        assert_eq!(error.status, 400);
        assert_eq!(error.message, "bad");
        assert_eq!(error.code, "invalid_request");
        assert_eq!(
            error.details.as_ref().and_then(|d| d.get("field")),
            Some(&json!("query"))
        );
    }

    #[test]
    fn non_json_body_uses_raw_text() {
        let error = decode::decode_api_error(StatusCode::BAD_REQUEST, "upstream exploded");
        assert_eq!(error.message, "upstream exploded");
        assert_eq!(error.code, DEFAULT_ERROR_CODE);
        assert!(error.details.is_none());
    }

    #[test]
    fn json_without_error_shape_uses_raw_text() {
        let body = r#"{"status":"down"}"#;
        let error = decode::decode_api_error(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(error.message, body);
        assert_eq!(error.code, DEFAULT_ERROR_CODE);
    }

    #[test]
    fn error_object_without_message_keeps_code() {
        let body = r#"{"error":{"code":"quota"}}"#;
        let error = decode::decode_api_error(StatusCode::FORBIDDEN, body);
        assert_eq!(error.message, body);
        assert_eq!(error.code, "quota");
    }

    #[test]
    fn plain_string_error_and_top_level_message() {
        let error = decode::decode_api_error(StatusCode::UNAUTHORIZED, r#"{"error":"bad key"}"#);
        assert_eq!(error.message, "bad key");

        let error = decode::decode_api_error(StatusCode::NOT_FOUND, r#"{"message":"missing"}"#);
        assert_eq!(error.message, "missing");
        assert_eq!(error.code, DEFAULT_ERROR_CODE);
    }

    #[test]
    fn empty_body_uses_status_reason() {
        let error = decode::decode_api_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(error.message, "HTTP 502: Bad Gateway");
    }

    #[test]
    fn non_object_details_are_dropped() {
        let body = r#"{"error":{"message":"m","details":["a"]}}"#;
        let error = decode::decode_api_error(StatusCode::BAD_REQUEST, body);
        assert!(error.details.is_none());
    }

    #[test]
    fn success_body_must_be_object() {
        assert!(decode::decode_success_body("").unwrap().is_empty());
        assert_eq!(
            decode::decode_success_body(r#"{"status":"ok"}"#)
                .unwrap()
                .get("status"),
            Some(&json!("ok"))
        );
        assert!(matches!(
            decode::decode_success_body("[1,2]"),
            Err(BondMcpError::Decode(_))
        ));
        assert!(matches!(
            decode::decode_success_body("<html>"),
            Err(BondMcpError::Decode(_))
        ));
    }
}
