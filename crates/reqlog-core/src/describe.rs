//! Request and response describers.
//!
//! Both describers read only through the view traits and never fail: an
//! optional field that cannot be produced degrades to empty or absent, and
//! undecodable bodies are replaced by fixed sentinels.

use serde_json::{Map, Value};

use reqlog_contracts::{
    config::LoggerConfig,
    record::{
        RequestDescription, ResponseDescription, BINARY_RESPONSE_CONTENT, NOT_A_JSON_BODY,
        NOT_A_SERIALIZABLE_RESPONSE,
    },
};
use reqlog_redact::{is_empty_value, mask_sensitive_data};
use reqlog_token::payload_from_authorization;

use crate::traits::{RequestView, ResponseView};

/// Describe `request`, masking sensitive keys in its body with `sensitive_fragments`.
pub fn describe_request<R>(request: &R, sensitive_fragments: &[String]) -> RequestDescription
where
    R: RequestView + ?Sized,
{
    let raw_headers = request.headers();

    let jwt_payload = raw_headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("Authorization"))
        .map(|(_, value)| payload_from_authorization(value));

    let mut headers = Map::new();
    for (name, value) in raw_headers {
        headers.insert(name, Value::String(value));
    }

    RequestDescription {
        url: request.full_path(),
        method: request.method().to_string(),
        headers,
        body: request_body(request.body(), sensitive_fragments),
        user: request.user(),
        jwt_payload,
    }
}

/// Interpret raw request bytes.
///
/// Empty → `{}`; JSON → the decoded value with sensitive keys masked;
/// anything else → `"Not a JSON body"`.
pub fn request_body(raw: &[u8], sensitive_fragments: &[String]) -> Value {
    if raw.is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_slice::<Value>(raw) {
        Ok(mut body) => {
            mask_sensitive_data(&mut body, sensitive_fragments);
            body
        }
        Err(_) => Value::String(NOT_A_JSON_BODY.to_string()),
    }
}

/// Describe `response` according to its content type.
pub fn describe_response<S>(response: &S, config: &LoggerConfig) -> ResponseDescription
where
    S: ResponseView + ?Sized,
{
    let data = response_data(response, config);
    ResponseDescription {
        data: if is_empty_value(&data) {
            Value::String(NOT_A_SERIALIZABLE_RESPONSE.to_string())
        } else {
            data
        },
        status_code: response.status_code(),
    }
}

/// Content-type-directed body interpretation, before the empty-value fallback.
///
/// - `application/json`: the rendered data if the framework kept it, else `{}`
/// - configured binary types: `{"content": "PDF bytes response"}`
/// - anything else: the body decoded as JSON, else `{}`
pub fn response_data<S>(response: &S, config: &LoggerConfig) -> Value
where
    S: ResponseView + ?Sized,
{
    let media = response.content_type().map(media_type).unwrap_or_default();

    if media == "application/json" {
        return response
            .rendered_data()
            .unwrap_or_else(|| Value::Object(Map::new()));
    }

    if config.is_binary_content_type(&media) {
        let mut binary = Map::new();
        binary.insert(
            "content".to_string(),
            Value::String(BINARY_RESPONSE_CONTENT.to_string()),
        );
        return Value::Object(binary);
    }

    serde_json::from_slice(response.body()).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// The media type of a `Content-Type` value: parameters dropped, lowercased.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
