//! Framework-neutral captured request and response.
//!
//! Hosts with their own request types implement the view traits from
//! `reqlog-core` directly. These structs cover everything else: tests, the
//! demo, and hosts that buffer requests before logging them.

use serde::Serialize;
use serde_json::Value;

/// A request as seen by the logger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// Headers in arrival order, names as supplied by the transport.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub user: Option<Value>,
    pub route_name: Option<String>,
}

impl CapturedRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize `body` as JSON and set `Content-Type: application/json`.
    pub fn with_json_body<T: Serialize>(self, body: &T) -> Self {
        let bytes = serde_json::to_vec(body).unwrap_or_default();
        self.with_header("Content-Type", "application/json")
            .with_body(bytes)
    }

    pub fn with_user(mut self, user: Value) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
        self.route_name = Some(name.into());
        self
    }

    /// Path plus `?query` when a non-empty query string is present.
    pub fn full_path(&self) -> String {
        match self.query.as_deref() {
            Some(q) if !q.is_empty() => format!("{}?{}", self.path, q),
            _ => self.path.clone(),
        }
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response as seen by the logger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Structured data the handler rendered, when the framework keeps it.
    pub rendered: Option<Value>,
}

impl CapturedResponse {
    /// An empty response with no content type.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    /// A JSON response that keeps its rendered data alongside the bytes.
    pub fn json(status_code: u16, data: Value) -> Self {
        let body = serde_json::to_vec(&data).unwrap_or_default();
        Self {
            status_code,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
            rendered: Some(data),
        }
    }

    /// A response carrying raw bytes of the given content type.
    pub fn bytes(status_code: u16, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            headers: vec![("Content-Type".to_string(), content_type.into())],
            body: body.into(),
            rendered: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }
}

fn find_header<'h>(headers: &'h [(String, String)], name: &str) -> Option<&'h str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
