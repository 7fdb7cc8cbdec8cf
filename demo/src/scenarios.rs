//! Scripted requests run through a `RequestLogger`.
//!
//! Each scenario builds a request, serves it with a small handler that
//! annotates its `ExecutionLog`, and returns the response. The logger decides
//! what gets emitted.

use serde_json::{json, Map, Value};

use reqlog_contracts::http::{CapturedRequest, CapturedResponse};
use reqlog_core::{ExecutionLog, RequestLogger};

/// A bearer token whose payload is `{"sub":"1234567890","name":"John Doe","iat":1516239022}`.
const SAMPLE_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9\
    .eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ\
    .SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

/// Handler failure surfaced by a scenario.
pub type HandlerError = String;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// GET /foo: no body, empty response.
pub fn plain_get(logger: &RequestLogger) -> Result<CapturedResponse, HandlerError> {
    let request = CapturedRequest::new("GET", "/foo").with_route_name("foo-list");
    logger.handle(&request, |_, _| Ok(CapturedResponse::new(200)))
}

/// POST /login with a password in the body and a bearer token.
pub fn login(logger: &RequestLogger) -> Result<CapturedResponse, HandlerError> {
    let request = CapturedRequest::new("POST", "/login")
        .with_query("next=/home")
        .with_header("Authorization", format!("Bearer {SAMPLE_TOKEN}"))
        .with_json_body(&json!({
            "username": "jdoe",
            "password": "hunter2",
            "devices": [{ "name": "laptop", "password_hint": "pet" }]
        }))
        .with_user(json!({ "id": 1234567890, "username": "jdoe" }))
        .with_route_name("auth-login");

    logger.handle(&request, |req, log| {
        log.add_task_info(object(json!({ "flow": "password-login" })));
        log.start_timing_step("credential_check");
        let authenticated = !req.body.is_empty();
        log.stop_timing_step("credential_check");
        log.add_log_step(
            "credentials checked",
            object(json!({ "authenticated": authenticated })),
        );
        Ok(CapturedResponse::json(200, json!({ "session": "s-81f2", "expires_in": 3600 })))
    })
}

/// GET /invoices/42/pdf: binary body is never decoded.
pub fn pdf_download(logger: &RequestLogger) -> Result<CapturedResponse, HandlerError> {
    let request = CapturedRequest::new("GET", "/invoices/42/pdf").with_route_name("invoice-pdf");
    logger.handle(&request, |_, log| {
        log.add_log_message("rendered invoice");
        Ok(CapturedResponse::bytes(
            200,
            "application/pdf",
            b"%PDF-1.7\n%\xe2\xe3\xcf\xd3".to_vec(),
        ))
    })
}

/// GET /health/live: excluded by the default demo configuration.
pub fn health_check(logger: &RequestLogger) -> Result<CapturedResponse, HandlerError> {
    let request = CapturedRequest::new("GET", "/health/live");
    logger.handle(&request, |_, _| Ok(CapturedResponse::json(200, json!({ "status": "ok" }))))
}

/// POST /reports with a non-JSON body and a handler that narrates its steps.
pub fn annotated_report(logger: &RequestLogger) -> Result<CapturedResponse, HandlerError> {
    let request = CapturedRequest::new("POST", "/reports")
        .with_header("Content-Type", "text/csv")
        .with_body(b"month,total\n2023-01,1200\n".to_vec())
        .with_route_name("report-create");

    logger.handle(&request, |req, log| build_report(req, log))
}

fn build_report(request: &CapturedRequest, log: &mut ExecutionLog) -> Result<CapturedResponse, HandlerError> {
    log.add_task_info(object(json!({ "report": "monthly-totals" })));

    log.start_timing_step("parse");
    let rows = std::str::from_utf8(&request.body)
        .map_err(|e| format!("report body is not UTF-8: {e}"))?
        .lines()
        .skip(1)
        .count();
    log.stop_timing_step("parse");
    log.add_log_step("parsed upload", object(json!({ "rows": rows })));

    // Started but never stopped: reported as 0.0.
    log.start_timing_step("publish");
    log.add_log_message("queued for publishing");

    Ok(CapturedResponse::json(202, json!({ "rows": rows, "status": "queued" })))
}

/// POST /reports with a body the handler rejects: no record is emitted.
pub fn failing_handler(logger: &RequestLogger) -> Result<CapturedResponse, HandlerError> {
    let request = CapturedRequest::new("POST", "/reports")
        .with_body(vec![0xff, 0xfe])
        .with_route_name("report-create");
    logger.handle(&request, |req, log| build_report(req, log))
}
