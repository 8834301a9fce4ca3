//! Access log output for guardian token validation
//!
//! Kept in its own test binary: the `log` logger is process-global.

mod common;

use std::sync::Mutex;

use actix_web::{http::StatusCode, test};
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;

use gp_api::create_app;

use common::{context, json_body};

struct CapturingLogger;

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static LOGGER: CapturingLogger = CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = CAPTURED.lock() {
            lines.push(format!("{} {}", record.target(), record.args()));
        }
    }

    fn flush(&self) {}
}

#[actix_web::test]
async fn test_token_value_never_reaches_the_log() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let ctx = context().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens")
        .insert_header(ctx.bearer())
        .set_json(json!({ "studentIds": [ctx.student_id(0)], "deliver": true }))
        .to_request();
    let report = json_body(test::call_service(&app, req).await).await;
    let value = report["data"]["items"][0]["token"]["value"]
        .as_str()
        .unwrap()
        .to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tokens/validate?token={}", value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let _ = test::read_body(resp).await;

    let unknown = "deadbeefcafebabe0123456789abcdef";
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tokens/validate?token={}", unknown))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let _ = test::read_body(resp).await;

    let lines = CAPTURED.lock().unwrap().clone();
    assert!(lines
        .iter()
        .any(|line| line.contains("GET /api/v1/tokens/validate HTTP/1.1")));
    for line in &lines {
        assert!(!line.contains(&value), "token logged in full: {}", line);
        assert!(!line.contains(unknown), "token logged in full: {}", line);
    }
}
