use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use crate::{
    app::build_app,
    config::AppConfig,
    notifications::testing::{RecordingMailer, SentMail},
    state::AppState,
};

/// Router over a fresh in-memory store, plus the mails it tried to send.
pub struct TestApp {
    pub router: Router,
    pub mail: mpsc::UnboundedReceiver<SentMail>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn with_failing_mailer() -> Self {
        Self::build(true)
    }

    fn build(fail: bool) -> Self {
        let (mailer, mail) = RecordingMailer::new(fail);
        let state = AppState::in_memory(Arc::new(AppConfig::in_memory()), Arc::new(mailer));
        Self {
            router: build_app(state),
            mail,
        }
    }
}

async fn dispatch(router: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, headers, body)
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    dispatch(router, req).await
}

pub async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    raw: &str,
) -> (StatusCode, HeaderMap, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(router, req).await
}
