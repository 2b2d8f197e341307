use crate::app::App;
use crate::db::{init_db, Database};
use crate::market::MarketClient;
use crate::sync::DealsApi;
use crate::workflow::WorkflowConfig;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::time::Duration;
use tempfile::TempDir;

/// An app over a throwaway SQLite file, with remote sync disabled.
pub struct TestApp {
    _dir: TempDir,
    pub app: App,
}

pub fn test_app() -> TestApp {
    test_app_with(WorkflowConfig::default(), None)
}

pub fn test_app_with(workflow: WorkflowConfig, deals_api: Option<DealsApi>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("test.sqlite3"));
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let market = MarketClient::new(Duration::from_secs(1)).unwrap();
    let app = App::new(db, workflow, deals_api, market).unwrap();
    TestApp { _dir: dir, app }
}

/// A deals API on a port nothing listens on.
pub fn unreachable_deals_api() -> DealsApi {
    DealsApi::new("http://127.0.0.1:9", "http://localhost", Duration::from_secs(2)).unwrap()
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
