#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use moviefinder::config::Config;
use moviefinder::server::{build_router, AppState};
use tower::ServiceExt;

/// A key variable that no test environment sets.
pub const UNSET_KEY_ENV: &str = "MOVIEFINDER_TEST_UNSET_API_KEY";

pub fn config(base_url: &str, api_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.watchmode.base_url = base_url.to_string();
    config.watchmode.api_key = api_key.map(str::to_string);
    config.watchmode.api_key_env = UNSET_KEY_ENV.to_string();
    config
}

pub fn state(config: Config) -> AppState {
    AppState::from_config(config).unwrap()
}

pub fn app(config: Config) -> Router {
    build_router(state(config))
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` part of the Set-Cookie header, ready to send back.
pub fn session_cookie(response: &Response<Body>) -> String {
    let value = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    value.split(';').next().unwrap().to_string()
}

pub fn assert_redirect_home(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}
