use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

/// Session id from the `Cookie` header, if present and well formed.
pub fn read_session_id(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim_matches('"')).ok())
}

pub fn session_cookie(cookie_name: &str, id: &Uuid) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        cookie_name, id
    ))
    .ok()
}
