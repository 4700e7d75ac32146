pub mod store;

pub use store::{Session, SessionHistory, SessionStore};

use axum::http::{header, HeaderMap};
use uuid::Uuid;

/// Extract the session id from the request's `Cookie` header
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value binding the client to a session
pub fn session_cookie(cookie_name: &str, id: &Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", cookie_name, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_id_from_cookie() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; fcp_session={}; other=1", id)).unwrap(),
        );

        assert_eq!(session_id_from_headers(&headers, "fcp_session"), Some(id));
        assert_eq!(session_id_from_headers(&headers, "missing"), None);
    }

    #[test]
    fn test_invalid_session_id_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("fcp_session=not-a-uuid"));
        assert_eq!(session_id_from_headers(&headers, "fcp_session"), None);
    }

    #[test]
    fn test_session_cookie_format() {
        let id = Uuid::nil();
        assert_eq!(
            session_cookie("fcp_session", &id),
            "fcp_session=00000000-0000-0000-0000-000000000000; Path=/; HttpOnly; SameSite=Lax"
        );
    }
}
