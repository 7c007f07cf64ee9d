//! Server-side session gate.
//!
//! Runs on every navigable request (API routes, docs, and static assets
//! are exempt) and checks for the session cookie. Coarse allow/deny
//! only: it knows whether a session exists, never which role it has.
//! Role-aware decisions live in the client guard
//! ([`crate::session::guard`]).

use axum::{
    extract::Request,
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::{ROUTE_DASHBOARD, ROUTE_SIGN_IN, SESSION_COOKIE};

/// Paths the gate never intercepts.
const EXEMPT_PREFIXES: &[&str] = &[
    "/api/",
    "/health",
    "/swagger-ui",
    "/api-docs",
    "/assets/",
    "/favicon.ico",
];

pub async fn session_gate(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if is_exempt(path) {
        return next.run(request).await;
    }

    let signed_in = has_session_cookie(request.headers());
    let on_sign_in_page = path.starts_with(ROUTE_SIGN_IN);

    if !signed_in && !on_sign_in_page {
        tracing::debug!(path, "no session cookie, redirecting to sign-in");
        return Redirect::temporary(ROUTE_SIGN_IN).into_response();
    }

    if signed_in && on_sign_in_page {
        return Redirect::temporary(ROUTE_DASHBOARD).into_response();
    }

    next.run(request).await
}

fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Check whether the session cookie is present (presence only, the
/// value is never inspected).
pub fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == SESSION_COOKIE && !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_detects_session_cookie() {
        let headers = headers_with_cookie("session=abc123");
        assert!(has_session_cookie(&headers));
    }

    #[test]
    fn test_detects_session_cookie_among_others() {
        let headers = headers_with_cookie("theme=dark; session=abc123; lang=en");
        assert!(has_session_cookie(&headers));
    }

    #[test]
    fn test_empty_session_cookie_does_not_count() {
        let headers = headers_with_cookie("session=");
        assert!(!has_session_cookie(&headers));
    }

    #[test]
    fn test_no_cookie_header() {
        assert!(!has_session_cookie(&HeaderMap::new()));
    }

    #[test]
    fn test_similar_cookie_name_does_not_match() {
        let headers = headers_with_cookie("session_hint=abc");
        assert!(!has_session_cookie(&headers));
    }

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt("/api/auth/login"));
        assert!(is_exempt("/health"));
        assert!(is_exempt("/assets/app.js"));
        assert!(is_exempt("/favicon.ico"));
        assert!(!is_exempt("/dashboard"));
        assert!(!is_exempt("/signin"));
        assert!(!is_exempt("/"));
    }
}
