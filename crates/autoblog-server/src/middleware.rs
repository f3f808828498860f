//! Request middleware
//!
//! - `cors`: answers preflight requests and stamps the permissive CORS
//!   headers on every response
//! - `require_access_key`: checks the configured access key, if any

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Client-Info, Apikey";

/// Header carrying the key when no Authorization header is used
const APIKEY_HEADER: &str = "apikey";

/// Answer `OPTIONS` directly and add CORS headers to everything else
pub async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Reject requests without the configured access key
///
/// Accepts `Authorization: Bearer <key>` or `apikey: <key>`. When no key
/// is configured every request passes.
pub async fn require_access_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.access_key() else {
        return Ok(next.run(request).await);
    };

    match provided_key(&headers) {
        Some(key) if key == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!("invalid access key provided");
            Err(ApiError::Unauthorized)
        }
        None => {
            debug!("no access key provided");
            Err(ApiError::Unauthorized)
        }
    }
}

fn provided_key(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    bearer.or_else(|| {
        headers
            .get(APIKEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_key_prefers_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer one"));
        headers.insert(APIKEY_HEADER, HeaderValue::from_static("two"));
        assert_eq!(provided_key(&headers), Some("one"));
    }

    #[test]
    fn test_provided_key_from_apikey_header() {
        let mut headers = HeaderMap::new();
        headers.insert(APIKEY_HEADER, HeaderValue::from_static("two"));
        assert_eq!(provided_key(&headers), Some("two"));
    }

    #[test]
    fn test_provided_key_ignores_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(provided_key(&headers), None);
    }
}
