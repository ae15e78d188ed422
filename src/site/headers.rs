//! Security headers middleware
//!
//! Generates a fresh script nonce for every request, exposes it to handlers
//! through request extensions, and stamps the response with the CSP and the
//! other hardening headers.

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use super::routes::SiteState;

/// Per-request script nonce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(pub String);

impl Nonce {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `Content-Security-Policy` allowing only same-origin content, the
/// font/icon CDNs, and inline scripts carrying `nonce`
pub fn content_security_policy(nonce: &str) -> String {
    format!(
        "default-src 'self'; \
         script-src 'self' 'nonce-{nonce}' https://static.cloudflareinsights.com; \
         style-src 'self' 'unsafe-inline' https://fonts.googleapis.com https://cdnjs.cloudflare.com; \
         font-src 'self' https://fonts.gstatic.com https://cdnjs.cloudflare.com; \
         frame-ancestors 'none';"
    )
}

/// Headers that do not depend on the request
pub fn static_headers(cache_max_age_secs: u64) -> Vec<(HeaderName, String)> {
    vec![
        (
            HeaderName::from_static("permissions-policy"),
            "camera=(), microphone=(), geolocation=(), payment=()".to_string(),
        ),
        (
            header::CACHE_CONTROL,
            format!("public, max-age={}", cache_max_age_secs),
        ),
        (
            header::REFERRER_POLICY,
            "strict-origin-when-cross-origin".to_string(),
        ),
        (
            header::STRICT_TRANSPORT_SECURITY,
            "max-age=63072000; includeSubDomains; preload".to_string(),
        ),
        (header::X_XSS_PROTECTION, "0".to_string()),
        (header::X_FRAME_OPTIONS, "DENY".to_string()),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
    ]
}

/// Security headers middleware
pub async fn security_headers(
    State(state): State<SiteState>,
    mut request: Request,
    next: Next,
) -> Response {
    let nonce = Nonce::generate();
    request.extensions_mut().insert(nonce.clone());

    let mut response = next.run(request).await;

    let mut headers = vec![(
        header::CONTENT_SECURITY_POLICY,
        content_security_policy(nonce.as_str()),
    )];
    headers.extend(static_headers(state.config.site.cache_max_age_secs));

    let response_headers = response.headers_mut();
    for (name, value) in headers {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                response_headers.insert(name, value);
            }
            Err(e) => warn!("Skipping invalid header {}: {}", name, e),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_embeds_nonce() {
        let csp = content_security_policy("abc123");
        assert!(csp.contains("'nonce-abc123'"));
        assert!(csp.starts_with("default-src 'self'; script-src"));
        assert!(csp.ends_with("frame-ancestors 'none';"));
    }

    #[test]
    fn test_nonces_are_unique() {
        assert_ne!(Nonce::generate(), Nonce::generate());
    }

    #[test]
    fn test_cache_control_uses_configured_age() {
        let headers = static_headers(60);
        let cache = headers
            .iter()
            .find(|(name, _)| *name == header::CACHE_CONTROL)
            .map(|(_, value)| value.as_str());
        assert_eq!(cache, Some("public, max-age=60"));
    }
}
