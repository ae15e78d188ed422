//! Route definitions and handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::error;

use super::assets;
use super::headers::{security_headers, Nonce};
use super::page::PageRenderer;
use crate::config::Config;
use crate::terminal::{VisitorInfo, FALLBACK_CITY, FALLBACK_COLO, FALLBACK_COUNTRY, FALLBACK_IP};

/// Shared state for handlers
#[derive(Debug, Clone)]
pub struct SiteState {
    pub config: Arc<Config>,
    pub renderer: Arc<PageRenderer>,
}

impl SiteState {
    pub fn new(config: Config, renderer: PageRenderer) -> Self {
        Self {
            config: Arc::new(config),
            renderer: Arc::new(renderer),
        }
    }
}

/// Site routes, wrapped in the security headers and request tracing
pub fn router(state: SiteState) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
        .route("/script.js", get(assets::script))
        .route("/style.css", get(assets::style));

    if let Some(dir) = &state.config.site.public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), security_headers)),
        )
        .with_state(state)
}

/// Read the visitor's address and edge location from proxy headers
pub fn visitor_from_headers(headers: &HeaderMap) -> VisitorInfo {
    let text = |name: &str| header_text(headers, name);

    let ip = text("cf-connecting-ip")
        .or_else(|| text("x-forwarded-for").and_then(|list| list.split(',').next().map(str::trim)))
        .filter(|ip| !ip.is_empty())
        .unwrap_or(FALLBACK_IP);

    // CF-Ray looks like "8a1f0c2b3d4e5f60-TPE"; the suffix is the edge colo
    let colo = text("cf-ray")
        .and_then(|ray| ray.rsplit_once('-'))
        .map(|(_, colo)| colo)
        .filter(|colo| !colo.is_empty())
        .unwrap_or(FALLBACK_COLO);

    VisitorInfo::new(
        ip,
        text("cf-ipcity").unwrap_or(FALLBACK_CITY),
        text("cf-ipcountry").unwrap_or(FALLBACK_COUNTRY),
        colo,
    )
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// `GET /`
async fn index(
    State(state): State<SiteState>,
    Extension(nonce): Extension<Nonce>,
    headers: HeaderMap,
) -> Response {
    let visitor = visitor_from_headers(&headers);
    match state
        .renderer
        .render_index(&state.config, &visitor, nonce.as_str())
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render index page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// `GET /robots.txt`
async fn robots(State(state): State<SiteState>) -> String {
    robots_txt(&state.config.site.domain)
}

/// `GET /sitemap.xml`
async fn sitemap(State(state): State<SiteState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        sitemap_xml(&state.config.site.domain),
    )
}

pub fn robots_txt(domain: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml",
        domain.trim_end_matches('/')
    )
}

pub fn sitemap_xml(domain: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{}/</loc><priority>1.0</priority></url>
</urlset>"#,
        domain.trim_end_matches('/')
    )
}
