//! HTTP site
//!
//! Serves the portfolio page with the visitor's connection info filled in,
//! plus `robots.txt`, `sitemap.xml`, the client script and stylesheet, and
//! (optionally) extra static files. Every response carries the security
//! headers from [`headers`].

mod assets;
pub mod headers;
mod page;
mod profile;
mod routes;

pub use page::PageRenderer;
pub use profile::Profile;
pub use routes::{robots_txt, router, sitemap_xml, visitor_from_headers, SiteState};

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, SiteError};

/// Build the router for a configuration
pub fn app(config: Config) -> Result<axum::Router> {
    let renderer = PageRenderer::new()?;
    Ok(router(SiteState::new(config, renderer)))
}

/// Bind and serve until the process is stopped
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.site.bind_addr.clone();
    let app = app(config)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| SiteError::BindFailed {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

    info!(address = %addr, "Serving portfolio site");

    axum::serve(listener, app)
        .await
        .map_err(|e| SiteError::Serve(e.to_string()))?;

    Ok(())
}
