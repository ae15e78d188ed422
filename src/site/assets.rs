//! Client assets compiled into the binary
//!
//! `/script.js` and `/style.css` are always served from here, so the page
//! works without a `public_dir`. A configured `public_dir` only adds files
//! next to them (favicon, social image).

use axum::{http::header, response::IntoResponse};

pub const SCRIPT_JS: &str = include_str!("../../public/script.js");
pub const STYLE_CSS: &str = include_str!("../../public/style.css");

/// `GET /script.js`
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

/// `GET /style.css`
pub async fn style() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
