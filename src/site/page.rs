//! HTML page rendering
//!
//! The page is a single minijinja template. Auto-escaping is on (the
//! template name ends in `.html`), so visitor-controlled header values can
//! be interpolated directly.

use minijinja::{context, Environment};

use crate::config::Config;
use crate::error::Result;
use crate::terminal::VisitorInfo;

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Compiled page template
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the page for one request
    pub fn render_index(&self, config: &Config, visitor: &VisitorInfo, nonce: &str) -> Result<String> {
        let template = self.env.get_template(INDEX_TEMPLATE_NAME)?;
        let html = template.render(context! {
            profile => &config.profile,
            tagline => config.profile.tagline(),
            github_url => config.profile.github_url(),
            domain => config.site.domain.trim_end_matches('/'),
            greeting => &config.terminal.greeting,
            prompt => config.terminal.prompt.trim_end(),
            tap_count => config.terminal.tap_count,
            tap_window_ms => config.terminal.tap_window_ms,
            tap_focus_delay_ms => config.terminal.tap_focus_delay_ms,
            visitor => visitor,
            shared_visitor => config.terminal.share_visitor_info.then_some(visitor),
            nonce => nonce,
        })?;
        Ok(html)
    }
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer").finish_non_exhaustive()
    }
}
