//! Rendering seam for category pages
//!
//! Category pages populate their product grid from client-side script, so a
//! plain HTTP fetch sees an empty shell. The processor depends on this trait
//! rather than a concrete browser so tests can substitute canned pages.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while rendering a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Timed out loading {url}")]
    PageLoadTimeout { url: String },

    #[error("Timed out waiting for '{selector}' on {url}")]
    WaitTimeout { selector: String, url: String },
}

impl RenderError {
    /// True when the page loaded but the awaited element never appeared
    ///
    /// The processor treats this as "zero containers found" rather than a
    /// hard rendering failure.
    pub fn is_wait_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }
}

/// Renders a page with client-side execution
#[async_trait]
pub trait Renderer {
    /// Navigates to `url`, waits (bounded) for `wait_selector` to be present,
    /// and returns the rendered HTML.
    async fn render(&self, url: &str, wait_selector: &str) -> Result<String, RenderError>;
}
