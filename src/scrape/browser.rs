//! Chromium-backed renderer session
//!
//! One browser and one page are launched for the whole run and reused across
//! every category; chromiumoxide requires an explicit async close to release
//! the CDP connection, so the session offers `close()` for the orderly path
//! and a `Drop` that at least stops the event handler task.

use crate::config;
use crate::scrape::renderer::{RenderError, Renderer};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How often to re-check for the awaited element while a page hydrates
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A headless-browser session reused for every category page in a run
pub struct ChromeRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    page_load_timeout: Duration,
    container_wait_timeout: Duration,
}

impl ChromeRenderer {
    /// Launches the browser and opens the single page used for rendering
    pub async fn launch(
        browser_config: &config::BrowserConfig,
        scrape_config: &config::ScrapeConfig,
    ) -> Result<Self, RenderError> {
        let mut builder = BrowserConfig::builder();
        if !browser_config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &browser_config.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder.build().map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(cdp_config).await?;

        // The handler stream must be polled for the CDP connection to make
        // progress; it ends when the browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        tracing::info!("Browser session started");

        Ok(Self {
            browser,
            handler_task,
            page,
            page_load_timeout: Duration::from_millis(scrape_config.page_load_timeout_ms),
            container_wait_timeout: Duration::from_millis(scrape_config.container_wait_timeout_ms),
        })
    }

    /// Closes the browser session, consuming the renderer
    ///
    /// This is the preferred release path; `Drop` only aborts the handler
    /// task and leaves process cleanup to the OS.
    pub async fn close(mut self) -> Result<(), RenderError> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        tracing::info!("Browser session closed");
        Ok(())
    }
}

impl Drop for ChromeRenderer {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn render(&self, url: &str, wait_selector: &str) -> Result<String, RenderError> {
        let navigate = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, CdpError>(())
        };

        match tokio::time::timeout(self.page_load_timeout, navigate).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(RenderError::PageLoadTimeout {
                    url: url.to_string(),
                })
            }
        }

        // The grid is filled in by script after navigation settles, so poll
        // for it instead of trusting the load event.
        let deadline = tokio::time::Instant::now() + self.container_wait_timeout;
        loop {
            if self.page.find_element(wait_selector).await.is_ok() {
                break;
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(RenderError::WaitTimeout {
                    selector: wait_selector.to_string(),
                    url: url.to_string(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Ok(self.page.content().await?)
    }
}
