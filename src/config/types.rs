use serde::Deserialize;

/// Main configuration structure for vitrine
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    pub output: OutputConfig,
}

/// Scrape pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Bestsellers index page the category discovery starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Origin every relative category/product link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum time to wait for a category page navigation (milliseconds)
    #[serde(rename = "page-load-timeout-ms", default = "default_page_load_timeout")]
    pub page_load_timeout_ms: u64,

    /// Maximum time to wait for the first product container to appear
    /// (milliseconds)
    #[serde(
        rename = "container-wait-timeout-ms",
        default = "default_container_wait_timeout"
    )]
    pub container_wait_timeout_ms: u64,

    /// Lower bound of the jittered pause between categories (milliseconds)
    #[serde(rename = "pause-min-ms", default = "default_pause_min")]
    pub pause_min_ms: u64,

    /// Upper bound of the jittered pause between categories (milliseconds)
    #[serde(rename = "pause-max-ms", default = "default_pause_max")]
    pub pause_max_ms: u64,
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Path to a Chrome/Chromium executable; autodetected when absent
    #[serde(rename = "chrome-path", default)]
    pub chrome_path: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
        }
    }
}

fn default_page_load_timeout() -> u64 {
    90_000
}

fn default_container_wait_timeout() -> u64 {
    30_000
}

fn default_pause_min() -> u64 {
    5_000
}

fn default_pause_max() -> u64 {
    10_000
}

fn default_headless() -> bool {
    true
}
