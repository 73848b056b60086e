//! Category discovery from the bestsellers index
//!
//! This is the first stage of the pipeline: a one-shot fetch of the seed page
//! that turns its category sidebar into the initial work queue. A fetch
//! failure here aborts the run (there is nothing to process without it); a
//! missing sidebar region is downgraded to a warning and an empty result,
//! anticipating upstream page-structure drift.

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_seed};
pub use parser::{parse_category_index, ParseOutcome};

use crate::store::DiscoveredCategory;
use crate::DiscoveryError;
use reqwest::Client;
use url::Url;

/// Discovers the category set from the seed page
///
/// Fetches `seed_url` once and parses its category sidebar, resolving every
/// link against `base_url`. Idempotent: the same seed content yields the same
/// category set.
///
/// # Returns
///
/// * `Ok(categories)` - Possibly empty when the page structure has drifted
/// * `Err(DiscoveryError)` - Seed fetch failed; fatal for the run
pub async fn discover(
    client: &Client,
    seed_url: &str,
    base_url: &Url,
) -> Result<Vec<DiscoveredCategory>, DiscoveryError> {
    tracing::info!("Discovering categories from {}", seed_url);

    let body = fetch_seed(client, seed_url).await?;

    match parse_category_index(&body, base_url) {
        ParseOutcome::Categories(categories) => {
            tracing::info!("Discovered {} categories", categories.len());
            Ok(categories)
        }
        ParseOutcome::StructureMismatch => {
            tracing::warn!(
                "No category items found on {}; the page structure may have changed",
                seed_url
            );
            Ok(Vec::new())
        }
    }
}
