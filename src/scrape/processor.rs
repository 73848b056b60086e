//! Item processor: one category in, records plus a terminal status out
//!
//! The processor is the absorption boundary for per-item failures. Whatever
//! goes wrong while rendering or extracting a single category, the outcome is
//! a `failed` status and an empty record set; nothing escapes to stop the
//! driver loop.

use crate::scrape::extract::{extract_products, PRODUCT_CARD_SELECTOR};
use crate::scrape::renderer::Renderer;
use crate::state::WorkStatus;
use crate::store::{ProductRecord, WorkItem};
use url::Url;

/// Result of processing one category
#[derive(Debug)]
pub struct ItemOutcome {
    /// Records to persist; empty on failure
    pub records: Vec<ProductRecord>,
    /// Terminal status for the work item
    pub status: WorkStatus,
}

impl ItemOutcome {
    fn failed() -> Self {
        Self {
            records: Vec::new(),
            status: WorkStatus::Failed,
        }
    }
}

/// Processes one work item: render, extract, decide the terminal status
///
/// `processed` iff at least one record with a name came out of the page.
/// A render timeout is treated as "no products found", not as an error.
pub async fn process_item<R>(renderer: &R, base_url: &Url, item: &WorkItem) -> ItemOutcome
where
    R: Renderer + ?Sized,
{
    tracing::info!("Processing category: {}", item.label);

    let html = match renderer.render(&item.url, PRODUCT_CARD_SELECTOR).await {
        Ok(html) => html,
        Err(e) if e.is_wait_timeout() => {
            tracing::warn!("No product grid appeared for '{}': {}", item.label, e);
            return ItemOutcome::failed();
        }
        Err(e) => {
            tracing::warn!("Failed to render '{}': {}", item.label, e);
            return ItemOutcome::failed();
        }
    };

    let records = extract_products(&html, base_url, &item.label);

    if records.is_empty() {
        tracing::warn!("Category '{}' rendered but yielded no products", item.label);
        ItemOutcome::failed()
    } else {
        tracing::info!("Category '{}': {} products extracted", item.label, records.len());
        ItemOutcome {
            records,
            status: WorkStatus::Processed,
        }
    }
}
