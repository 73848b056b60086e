//! Driver loop - sequential controller draining the work queue
//!
//! The loop owns full-restart semantics: on start every category is reset to
//! pending and the products table is cleared, then items are claimed one at a
//! time until none remain. Per-item failures are already absorbed by the
//! processor; the only errors that escape here are store-level invariant
//! violations, which rightly end the run.

use crate::config::ScrapeConfig;
use crate::scrape::{process_item, Renderer};
use crate::state::WorkStatus;
use crate::store::WorkStore;
use crate::Result;
use rand::Rng;
use std::time::Duration;
use url::Url;

/// Tally of a completed run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Categories that yielded at least one record
    pub processed: u64,
    /// Categories that yielded nothing
    pub failed: u64,
    /// Product rows written
    pub records_written: u64,
}

/// Drains the work queue to completion
///
/// Claims one pending item at a time, processes it, persists any records,
/// transitions the item's status, and pauses a jittered delay before the
/// next claim. Terminates when no pending items remain; every item is
/// attempted exactly once per run.
pub async fn run_loop<S, R>(store: &mut S, renderer: &R, config: &ScrapeConfig) -> Result<RunSummary>
where
    S: WorkStore,
    R: Renderer + ?Sized,
{
    let base_url = Url::parse(&config.base_url)?;

    let pending = store.reset_all_to_pending()?;
    store.clear_records()?;
    tracing::info!(
        "Run start: {} categories reset to pending, products table cleared",
        pending
    );

    let mut summary = RunSummary::default();

    while let Some(item) = store.claim_one_pending()? {
        let outcome = process_item(renderer, &base_url, &item).await;

        if !outcome.records.is_empty() {
            summary.records_written += store.append_records(&outcome.records)? as u64;
        }

        store.set_status(&item.url, outcome.status)?;

        match outcome.status {
            WorkStatus::Processed => summary.processed += 1,
            WorkStatus::Failed => summary.failed += 1,
            WorkStatus::Pending => {}
        }

        tracing::info!(
            "{}: {} ({} records)",
            item.label,
            outcome.status,
            outcome.records.len()
        );

        pause_between_items(config).await;
    }

    tracing::info!(
        "Queue drained: {} processed, {} failed, {} records written",
        summary.processed,
        summary.failed,
        summary.records_written
    );

    Ok(summary)
}

/// Sleeps a jittered delay to keep requests from arriving in bursts
async fn pause_between_items(config: &ScrapeConfig) {
    let millis = if config.pause_max_ms > config.pause_min_ms {
        rand::thread_rng().gen_range(config.pause_min_ms..=config.pause_max_ms)
    } else {
        config.pause_min_ms
    };

    if millis > 0 {
        tracing::debug!("Pausing {}ms before next category", millis);
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}
