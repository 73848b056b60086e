//! Category page rendering and product extraction
//!
//! This module contains the second stage of the pipeline:
//! - The rendering seam ([`Renderer`]) and its chromium-backed implementation
//! - Best-effort field extraction from rendered pages
//! - The per-item processor that turns a work item into records plus a status

mod browser;
mod extract;
mod processor;
mod renderer;

pub use browser::ChromeRenderer;
pub use extract::{
    extract_products, parse_price, parse_rating, parse_review_count, PRODUCT_CARD_SELECTOR,
};
pub use processor::{process_item, ItemOutcome};
pub use renderer::{RenderError, Renderer};
