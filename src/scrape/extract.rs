//! Product extraction from rendered category pages
//!
//! Extraction is best-effort twice over: per field (a missing or unreadable
//! element becomes None without touching the other fields) and per card (a
//! broken card never aborts its neighbours). Only the name is mandatory; a
//! card without one contributes nothing.
//!
//! The selectors are site-specific and brittle; they mirror the vendor's
//! generated class names and will need updating when those rotate.

use crate::store::ProductRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Grid cell holding one product card; also the element the renderer waits for
pub const PRODUCT_CARD_SELECTOR: &str = "div#gridItemRoot";

/// Name is rendered in a line-clamped div; the clamp level varies per card
const NAME_SELECTORS: &[&str] = &[
    "div._cDEzb_p13n-sc-css-line-clamp-3_g3dy1",
    "div._cDEzb_p13n-sc-css-line-clamp-4_2q2cc",
    "div._cDEzb_p13n-sc-css-line-clamp-2_EWgCb",
];

const LINK_SELECTOR: &str = r#"a.a-link-normal[href*="/dp/"]"#;
const RATING_SELECTOR: &str = ".a-icon-alt";
const REVIEWS_SELECTOR: &str = ".a-size-small";
const PRICE_SELECTOR: &str = "._cDEzb_p13n-sc-price_3mJ9Z";

/// First run of digits mixed with locale separators, e.g. "1.234,56"
static NUMERIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d.,]+").unwrap());

/// Field set read off one product card before the name requirement is applied
#[derive(Debug, Default)]
struct CardFields {
    name: Option<String>,
    url: Option<String>,
    rating_avg: Option<f64>,
    reviews_count: Option<i64>,
    price_brl: Option<f64>,
}

impl CardFields {
    /// Builds a record when the minimum viable identity (the name) is present
    fn into_record(self, category_label: &str) -> Option<ProductRecord> {
        let name = self.name?;
        Some(ProductRecord {
            category_label: category_label.to_string(),
            name,
            url: self.url,
            rating_avg: self.rating_avg,
            reviews_count: self.reviews_count,
            price_brl: self.price_brl,
        })
    }
}

/// Extracts all product records from a rendered category page
///
/// Returns an empty vector when the page holds no product containers.
pub fn extract_products(html: &str, base_url: &Url, category_label: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);

    let Ok(card_selector) = Selector::parse(PRODUCT_CARD_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&card_selector)
        .filter_map(|card| extract_card(&card, base_url).into_record(category_label))
        .collect()
}

/// Reads the five fields off one card, each independently
fn extract_card(card: &ElementRef<'_>, base_url: &Url) -> CardFields {
    CardFields {
        name: extract_name(card),
        url: extract_url(card, base_url),
        rating_avg: first_text(card, RATING_SELECTOR).and_then(|t| parse_rating(&t)),
        reviews_count: first_text(card, REVIEWS_SELECTOR).and_then(|t| parse_review_count(&t)),
        price_brl: first_text(card, PRICE_SELECTOR).and_then(|t| parse_price(&t)),
    }
}

fn extract_name(card: &ElementRef<'_>) -> Option<String> {
    NAME_SELECTORS
        .iter()
        .find_map(|selector| first_text(card, selector))
}

fn extract_url(card: &ElementRef<'_>, base_url: &Url) -> Option<String> {
    let selector = Selector::parse(LINK_SELECTOR).ok()?;
    let href = card.select(&selector).next()?.value().attr("href")?;

    // Strip the per-impression tracking suffix so the URL is canonical
    let canonical = href.split("/ref=").next().unwrap_or(href);

    let url = base_url.join(canonical.trim()).ok()?;
    Some(url.to_string())
}

/// First non-empty text content under `selector`, trimmed
fn first_text(card: &ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    card.select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parses a rating like "4,5 de 5 estrelas" into 4.5
pub fn parse_rating(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?;
    token.replace(',', ".").parse().ok()
}

/// Parses a review count like "1.234" into 1234
///
/// The period is a thousands separator in pt-BR; anything beyond digits and
/// separators means the element held something else entirely.
pub fn parse_review_count(text: &str) -> Option<i64> {
    let cleaned = text.trim().replace('.', "");
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Parses a price like "R$ 1.234,56" into 1234.56
pub fn parse_price(text: &str) -> Option<f64> {
    let run = NUMERIC_RUN.find(text)?.as_str();
    run.replace('.', "").replace(',', ".").parse().ok()
}
