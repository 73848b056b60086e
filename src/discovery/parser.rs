//! Category index parser
//!
//! This module reads the category links out of the bestsellers index page.
//! The links live in a fixed sidebar region; when that region is missing the
//! page layout has drifted and the parser reports it instead of silently
//! returning nothing.

use crate::store::DiscoveredCategory;
use scraper::{Html, Selector};
use url::Url;

/// Sidebar list items holding one category link each. Site-specific and
/// brittle; expected to need updating when the vendor reworks the page.
const CATEGORY_ITEM_SELECTOR: &str = "li._p13n-zg-nav-tree-all_style_zg-browse-item__1rdKf";

/// Outcome of parsing the category index
#[derive(Debug)]
pub enum ParseOutcome {
    /// The sidebar region was found; zero or more categories extracted
    Categories(Vec<DiscoveredCategory>),

    /// The sidebar region is absent from the page. Upstream structure has
    /// drifted; the caller decides whether that is fatal.
    StructureMismatch,
}

/// Parses category links out of the bestsellers index page
///
/// Every link is resolved to an absolute URL against `base_url`. Items
/// without an anchor or with an unresolvable href are skipped.
pub fn parse_category_index(html: &str, base_url: &Url) -> ParseOutcome {
    let document = Html::parse_document(html);

    let item_selector = match Selector::parse(CATEGORY_ITEM_SELECTOR) {
        Ok(s) => s,
        Err(_) => return ParseOutcome::StructureMismatch,
    };

    let items: Vec<_> = document.select(&item_selector).collect();
    if items.is_empty() {
        return ParseOutcome::StructureMismatch;
    }

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return ParseOutcome::StructureMismatch,
    };

    let mut categories = Vec::new();
    for item in items {
        let Some(anchor) = item.select(&anchor_selector).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let label = anchor.text().collect::<String>().trim().to_string();
        if label.is_empty() {
            continue;
        }

        let Ok(url) = base_url.join(href.trim()) else {
            tracing::debug!("Skipping category '{}' with unresolvable href {}", label, href);
            continue;
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            continue;
        }

        categories.push(DiscoveredCategory { label, url });
    }

    ParseOutcome::Categories(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://www.amazon.com.br").unwrap()
    }

    fn index_page(items: &str) -> String {
        format!(
            r#"<html><body><div id="zg-left-col"><ul>{}</ul></div></body></html>"#,
            items
        )
    }

    fn item(label: &str, href: &str) -> String {
        format!(
            r#"<li class="_p13n-zg-nav-tree-all_style_zg-browse-item__1rdKf">
                 <a href="{}">{}</a></li>"#,
            href, label
        )
    }

    #[test]
    fn test_parse_categories() {
        let html = index_page(&format!(
            "{}{}",
            item("Livros", "/gp/bestsellers/books"),
            item("Games", "/gp/bestsellers/videogames")
        ));

        let outcome = parse_category_index(&html, &base_url());
        let ParseOutcome::Categories(categories) = outcome else {
            panic!("Expected categories");
        };

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].label, "Livros");
        assert_eq!(
            categories[0].url.as_str(),
            "https://www.amazon.com.br/gp/bestsellers/books"
        );
        assert_eq!(categories[1].label, "Games");
    }

    #[test]
    fn test_absolute_hrefs_kept_as_is() {
        let html = index_page(&item("Livros", "https://www.amazon.com.br/gp/bestsellers/books"));

        let ParseOutcome::Categories(categories) = parse_category_index(&html, &base_url()) else {
            panic!("Expected categories");
        };

        assert_eq!(
            categories[0].url.as_str(),
            "https://www.amazon.com.br/gp/bestsellers/books"
        );
    }

    #[test]
    fn test_label_whitespace_trimmed() {
        let html = index_page(&item("  Livros  ", "/gp/bestsellers/books"));

        let ParseOutcome::Categories(categories) = parse_category_index(&html, &base_url()) else {
            panic!("Expected categories");
        };

        assert_eq!(categories[0].label, "Livros");
    }

    #[test]
    fn test_item_without_anchor_skipped() {
        let html = index_page(&format!(
            r#"<li class="_p13n-zg-nav-tree-all_style_zg-browse-item__1rdKf">no link here</li>{}"#,
            item("Games", "/gp/bestsellers/videogames")
        ));

        let ParseOutcome::Categories(categories) = parse_category_index(&html, &base_url()) else {
            panic!("Expected categories");
        };

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Games");
    }

    #[test]
    fn test_missing_region_is_structure_mismatch() {
        let html = r#"<html><body><p>Totally different page</p></body></html>"#;

        let outcome = parse_category_index(html, &base_url());
        assert!(matches!(outcome, ParseOutcome::StructureMismatch));
    }

    #[test]
    fn test_empty_page_is_structure_mismatch() {
        let outcome = parse_category_index("", &base_url());
        assert!(matches!(outcome, ParseOutcome::StructureMismatch));
    }
}
