//! Statistics over the two persisted tables
//!
//! This is the inspection surface for a finished (or interrupted) run: how
//! many categories sit in each status and how many products each category
//! contributed.

use crate::state::WorkStatus;
use crate::store::WorkStore;
use crate::VitrineError;
use std::collections::HashMap;

/// Pipeline statistics summary
#[derive(Debug, Clone)]
pub struct ScrapeStatistics {
    /// Total number of discovered categories
    pub total_categories: u64,

    /// Count of categories by status
    pub categories_by_status: HashMap<WorkStatus, u64>,

    /// Total number of extracted product records
    pub total_products: u64,

    /// Product counts per category label, largest first
    pub products_by_category: Vec<(String, u64)>,
}

/// Loads statistics from the store
pub fn load_statistics(store: &dyn WorkStore) -> Result<ScrapeStatistics, VitrineError> {
    let total_categories = store.count_total_items()?;
    let total_products = store.count_records()?;

    let mut categories_by_status = HashMap::new();
    for status in WorkStatus::all_statuses() {
        let count = store.count_items_by_status(status)?;
        if count > 0 {
            categories_by_status.insert(status, count);
        }
    }

    let products_by_category = store.record_breakdown()?;

    Ok(ScrapeStatistics {
        total_categories,
        categories_by_status,
        total_products,
        products_by_category,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ScrapeStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Overview:");
    println!("  Categories discovered: {}", stats.total_categories);
    println!("  Products extracted: {}", stats.total_products);
    println!();

    println!("Categories by Status:");
    let mut status_counts: Vec<_> = stats.categories_by_status.iter().collect();
    status_counts.sort_by(|a, b| b.1.cmp(a.1));

    for (status, count) in status_counts {
        let percentage = if stats.total_categories > 0 {
            (*count as f64 / stats.total_categories as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();

    if !stats.products_by_category.is_empty() {
        println!("Products per Category:");
        for (label, count) in &stats.products_by_category {
            println!("  {}: {}", label, count);
        }
        println!();
    }

    let processed = stats
        .categories_by_status
        .get(&WorkStatus::Processed)
        .unwrap_or(&0);
    let success_rate = if stats.total_categories > 0 {
        (*processed as f64 / stats.total_categories as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} categories yielded products)",
        success_rate, processed, stats.total_categories
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DiscoveredCategory, ProductRecord, SqliteStore};
    use url::Url;

    #[test]
    fn test_load_statistics() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store
            .replace_all(&[
                DiscoveredCategory {
                    label: "Livros".to_string(),
                    url: Url::parse("https://site/cat/livros").unwrap(),
                },
                DiscoveredCategory {
                    label: "Games".to_string(),
                    url: Url::parse("https://site/cat/games").unwrap(),
                },
            ])
            .unwrap();
        store
            .set_status("https://site/cat/livros", WorkStatus::Processed)
            .unwrap();
        store
            .append_records(&[ProductRecord {
                category_label: "Livros".to_string(),
                name: "Produto A".to_string(),
                url: None,
                rating_avg: None,
                reviews_count: None,
                price_brl: None,
            }])
            .unwrap();

        let stats = load_statistics(&store).unwrap();

        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.total_products, 1);
        assert_eq!(
            stats.categories_by_status.get(&WorkStatus::Processed),
            Some(&1)
        );
        assert_eq!(
            stats.categories_by_status.get(&WorkStatus::Pending),
            Some(&1)
        );
        assert_eq!(stats.categories_by_status.get(&WorkStatus::Failed), None);
        assert_eq!(stats.products_by_category, vec![("Livros".to_string(), 1)]);
    }

    #[test]
    fn test_load_statistics_empty_store() {
        let store = SqliteStore::new_in_memory().unwrap();
        let stats = load_statistics(&store).unwrap();

        assert_eq!(stats.total_categories, 0);
        assert_eq!(stats.total_products, 0);
        assert!(stats.categories_by_status.is_empty());
        assert!(stats.products_by_category.is_empty());
    }
}
