//! Output module for inspecting run results
//!
//! This module handles:
//! - Statistics over the category and product tables
//! - Formatted printing for the `--stats` mode

mod stats;

pub use stats::{load_statistics, print_statistics, ScrapeStatistics};
