//! # Flat-file persistence
//!
//! One-shot startup loading of the catalog from line-record files, plus the
//! filename conventions shared with the report writer. Loading happens before
//! any concurrent access begins, so nothing here takes the catalog lock.
//!
//! Layout under the data directory:
//! - `product*`: one product record on the first line of each file.
//! - `reviews{id}.txt`: one review record per line for product `{id}`.
//!
//! Loading is best-effort all the way down: an unreadable directory yields an
//! empty catalog, an unparsable product drops that file, a missing review
//! file yields an empty review sequence, and an unparsable review line drops
//! just that line. Every drop is logged.

use crate::codec::{parse_product_tolerant, parse_review_tolerant};
use crate::model::{Product, Review};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Where the catalog reads its data and writes its reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPaths {
    pub data_dir: PathBuf,
    pub reports_dir: PathBuf,
}

impl Default for CatalogPaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

impl CatalogPaths {
    pub fn new(data_dir: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            reports_dir: reports_dir.into(),
        }
    }

    /// Review file for a product id: `reviews{id}.txt`.
    pub fn review_file(&self, id: u32) -> PathBuf {
        self.data_dir.join(format!("reviews{id}.txt"))
    }

    /// Report file for a (product id, client tag) pair:
    /// `product{id}_report_{client}.txt`.
    pub fn report_file(&self, id: u32, client: &str) -> PathBuf {
        self.reports_dir
            .join(format!("product{id}_report_{client}.txt"))
    }
}

/// Scans the data directory and rebuilds the catalog mapping.
pub fn load_catalog(paths: &CatalogPaths) -> HashMap<Product, Vec<Review>> {
    let entries = match fs::read_dir(&paths.data_dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, dir = %paths.data_dir.display(), "Error scanning data directory");
            return HashMap::new();
        }
    };

    let mut catalog = HashMap::new();
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if !file_name.starts_with("product") {
            continue;
        }
        let Some(product) = load_product(&entry.path()) else {
            continue;
        };
        let reviews = load_reviews(paths, product.id());
        info!(id = product.id(), reviews = reviews.len(), "Loaded product");
        catalog.insert(product, reviews);
    }
    catalog
}

/// Parses the product record on the first line of `path`.
fn load_product(path: &Path) -> Option<Product> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Error loading product");
            return None;
        }
    };
    contents.lines().next().and_then(parse_product_tolerant)
}

/// Loads the review sequence for a product id. A missing file is an empty
/// sequence, not an error.
fn load_reviews(paths: &CatalogPaths, id: u32) -> Vec<Review> {
    let path = paths.review_file(id);
    if !path.exists() {
        return Vec::new();
    }
    match fs::read_to_string(&path) {
        Ok(contents) => contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(parse_review_tolerant)
            .collect(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Error loading reviews");
            Vec::new()
        }
    }
}
