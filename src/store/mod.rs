//! # Catalog store
//!
//! The shared catalog: a mapping from [`Product`] to its ordered review
//! sequence, guarded by one reader/writer lock.
//!
//! ## Concurrency model
//!
//! Every public operation is a blocking call that acquires the lock, runs to
//! completion, and releases it. Reads (`find`, `discounts_by_star_rating`,
//! `report`'s catalog snapshot, `list_formatted`) take the lock shared and may
//! run concurrently; writes (`create`, `add_review`) take it exclusively.
//!
//! ## The remove-and-reinsert protocol
//!
//! A product's identity is its id alone, but the map key also carries the
//! mutable aggregate rating. Updating the rating therefore cannot edit the
//! key in place: `add_review` builds the fully-formed replacement product,
//! then removes the old entry and inserts the new one, carrying the whole
//! review sequence over, inside a single exclusive acquisition. No reader
//! can ever observe the id missing mid-swap.
//!
//! ## Failure containment
//!
//! `NotFound` and `DuplicateId` are typed failures returned to the caller;
//! report I/O problems are logged and never raised, because the catalog read
//! has already completed under lock by the time the file write starts.

pub mod error;

pub use error::CatalogError;

use crate::locale::{Formatter, LocaleTag};
use crate::model::product::today;
use crate::model::{Product, Rating, Review};
use crate::persist::{load_catalog, CatalogPaths};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, instrument, warn};

type Catalog = HashMap<Product, Vec<Review>>;

/// The concurrently-shared product catalog.
pub struct CatalogStore {
    catalog: RwLock<Catalog>,
    paths: CatalogPaths,
}

impl CatalogStore {
    /// Builds the store by scanning the data directory once. Runs before any
    /// concurrent access, so the load itself takes no lock.
    pub fn new(paths: CatalogPaths) -> Self {
        let catalog = load_catalog(&paths);
        info!(products = catalog.len(), "Catalog loaded");
        Self {
            catalog: RwLock::new(catalog),
            paths,
        }
    }

    /// The locale tags the formatter supports, for driver-side enumeration.
    pub fn supported_locales() -> [&'static str; 5] {
        LocaleTag::ALL.map(LocaleTag::as_str)
    }

    // =========================================================================
    // Write operations (exclusive lock)
    // =========================================================================

    /// Creates a product and inserts it only if the id is absent. A
    /// best-before date makes it perishable; `None` makes it standard.
    ///
    /// On a colliding id the existing entry, reviews included, is left
    /// untouched and `DuplicateId` is returned.
    #[instrument(skip(self, name, price))]
    pub fn create(
        &self,
        id: u32,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: Option<NaiveDate>,
    ) -> Result<Product, CatalogError> {
        let product = match best_before {
            Some(date) => Product::perishable(id, name, price, rating, date),
            None => Product::standard(id, name, price, rating),
        };

        let mut catalog = self.write_guard();
        if catalog.keys().any(|p| p.id() == id) {
            warn!(id, "Duplicate product id, existing entry kept");
            return Err(CatalogError::DuplicateId(id));
        }
        catalog.insert(product.clone(), Vec::new());
        info!(id, size = catalog.len(), "Product created");
        Ok(product)
    }

    /// Appends a review and recomputes the product's aggregate rating as the
    /// rounded mean of every review ordinal recorded so far. The stale entry
    /// is removed and the replacement inserted under the same exclusive
    /// acquisition, so no intermediate state is observable.
    #[instrument(skip(self, comments))]
    pub fn add_review(
        &self,
        id: u32,
        rating: Rating,
        comments: impl Into<String>,
    ) -> Result<Product, CatalogError> {
        let mut catalog = self.write_guard();
        let product = catalog
            .keys()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))?;

        // No fallible or panicking step may sit between the remove and the
        // insert: a reader acquiring after us must find the id present.
        let mut reviews = catalog.remove(&product).unwrap_or_default();
        reviews.push(Review::new(rating, comments));
        let updated = product.apply_rating(mean_rating(&reviews));
        catalog.insert(updated.clone(), reviews);

        info!(id, rating = updated.rating().ordinal(), "Review recorded");
        Ok(updated)
    }

    // =========================================================================
    // Read operations (shared lock)
    // =========================================================================

    /// Looks up the stored product by id.
    pub fn find(&self, id: u32) -> Result<Product, CatalogError> {
        let catalog = self.read_guard();
        catalog
            .keys()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Sums the discount of every product, grouped by the star-glyph of its
    /// current rating, and formats each total as currency for the locale.
    ///
    /// Discounts are evaluated for today, so perishable items contribute zero
    /// unless today is exactly their best-before date.
    pub fn discounts_by_star_rating(&self, language_tag: &str) -> BTreeMap<String, String> {
        let formatter = Formatter::for_tag(language_tag);
        let evaluation_date = today();

        let mut totals: BTreeMap<&'static str, Decimal> = BTreeMap::new();
        {
            let catalog = self.read_guard();
            for product in catalog.keys() {
                *totals.entry(product.stars()).or_default() +=
                    product.discount_on(evaluation_date);
            }
        }

        totals
            .into_iter()
            .map(|(stars, total)| (stars.to_string(), formatter.format_money(total)))
            .collect()
    }

    /// Writes a report file for the product: its locale-rendered line, then
    /// each review sorted ascending by rating (stable, so equal ratings keep
    /// insertion order), or the localized no-reviews literal.
    ///
    /// Best-effort by contract: a missing id or a failed write is logged and
    /// the call simply returns. The catalog read completes under the shared
    /// lock before any I/O starts, so neither failure can disturb the store.
    #[instrument(skip(self))]
    pub fn report(&self, id: u32, language_tag: &str, client: &str) {
        let formatter = Formatter::for_tag(language_tag);

        let snapshot = {
            let catalog = self.read_guard();
            catalog
                .iter()
                .find(|(p, _)| p.id() == id)
                .map(|(p, reviews)| (p.clone(), reviews.clone()))
        };
        let Some((product, mut reviews)) = snapshot else {
            info!(id, "Product not found, no report written");
            return;
        };
        reviews.sort_by_key(Review::rating);

        let mut contents = formatter.format_product(&product);
        contents.push('\n');
        if reviews.is_empty() {
            contents.push_str(formatter.no_reviews());
            contents.push('\n');
        } else {
            for review in &reviews {
                contents.push_str(&formatter.format_review(review));
                contents.push('\n');
            }
        }

        let path = self.paths.report_file(id, client);
        if let Err(e) = write_report(&path, &contents, &self.paths) {
            warn!(error = %e, path = %path.display(), "Error writing report");
        } else {
            info!(id, client, path = %path.display(), "Report written");
        }
    }

    /// Renders every product passing the filter, in comparator order, one
    /// locale-formatted line each.
    pub fn list_formatted(
        &self,
        filter: impl Fn(&Product) -> bool,
        mut sorter: impl FnMut(&Product, &Product) -> Ordering,
        language_tag: &str,
    ) -> String {
        let formatter = Formatter::for_tag(language_tag);
        let mut selected: Vec<Product> = {
            let catalog = self.read_guard();
            catalog.keys().filter(|p| filter(p)).cloned().collect()
        };
        selected.sort_by(|a, b| sorter(a, b));

        let mut out = String::new();
        for product in &selected {
            out.push_str(&formatter.format_product(product));
            out.push('\n');
        }
        out
    }

    // A poisoned lock is recovered rather than propagated: write critical
    // sections have no panic point between remove and insert, so the map is
    // structurally consistent even after a writer panic.
    fn read_guard(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Rounded mean of the review ordinals; `NotRated` for an empty sequence.
fn mean_rating(reviews: &[Review]) -> Rating {
    if reviews.is_empty() {
        return Rating::NotRated;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating().ordinal())).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    // The mean of ordinals 0..=5 stays in range, so the conversion cannot
    // actually fail.
    Rating::try_from(mean.round() as u8).unwrap_or(Rating::NotRated)
}

fn write_report(
    path: &std::path::Path,
    contents: &str,
    paths: &CatalogPaths,
) -> std::io::Result<()> {
    fs::create_dir_all(&paths.reports_dir)?;
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())
}
