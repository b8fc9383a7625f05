//! The sellable item at the heart of the catalog.
//!
//! A [`Product`] is an immutable value object. Its `id` is the sole identity:
//! `PartialEq`, `Eq`, and `Hash` look at nothing else, so two products with
//! the same id but different attributes compare equal and occupy the same
//! catalog slot. That asymmetry is deliberate. The catalog recomputes a
//! product's aggregate rating on every review, and because the map key cannot
//! be edited in place the store swaps the whole entry: [`Product::apply_rating`]
//! builds the replacement, the store removes the old key and inserts the new
//! one under a single exclusive lock acquisition.
//!
//! # Variants
//!
//! Exactly two kinds exist, distinguished by [`ProductKind`]:
//! - `Standard`: a shelf-stable item, always eligible for the 10% discount.
//! - `Perishable`: carries a best-before date; its discount is zero unless
//!   the evaluation date lands exactly on that date.

use crate::model::Rating;
use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Flat discount applied to eligible products.
pub const DISCOUNT_RATE: Decimal = dec!(0.10);

/// The two concrete kinds of catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductKind {
    Standard,
    Perishable { best_before: NaiveDate },
}

/// A sellable item. Identity is the id alone; every other attribute is
/// payload. See the module docs for why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: u32,
    name: String,
    price: Decimal,
    rating: Rating,
    kind: ProductKind,
}

impl Product {
    /// Creates a standard (non-perishable) product.
    pub fn standard(id: u32, name: impl Into<String>, price: Decimal, rating: Rating) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            rating,
            kind: ProductKind::Standard,
        }
    }

    /// Creates a perishable product with a best-before date.
    pub fn perishable(
        id: u32,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            rating,
            kind: ProductKind::Perishable { best_before },
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Star-glyph rendering of the current rating.
    pub fn stars(&self) -> &'static str {
        self.rating.stars()
    }

    /// The best-before date as of `today`. A standard product has no shelf
    /// limit, so reports render the evaluation date itself.
    pub fn best_before_on(&self, today: NaiveDate) -> NaiveDate {
        match self.kind {
            ProductKind::Perishable { best_before } => best_before,
            ProductKind::Standard => today,
        }
    }

    /// Discount evaluated on the given date: 10% of price, rounded half-up to
    /// two decimals. A perishable product earns the discount only on its
    /// best-before date, zero otherwise.
    pub fn discount_on(&self, today: NaiveDate) -> Decimal {
        match self.kind {
            ProductKind::Perishable { best_before } if best_before != today => Decimal::ZERO,
            _ => (self.price * DISCOUNT_RATE)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// Discount evaluated today (local date).
    pub fn discount(&self) -> Decimal {
        self.discount_on(today())
    }

    /// Pure rating replacement: returns a new product with the same id, name,
    /// price, and kind, and the given rating. The receiver is untouched.
    pub fn apply_rating(&self, rating: Rating) -> Product {
        Product {
            rating,
            ..self.clone()
        }
    }
}

// Identity is the id only. Keeping all other attributes out of Eq/Hash is
// what lets the store look an entry up by a stale snapshot of the product
// after its rating has moved on.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Today's date in the local timezone, the evaluation date for discounts and
/// best-before rendering.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn standard_discount_is_ten_percent_rounded_half_up() {
        let product = Product::standard(101, "Tea", dec!(1.99), Rating::NotRated);
        // 0.199 rounds up to 0.20
        assert_eq!(product.discount(), dec!(0.20));

        let product = Product::standard(102, "Coffee", dec!(10.00), Rating::NotRated);
        assert_eq!(product.discount(), dec!(1.00));

        // 0.125 is a midpoint; half-up gives 0.13
        let product = Product::standard(103, "Scone", dec!(1.25), Rating::NotRated);
        assert_eq!(product.discount(), dec!(0.13));
    }

    #[test]
    fn perishable_discount_only_on_best_before_day() {
        let best_before = date(2026, 8, 31);
        let cake = Product::perishable(103, "Cake", dec!(3.99), Rating::FiveStars, best_before);

        assert_eq!(cake.discount_on(best_before), dec!(0.40));
        assert_eq!(cake.discount_on(date(2026, 8, 30)), Decimal::ZERO);
        assert_eq!(cake.discount_on(date(2026, 9, 1)), Decimal::ZERO);
    }

    #[test]
    fn apply_rating_replaces_only_the_rating() {
        let best_before = date(2026, 9, 1);
        let cake = Product::perishable(103, "Cake", dec!(3.99), Rating::NotRated, best_before);
        let rated = cake.apply_rating(Rating::FourStars);

        assert_eq!(rated.rating(), Rating::FourStars);
        assert_eq!(rated.id(), cake.id());
        assert_eq!(rated.name(), cake.name());
        assert_eq!(rated.price(), cake.price());
        assert_eq!(rated.kind(), cake.kind());
        // Receiver untouched.
        assert_eq!(cake.rating(), Rating::NotRated);
    }

    #[test]
    fn equality_and_hash_use_id_only() {
        use std::collections::HashMap;

        let tea = Product::standard(101, "Tea", dec!(1.99), Rating::NotRated);
        let rated_tea = tea.apply_rating(Rating::ThreeStars);
        assert_eq!(tea, rated_tea);

        let mut map = HashMap::new();
        map.insert(tea, "original");
        assert_eq!(map.get(&rated_tea), Some(&"original"));
    }

    #[test]
    fn best_before_defaults_to_evaluation_date_for_standard() {
        let tea = Product::standard(101, "Tea", dec!(1.99), Rating::NotRated);
        let today = date(2026, 8, 31);
        assert_eq!(tea.best_before_on(today), today);

        let cake = Product::perishable(103, "Cake", dec!(3.99), Rating::NotRated, date(2026, 9, 2));
        assert_eq!(cake.best_before_on(today), date(2026, 9, 2));
    }
}
