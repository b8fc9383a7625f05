//! # Line-record codec
//!
//! Comma-delimited positional records for products and reviews, the flat-file
//! wire format of the catalog:
//!
//! ```text
//! D,101,Tea,1.99,0                     # standard product
//! F,103,Cake,3.99,5,2026-09-01        # perishable product, ISO best-before
//! 4,Nice hot cup of tea               # review: ordinal, free-text comment
//! ```
//!
//! Parsing is tolerant by contract: one malformed line never aborts a batch.
//! The typed parsers ([`parse_product`], [`parse_review`]) return a
//! [`CodecError`] describing exactly what was wrong; the tolerant wrappers
//! ([`parse_product_tolerant`], [`parse_review_tolerant`]) log the failure
//! and yield `None` so callers can keep scanning.
//!
//! Round-trip law: `parse(serialize(x)) == x` for every canonical record.

use crate::model::{Product, ProductKind, Rating, Review};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Field separator for both record kinds.
pub const DELIMITER: char = ',';

/// Variant tag for a standard product record.
pub const TAG_STANDARD: &str = "D";

/// Variant tag for a perishable product record.
pub const TAG_PERISHABLE: &str = "F";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a record line failed to parse.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodecError {
    #[error("Wrong field count: expected {expected}, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("Unknown product tag: {0}")]
    UnknownTag(String),

    #[error("Invalid product id: {0}")]
    InvalidId(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid rating ordinal: {0}")]
    InvalidRating(String),

    #[error("Invalid best-before date: {0}")]
    InvalidDate(String),
}

/// Parses a product record line.
///
/// Layout: `tag,id,name,price,rating` for standard (`D`) products, with a
/// trailing ISO-8601 best-before date for perishable (`F`) ones.
pub fn parse_product(line: &str) -> Result<Product, CodecError> {
    let fields: Vec<&str> = line.trim().split(DELIMITER).collect();
    let tag = fields[0].trim();
    match tag {
        TAG_STANDARD => {
            expect_fields(&fields, 5)?;
            let (id, name, price, rating) = parse_common(&fields)?;
            Ok(Product::standard(id, name, price, rating))
        }
        TAG_PERISHABLE => {
            expect_fields(&fields, 6)?;
            let (id, name, price, rating) = parse_common(&fields)?;
            let best_before = NaiveDate::parse_from_str(fields[5].trim(), DATE_FORMAT)
                .map_err(|_| CodecError::InvalidDate(fields[5].trim().to_string()))?;
            Ok(Product::perishable(id, name, price, rating, best_before))
        }
        other => Err(CodecError::UnknownTag(other.to_string())),
    }
}

/// Parses a review record line: `rating,comment`. The comment is free text
/// and may itself contain the delimiter, so only the first split counts.
pub fn parse_review(line: &str) -> Result<Review, CodecError> {
    let line = line.trim();
    let (ordinal, comments) = line
        .split_once(DELIMITER)
        .ok_or(CodecError::FieldCount {
            expected: 2,
            got: 1,
        })?;
    let rating = parse_rating(ordinal)?;
    Ok(Review::new(rating, comments.trim()))
}

/// Serializes a product to its canonical record line.
pub fn serialize_product(product: &Product) -> String {
    let head = format!(
        "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
        product.id(),
        product.name(),
        product.price(),
        product.rating().ordinal()
    );
    match product.kind() {
        ProductKind::Standard => format!("{TAG_STANDARD}{DELIMITER}{head}"),
        ProductKind::Perishable { best_before } => format!(
            "{TAG_PERISHABLE}{DELIMITER}{head}{DELIMITER}{}",
            best_before.format(DATE_FORMAT)
        ),
    }
}

/// Serializes a review to its canonical record line.
pub fn serialize_review(review: &Review) -> String {
    format!(
        "{}{DELIMITER}{}",
        review.rating().ordinal(),
        review.comments()
    )
}

/// Tolerant product parse: logs and drops a malformed line.
pub fn parse_product_tolerant(line: &str) -> Option<Product> {
    match parse_product(line) {
        Ok(product) => Some(product),
        Err(e) => {
            warn!(error = %e, line, "Error parsing product");
            None
        }
    }
}

/// Tolerant review parse: logs and drops a malformed line.
pub fn parse_review_tolerant(line: &str) -> Option<Review> {
    match parse_review(line) {
        Ok(review) => Some(review),
        Err(e) => {
            warn!(error = %e, line, "Error parsing review");
            None
        }
    }
}

fn expect_fields(fields: &[&str], expected: usize) -> Result<(), CodecError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(CodecError::FieldCount {
            expected,
            got: fields.len(),
        })
    }
}

fn parse_common(fields: &[&str]) -> Result<(u32, String, Decimal, Rating), CodecError> {
    let id = fields[1]
        .trim()
        .parse::<u32>()
        .map_err(|_| CodecError::InvalidId(fields[1].trim().to_string()))?;
    let name = fields[2].trim().to_string();
    let price = Decimal::from_str(fields[3].trim())
        .map_err(|_| CodecError::InvalidPrice(fields[3].trim().to_string()))?;
    let rating = parse_rating(fields[4])?;
    Ok((id, name, price, rating))
}

fn parse_rating(field: &str) -> Result<Rating, CodecError> {
    let field = field.trim();
    field
        .parse::<u8>()
        .ok()
        .and_then(|ordinal| Rating::try_from(ordinal).ok())
        .ok_or_else(|| CodecError::InvalidRating(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_standard_product() {
        let product = parse_product("D,101,Tea,1.99,0").expect("Failed to parse product");
        assert_eq!(product.id(), 101);
        assert_eq!(product.name(), "Tea");
        assert_eq!(product.price(), dec!(1.99));
        assert_eq!(product.rating(), Rating::NotRated);
        assert_eq!(product.kind(), &ProductKind::Standard);
    }

    #[test]
    fn parses_perishable_product_with_date() {
        let product =
            parse_product("F,103,Cake,3.99,5,2026-09-01").expect("Failed to parse product");
        assert_eq!(product.id(), 103);
        let best_before = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        assert_eq!(
            product.kind(),
            &ProductKind::Perishable { best_before }
        );
    }

    #[test]
    fn product_round_trips() {
        let line = "F,103,Cake,3.99,5,2026-09-01";
        let product = parse_product(line).unwrap();
        assert_eq!(serialize_product(&product), line);

        let line = "D,101,Tea,1.99,0";
        let product = parse_product(line).unwrap();
        assert_eq!(serialize_product(&product), line);
    }

    #[test]
    fn review_round_trips_and_keeps_commas_in_comment() {
        let line = "4,Fine tea, but pricey";
        let review = parse_review(line).expect("Failed to parse review");
        assert_eq!(review.rating(), Rating::FourStars);
        assert_eq!(review.comments(), "Fine tea, but pricey");
        assert_eq!(serialize_review(&review), line);
    }

    #[test]
    fn malformed_product_lines_are_typed_errors() {
        assert_eq!(
            parse_product("D,101,Tea,1.99"),
            Err(CodecError::FieldCount {
                expected: 5,
                got: 4
            })
        );
        assert_eq!(
            parse_product("X,101,Tea,1.99,0"),
            Err(CodecError::UnknownTag("X".into()))
        );
        assert_eq!(
            parse_product("D,abc,Tea,1.99,0"),
            Err(CodecError::InvalidId("abc".into()))
        );
        assert_eq!(
            parse_product("D,101,Tea,cheap,0"),
            Err(CodecError::InvalidPrice("cheap".into()))
        );
        assert_eq!(
            parse_product("D,101,Tea,1.99,9"),
            Err(CodecError::InvalidRating("9".into()))
        );
        assert_eq!(
            parse_product("F,103,Cake,3.99,5,tomorrow"),
            Err(CodecError::InvalidDate("tomorrow".into()))
        );
    }

    #[test]
    fn tolerant_parse_drops_bad_lines_without_panicking() {
        assert!(parse_product_tolerant("not a record").is_none());
        assert!(parse_review_tolerant("no comma here").is_none());
        assert!(parse_review_tolerant("6,out of range").is_none());
        assert!(parse_product_tolerant("D,101,Tea,1.99,0").is_some());
    }
}
