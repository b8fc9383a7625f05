//! A single customer review: a rating plus free-text comments.
//!
//! Reviews are stored in insertion order and never reordered in place.
//! Reports sort a copy ascending by rating with a stable sort, so reviews
//! with equal ratings keep their original relative order.

use crate::model::Rating;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    rating: Rating,
    comments: String,
}

impl Review {
    pub fn new(rating: Rating, comments: impl Into<String>) -> Self {
        Self {
            rating,
            comments: comments.into(),
        }
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }
}
