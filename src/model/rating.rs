//! The rating scale shared by products and reviews.
//!
//! A [`Rating`] is an ordinal over a fixed six-member scale (`NotRated` plus
//! one through five stars). The ordinal doubles as the numeric weight when a
//! product's aggregate rating is averaged from its reviews, and each member
//! renders as a fixed-width run of filled and empty star glyphs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when an integer falls outside the rating scale.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Rating ordinal out of range: {0}")]
pub struct RatingOutOfRange(pub u8);

/// Customer rating on a zero-to-five-star scale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Rating {
    #[default]
    NotRated,
    OneStar,
    TwoStars,
    ThreeStars,
    FourStars,
    FiveStars,
}

impl Rating {
    /// Zero-based position on the scale, used as the weight when averaging.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Fixed-width star-glyph rendering: `n` filled stars, `5 - n` empty.
    pub fn stars(self) -> &'static str {
        match self {
            Rating::NotRated => "\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}",
            Rating::OneStar => "\u{2605}\u{2606}\u{2606}\u{2606}\u{2606}",
            Rating::TwoStars => "\u{2605}\u{2605}\u{2606}\u{2606}\u{2606}",
            Rating::ThreeStars => "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}",
            Rating::FourStars => "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}",
            Rating::FiveStars => "\u{2605}\u{2605}\u{2605}\u{2605}\u{2605}",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Rating::NotRated),
            1 => Ok(Rating::OneStar),
            2 => Ok(Rating::TwoStars),
            3 => Ok(Rating::ThreeStars),
            4 => Ok(Rating::FourStars),
            5 => Ok(Rating::FiveStars),
            other => Err(RatingOutOfRange(other)),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stars())
    }
}
