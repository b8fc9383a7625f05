//! Pure domain types: [`Rating`], [`Product`], and [`Review`].

pub mod product;
pub mod rating;
pub mod review;

pub use product::*;
pub use rating::*;
pub use review::*;
