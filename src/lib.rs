//! # shopcat
//!
//! A concurrently-accessed product catalog: sellable items (perishable and
//! standard), per-item customer reviews, an aggregate rating derived from
//! those reviews, and locale-specific reports and discount summaries.
//! Multiple worker threads share one [`store::CatalogStore`] under
//! multi-reader/single-writer isolation.
//!
//! ## Module tour
//!
//! - [`model`]: The domain types: [`model::Product`] (two variants, identity
//!   by id only), [`model::Rating`] (six-member ordinal scale), and
//!   [`model::Review`].
//! - [`codec`]: The tolerant line-record parser/serializer for the flat-file
//!   format. One bad line never aborts a batch.
//! - [`locale`]: Per-locale formatting tables and the [`locale::Formatter`].
//!   Unsupported tags fall back to `en-GB`.
//! - [`persist`]: Filename conventions and the one-shot startup loader that
//!   seeds the catalog from the data directory.
//! - [`store`]: The core. One `RwLock` over the whole mapping; reads run
//!   concurrently, writes exclusively, and a rating update swaps the catalog
//!   entry atomically because the map key's identity excludes the rating.
//! - [`telemetry`]: `tracing` subscriber setup for the demo binary.
//!
//! ## Quick start
//!
//! ```ignore
//! let store = CatalogStore::new(CatalogPaths::default());
//! store.create(101, "Tea", dec!(1.99), Rating::NotRated, None)?;
//! store.add_review(101, Rating::FourStars, "Nice hot cup of tea")?;
//! store.report(101, "en-GB", "client-1");
//! ```
//!
//! Run the demo driver with `RUST_LOG=info cargo run`; it spawns a handful
//! of client threads that hammer the shared store and print their session
//! logs.

pub mod codec;
pub mod locale;
pub mod model;
pub mod persist;
pub mod store;
pub mod telemetry;
