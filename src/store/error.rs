//! Error types for the catalog store.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// No product with the given id exists in the catalog.
    #[error("Product not found: {0}")]
    NotFound(u32),

    /// A product with the given id is already stored. The existing entry and
    /// its reviews are left untouched.
    #[error("Product id already in catalog: {0}")]
    DuplicateId(u32),
}
