//! Tracing setup for the binary and integration scenarios.
//!
//! Structured logging via the `tracing` crate, configurable with `RUST_LOG`:
//!
//! ```bash
//! # Operation-level logs
//! RUST_LOG=info cargo run
//!
//! # Include dropped-record details from the codec and loader
//! RUST_LOG=debug cargo run
//! ```
//!
//! The compact format keeps one operation per line; module targets are
//! hidden because the store already records the product id and operation as
//! structured fields.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
