//! Typed error taxonomy for the storefront core.
//!
//! Three conditions matter to callers and each is recovered locally: a data
//! source that was never supplied, a product with no price table entry, and
//! a size with no price for an otherwise-known product. Everything else
//! travels as `anyhow::Error` with context, matching the loaders.

use crate::catalog::ProductKey;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The catalog or price document path does not exist. Distinct from
    /// "document present but zero products survive filtering".
    #[error("data source missing: {}", path.display())]
    Missing { path: PathBuf },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The product key is absent from the price table entirely.
    #[error("product '{key}' has no price table entry")]
    ItemNotPriced { key: ProductKey },

    /// The product is priced, but not at the requested size.
    #[error("no price set for product '{key}' at {size}g")]
    SizeNotPriced { key: ProductKey, size: u32 },
}
