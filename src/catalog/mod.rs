//! Catalog document wiring.
//!
//! This module wraps catalog documents on disk (for example
//! `catalogs/janat_catalog_v1.json`) so the lister, price resolver, and site
//! builder can load a validated snapshot and share consistent identifiers.
//! Types here mirror the document fields; callers use `ProductIndex` for
//! lookups and iteration.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CatalogKey, ProductKey};
pub use index::{Product, ProductIndex};
pub use model::{
    CATALOG_SCHEMA_VERSION, CatalogMetadata, DisplayConfig, ProductRecord, StoreCatalog,
};

pub use model::load_catalog_from_path;

/// Default relative path to the bundled catalog document.
pub const DEFAULT_CATALOG_PATH: &str = "catalogs/janat_catalog_v1.json";
