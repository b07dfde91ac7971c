//! Storefront catalog toolkit.
//!
//! `shopfront` turns a small product catalog and a size-keyed price table
//! into ordered display lists, formatted prices, and static HTML pages.
//! Both data sources are explicit parameters loaded from versioned JSON
//! documents; nothing in the crate reads global state, so every component
//! is a pure function of its inputs plus deterministic I/O.
//!
//! The two cores are [`listing::ListingEngine`] (rank, sort, filter,
//! search) and [`pricing::PriceBook`] (resolve, format). The renderer and
//! site builder sit on top of them and own all markup and escaping.

pub mod catalog;
pub mod error;
pub mod listing;
pub mod pricing;
pub mod render;
pub mod schema;
pub mod site;

pub use catalog::{
    CATALOG_SCHEMA_VERSION, CatalogKey, CatalogMetadata, DEFAULT_CATALOG_PATH, DisplayConfig,
    Product, ProductIndex, ProductKey, ProductRecord, StoreCatalog, load_catalog_from_path,
};
pub use error::{DataSourceError, PricingError};
pub use listing::{DisplayItem, DisplayList, ListingEngine, ListingQuery, UNRANKED, tag_rank};
pub use pricing::{
    DEFAULT_PRICES_PATH, PRICES_SCHEMA_VERSION, PriceBook, PriceDisplay, PricePanel, format_price,
};
pub use render::escape_html;
pub use schema::{validate_catalog_document, validate_prices_document};
pub use site::{SiteBuilder, SiteSummary};
