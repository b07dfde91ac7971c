//! Serde model for catalog documents on disk.
//!
//! The document shape mirrors `catalogs/janat_catalog_v1.json`: a versioned
//! wrapper with catalog metadata, display configuration, the tag priority
//! list, and the product map. Field defaulting happens later, when
//! `ProductIndex` ingests the raw records.

use crate::catalog::{CatalogKey, ProductKey};
use crate::error::DataSourceError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Version marker accepted by default for catalog documents.
pub const CATALOG_SCHEMA_VERSION: &str = "storefront_catalog_v1";

#[derive(Debug, Deserialize, Clone)]
/// A catalog document exactly as parsed from disk.
pub struct StoreCatalog {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub tag_priority: Vec<String>,
    #[serde(default)]
    pub products: BTreeMap<ProductKey, ProductRecord>,
}

#[derive(Debug, Deserialize, Clone)]
/// Identity block of a catalog document.
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    /// Optional key prefix restricting the listing to one product family.
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
/// Fixed-locale display configuration.
///
/// The locale is configuration, never detected from the runtime
/// environment, so formatted output is byte-identical across hosts.
pub struct DisplayConfig {
    pub locale: String,
    pub currency_symbol: String,
    pub tax_suffix: String,
    pub price_placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: "ja".to_string(),
            currency_symbol: "¥".to_string(),
            tax_suffix: "（税込）".to_string(),
            price_placeholder: "価格未設定".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
/// One product as authored. `name`, `desc`, and `tags` are all optional;
/// `ProductIndex` applies the defaults in one place.
pub struct ProductRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parse a catalog document from disk.
///
/// A path that does not exist is a configuration error
/// ([`DataSourceError::Missing`]) so callers can tell "no catalog supplied"
/// apart from "catalog present but empty or malformed".
pub fn load_catalog_from_path(path: &Path) -> Result<StoreCatalog> {
    if !path.exists() {
        return Err(DataSourceError::Missing {
            path: path.to_path_buf(),
        }
        .into());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog: StoreCatalog = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(catalog)
}
