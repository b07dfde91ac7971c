//! Indexed view of a catalog document.
//!
//! The index enforces the expected document schema version, validates keys
//! and metadata, applies the record field defaults once, and provides fast
//! lookup by product key. It is intentionally strict about malformed keys
//! and unknown schema versions so the renderer never consumes a catalog it
//! does not understand.

use crate::catalog::identity::key_charset_ok;
use crate::catalog::load_catalog_from_path;
use crate::catalog::{CatalogKey, CatalogMetadata, DisplayConfig, ProductKey, StoreCatalog};
use anyhow::{Context, Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

// The toolkit currently ships a single document format; reject unexpected
// versions rather than risk rendering pages from mismatched data. Callers can
// widen the accepted set via env while keeping a sane default.
const DEFAULT_SCHEMA_VERSION: &str = super::model::CATALOG_SCHEMA_VERSION;
const ENV_ALLOWED_SCHEMA_VERSIONS: &str = "SHOPFRONT_ALLOWED_CATALOG_SCHEMAS";

/// One product after ingestion: defaults applied, key validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub key: ProductKey,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug)]
/// Catalog document plus a derived index keyed by product key.
pub struct ProductIndex {
    metadata: CatalogMetadata,
    display: DisplayConfig,
    tag_priority: Vec<String>,
    by_key: BTreeMap<ProductKey, Product>,
}

impl ProductIndex {
    /// Load and validate a catalog from disk.
    ///
    /// Validates the schema version and metadata, ensures product keys are
    /// well formed, and builds a deterministic BTreeMap for lookups. An
    /// empty product map is legal; it lists as zero items.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_catalog(catalog)
    }

    /// Validate and index an already-parsed catalog document.
    pub fn from_catalog(catalog: StoreCatalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        validate_catalog_metadata(&catalog.catalog)?;
        validate_tag_priority(&catalog.tag_priority)?;
        let by_key = build_index(&catalog)?;
        Ok(Self {
            metadata: catalog.catalog,
            display: catalog.display,
            tag_priority: catalog.tag_priority,
            by_key,
        })
    }

    /// The catalog key declared in the loaded document.
    pub fn key(&self) -> &CatalogKey {
        &self.metadata.key
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Optional key-prefix namespace the listing restricts itself to.
    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Tag priority list, most important first.
    pub fn tag_priority(&self) -> &[String] {
        &self.tag_priority
    }

    /// Resolve a product by key.
    ///
    /// Returns `None` instead of erroring; callers surface errors with the
    /// context that referenced the missing key.
    pub fn product(&self, key: &ProductKey) -> Option<&Product> {
        self.by_key.get(key)
    }

    /// Iterates product keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &ProductKey> {
        self.by_key.keys()
    }

    /// Iterates products in stable key order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.by_key.values()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !key_charset_ok(schema_version) {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

pub fn allowed_schema_versions() -> BTreeSet<String> {
    let mut versions: BTreeSet<String> = BTreeSet::new();
    versions.insert(DEFAULT_SCHEMA_VERSION.to_string());
    if let Ok(raw) = std::env::var(ENV_ALLOWED_SCHEMA_VERSIONS) {
        for v in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            versions.insert(v.to_string());
        }
    }
    versions
}

fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    if !key_charset_ok(&meta.key.0) {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got '{}'", meta.key);
    }
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    if let Some(namespace) = &meta.namespace {
        if !key_charset_ok(namespace) {
            bail!(
                "catalog.namespace must match ^[A-Za-z0-9_.-]+$, got '{}'",
                namespace
            );
        }
    }
    Ok(())
}

fn validate_tag_priority(priority: &[String]) -> Result<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for tag in priority {
        if tag.trim().is_empty() {
            bail!("tag_priority must not contain empty entries");
        }
        if !seen.insert(tag.as_str()) {
            bail!("tag_priority lists '{}' more than once", tag);
        }
    }
    Ok(())
}

fn build_index(catalog: &StoreCatalog) -> Result<BTreeMap<ProductKey, Product>> {
    let mut map = BTreeMap::new();
    for (key, record) in &catalog.products {
        if !key_charset_ok(key.as_str()) {
            bail!("product key must match ^[A-Za-z0-9_.-]+$, got '{}'", key);
        }
        if record.tags.iter().any(|tag| tag.trim().is_empty()) {
            bail!("product '{}' lists an empty tag", key);
        }
        // Defaults applied once here, not scattered across call sites: a
        // missing name falls back to the key, a missing description to "".
        let product = Product {
            key: key.clone(),
            name: record
                .name
                .clone()
                .unwrap_or_else(|| key.as_str().to_string()),
            description: record.desc.clone(),
            tags: record.tags.clone(),
        };
        map.insert(key.clone(), product);
    }
    Ok(map)
}
