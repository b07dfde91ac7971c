#![allow(dead_code)]

// Shared fixture builders: in-memory catalog/price documents written to temp
// files, plus paths to the bundled documents under catalogs/.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use shopfront::{PriceBook, ProductIndex};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub fn bundled_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(shopfront::DEFAULT_CATALOG_PATH)
}

pub fn bundled_prices_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(shopfront::DEFAULT_PRICES_PATH)
}

/// A catalog document with sane fixture metadata. `namespace` is omitted
/// entirely when `None` so documents stay schema-clean.
pub fn catalog_document(
    locale: &str,
    namespace: Option<&str>,
    tag_priority: &[&str],
    products: Value,
) -> Value {
    let mut metadata = json!({
        "key": "fixture_catalog_v1",
        "title": "fixture catalog",
    });
    if let Some(prefix) = namespace {
        metadata["namespace"] = json!(prefix);
    }
    json!({
        "schema_version": "storefront_catalog_v1",
        "catalog": metadata,
        "display": { "locale": locale },
        "tag_priority": tag_priority,
        "products": products,
    })
}

pub fn prices_document(prices: Value) -> Value {
    json!({
        "schema_version": "storefront_prices_v1",
        "prices": prices,
    })
}

/// Write any JSON document to a temp file; keep the handle alive while the
/// path is in use.
pub fn write_document(document: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("allocating fixture document")?;
    serde_json::to_writer(&mut file, document).context("writing fixture document")?;
    file.flush().context("flushing fixture document")?;
    Ok(file)
}

pub fn index_from(document: &Value) -> Result<ProductIndex> {
    let file = write_document(document)?;
    ProductIndex::load(file.path()).context("loading fixture catalog")
}

pub fn book_from(document: &Value) -> Result<PriceBook> {
    let file = write_document(document)?;
    PriceBook::load(file.path()).context("loading fixture price table")
}

/// The two-item scenario used across the listing tests: Apple tagged fruit,
/// Bell tagged classic, priority `[classic, fruit]`, English collation.
pub fn apple_bell_index() -> Result<ProductIndex> {
    index_from(&catalog_document(
        "en",
        None,
        &["classic", "fruit"],
        json!({
            "a": { "name": "Apple", "tags": ["fruit"] },
            "b": { "name": "Bell", "tags": ["classic"] },
        }),
    ))
}
