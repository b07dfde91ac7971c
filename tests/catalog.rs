// Catalog ingestion and index guard rails.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use serde_json::json;
use shopfront::{ProductIndex, ProductKey};

use common::{bundled_catalog_path, catalog_document, index_from, write_document};

#[test]
fn load_bundled_catalog_smoke() -> Result<()> {
    let index = ProductIndex::load(&bundled_catalog_path())?;
    assert!(!index.key().0.is_empty());
    assert!(!index.is_empty());
    assert_eq!(index.namespace(), Some("janat-"));
    for product in index.products() {
        assert!(!product.key.as_str().is_empty());
        assert!(!product.name.is_empty());
    }
    Ok(())
}

#[test]
fn index_enforces_schema_version() -> Result<()> {
    let document = json!({
        "schema_version": "unexpected",
        "catalog": { "key": "fixture_catalog_v1", "title": "fixture" },
        "products": {}
    });
    let file = write_document(&document)?;
    assert!(ProductIndex::load(file.path()).is_err());
    Ok(())
}

#[test]
fn defaults_are_applied_once_at_ingestion() -> Result<()> {
    let index = index_from(&catalog_document(
        "en",
        None,
        &[],
        json!({ "bare-001": {} }),
    ))?;
    let product = index
        .product(&ProductKey::from("bare-001"))
        .expect("product present");
    assert_eq!(product.name, "bare-001", "name defaults to the key");
    assert_eq!(product.description, "");
    assert!(product.tags.is_empty());
    Ok(())
}

#[test]
fn rejects_malformed_product_keys() -> Result<()> {
    let document = catalog_document("en", None, &[], json!({ "bad key!": {} }));
    let file = write_document(&document)?;
    assert!(ProductIndex::load(file.path()).is_err());
    Ok(())
}

#[test]
fn rejects_empty_tags_and_duplicate_priority_entries() -> Result<()> {
    let empty_tag = catalog_document(
        "en",
        None,
        &[],
        json!({ "k1": { "tags": ["fruit", "  "] } }),
    );
    let file = write_document(&empty_tag)?;
    assert!(ProductIndex::load(file.path()).is_err());

    let duplicated = catalog_document("en", None, &["classic", "classic"], json!({}));
    let file = write_document(&duplicated)?;
    assert!(ProductIndex::load(file.path()).is_err());
    Ok(())
}

#[test]
fn rejects_malformed_namespace() -> Result<()> {
    let document = catalog_document("en", Some("janat "), &[], json!({}));
    let file = write_document(&document)?;
    assert!(ProductIndex::load(file.path()).is_err());
    Ok(())
}

#[test]
fn empty_product_map_is_legal() -> Result<()> {
    let index = index_from(&catalog_document("en", None, &["classic"], json!({})))?;
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    Ok(())
}

#[test]
fn display_defaults_cover_an_absent_display_block() -> Result<()> {
    let document = json!({
        "schema_version": "storefront_catalog_v1",
        "catalog": { "key": "fixture_catalog_v1", "title": "fixture" },
        "products": {}
    });
    let file = write_document(&document)?;
    let index = ProductIndex::load(file.path())?;
    assert_eq!(index.display().locale, "ja");
    assert_eq!(index.display().currency_symbol, "¥");
    assert_eq!(index.display().price_placeholder, "価格未設定");
    Ok(())
}
