//! JSON Schema validation for catalog and price documents.
//!
//! The schemas ship inside the binary (`schemas/*.schema.json`) so the
//! `validate` subcommand works without a checkout. Structural validation
//! runs first; the allowed-schema-version check runs on top of it, since
//! the version set can be widened via env.

use crate::catalog::index::allowed_schema_versions;
use crate::pricing::PRICES_SCHEMA_VERSION;
use anyhow::{Context, Result, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::LazyLock;

static CATALOG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../schemas/storefront_catalog.schema.json"))
        .expect("bundled catalog schema is valid JSON")
});

static PRICES_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../schemas/storefront_prices.schema.json"))
        .expect("bundled price schema is valid JSON")
});

/// Validate a catalog document against the bundled schema and the allowed
/// version set.
pub fn validate_catalog_document(document: &Value) -> Result<()> {
    validate_against(&CATALOG_SCHEMA, document, "catalog")?;

    let version = document
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let allowed = allowed_schema_versions();
    if !allowed.contains(version) {
        bail!(
            "catalog schema_version '{}' not in allowed set {:?}",
            version,
            allowed
        );
    }
    Ok(())
}

/// Validate a price document against the bundled schema and its version
/// marker.
pub fn validate_prices_document(document: &Value) -> Result<()> {
    validate_against(&PRICES_SCHEMA, document, "price table")?;

    let version = document
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != PRICES_SCHEMA_VERSION {
        bail!(
            "price table schema_version '{}', expected {}",
            version,
            PRICES_SCHEMA_VERSION
        );
    }
    Ok(())
}

fn validate_against(schema: &'static Value, document: &Value, what: &str) -> Result<()> {
    let compiled =
        JSONSchema::compile(schema).with_context(|| format!("compiling bundled {what} schema"))?;
    if let Err(errors) = compiled.validate(document) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{what} document failed schema validation:\n{details}");
    }
    Ok(())
}
