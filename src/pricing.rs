//! Price book and price resolution.
//!
//! The price book maps product key → size (grams) → whole-unit price. Two
//! unpriced conditions are distinguished and both are non-fatal: an unknown
//! product and an unknown size for a known product. Callers render the
//! configured placeholder and the rest of the page keeps working; the
//! diagnostic goes to the tracing channel, not the user-visible surface.

use crate::catalog::identity::key_charset_ok;
use crate::catalog::{DisplayConfig, ProductKey};
use crate::error::{DataSourceError, PricingError};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Version marker accepted for price documents.
pub const PRICES_SCHEMA_VERSION: &str = "storefront_prices_v1";

/// Default relative path to the bundled price document.
pub const DEFAULT_PRICES_PATH: &str = "catalogs/janat_prices_v1.json";

#[derive(Debug, Deserialize)]
struct PriceDocument {
    schema_version: String,
    // Sizes arrive as JSON object keys, so they are strings on the wire and
    // parsed to grams during ingestion.
    #[serde(default)]
    prices: BTreeMap<String, BTreeMap<String, u64>>,
}

#[derive(Debug, Clone, Default)]
/// Validated price table: product key → size in grams → whole-unit price.
pub struct PriceBook {
    by_key: BTreeMap<ProductKey, BTreeMap<u32, u64>>,
}

impl PriceBook {
    /// Load and validate a price document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DataSourceError::Missing {
                path: path.to_path_buf(),
            }
            .into());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading price table {}", path.display()))?;
        let document: PriceDocument = serde_json::from_str(&data)
            .with_context(|| format!("parsing price table {}", path.display()))?;
        Self::from_document(document)
    }

    fn from_document(document: PriceDocument) -> Result<Self> {
        if document.schema_version != PRICES_SCHEMA_VERSION {
            bail!(
                "unsupported price table version '{}', expected {}",
                document.schema_version,
                PRICES_SCHEMA_VERSION
            );
        }

        let mut by_key = BTreeMap::new();
        for (key, sizes) in document.prices {
            if !key_charset_ok(&key) {
                bail!("price table key must match ^[A-Za-z0-9_.-]+$, got '{}'", key);
            }
            let mut parsed = BTreeMap::new();
            for (size, price) in sizes {
                let grams: u32 = size.parse().with_context(|| {
                    format!("price table entry '{key}' has a non-numeric size '{size}'")
                })?;
                if grams == 0 {
                    bail!("price table entry '{key}' lists size 0");
                }
                parsed.insert(grams, price);
            }
            by_key.insert(ProductKey(key), parsed);
        }
        Ok(Self { by_key })
    }

    /// Resolve the configured price for a product at a size.
    pub fn resolve(&self, key: &ProductKey, size: u32) -> Result<u64, PricingError> {
        let sizes = self
            .by_key
            .get(key)
            .ok_or_else(|| PricingError::ItemNotPriced { key: key.clone() })?;
        sizes
            .get(&size)
            .copied()
            .ok_or_else(|| PricingError::SizeNotPriced {
                key: key.clone(),
                size,
            })
    }

    /// Sizes configured for a product, ascending. Empty when the product is
    /// not priced at all.
    pub fn sizes(&self, key: &ProductKey) -> Vec<u32> {
        self.by_key
            .get(key)
            .map(|sizes| sizes.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Format a resolved price for display: currency symbol, thousands-grouped
/// amount, fixed tax-included suffix. Deterministic for identical input.
pub fn format_price(amount: u64, display: &DisplayConfig) -> String {
    format!(
        "{}{}{}",
        display.currency_symbol,
        group_thousands(amount),
        display.tax_suffix
    )
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one resolve+format cycle for the price region.
pub enum PriceDisplay {
    Formatted(String),
    Unavailable,
}

impl PriceDisplay {
    /// The text the display surface shows: the formatted price, or the
    /// configured placeholder.
    pub fn text<'a>(&'a self, display: &'a DisplayConfig) -> &'a str {
        match self {
            PriceDisplay::Formatted(text) => text,
            PriceDisplay::Unavailable => &display.price_placeholder,
        }
    }
}

/// Size-selection state for one product page.
///
/// `Unselected → Selected(size) → Selected(size')`; each transition
/// re-resolves and re-formats. No history beyond the current selection.
pub struct PricePanel<'a> {
    book: &'a PriceBook,
    display: &'a DisplayConfig,
    key: ProductKey,
    selected: Option<u32>,
}

impl<'a> PricePanel<'a> {
    pub fn new(book: &'a PriceBook, display: &'a DisplayConfig, key: ProductKey) -> Self {
        Self {
            book,
            display,
            key,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Select a size and return the refreshed price region content.
    pub fn select(&mut self, size: u32) -> PriceDisplay {
        self.selected = Some(size);
        self.current()
    }

    /// Price region content for the current selection. Unpriced conditions
    /// degrade to the placeholder and warn on the operator channel; nothing
    /// here ever aborts the surrounding render.
    pub fn current(&self) -> PriceDisplay {
        let Some(size) = self.selected else {
            return PriceDisplay::Unavailable;
        };
        match self.book.resolve(&self.key, size) {
            Ok(amount) => PriceDisplay::Formatted(format_price(amount, self.display)),
            Err(err) => {
                warn!(product = %self.key, size, "{err}");
                PriceDisplay::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(2400), "2,400");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn format_uses_configured_symbol_and_suffix() {
        let display = DisplayConfig::default();
        assert_eq!(format_price(2400, &display), "¥2,400（税込）");
        // Same input, same output.
        assert_eq!(format_price(2400, &display), format_price(2400, &display));
    }

    #[test]
    fn rejects_unknown_document_version() {
        let document = PriceDocument {
            schema_version: "storefront_prices_v0".to_string(),
            prices: BTreeMap::new(),
        };
        assert!(PriceBook::from_document(document).is_err());
    }

    #[test]
    fn rejects_non_numeric_and_zero_sizes() {
        for size in ["fifty", "0"] {
            let document = PriceDocument {
                schema_version: PRICES_SCHEMA_VERSION.to_string(),
                prices: BTreeMap::from([(
                    "janat-101".to_string(),
                    BTreeMap::from([(size.to_string(), 1200_u64)]),
                )]),
            };
            assert!(
                PriceBook::from_document(document).is_err(),
                "size '{size}' should be rejected"
            );
        }
    }
}
