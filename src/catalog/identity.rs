//! Newtype identifiers shared across the catalog, price book, and renderer.
//!
//! Keys stay ordinary strings on the wire; the newtypes keep product keys and
//! catalog keys from being swapped for free-form display text inside the
//! crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of one product within a catalog.
///
/// Doubles as the page name: the detail page for a product is always
/// `<key>.html`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ProductKey(pub String);

impl ProductKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative href of the product's detail page.
    pub fn page_href(&self) -> String {
        format!("{}.html", self.0)
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductKey {
    fn from(value: &str) -> Self {
        ProductKey(value.to_string())
    }
}

/// Identifier of a catalog document as declared in its metadata block.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared charset rule for catalog and product keys.
pub(crate) fn key_charset_ok(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
