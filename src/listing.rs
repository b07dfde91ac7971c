//! Catalog lister and filterer.
//!
//! Produces the ordered display list for the storefront list page: products
//! are ranked by their best tag against the catalog's priority list, sorted
//! by `(rank, collated name, key)`, then narrowed by the optional tag filter
//! and case-folded substring search. Sorting always runs on the full
//! (namespace-restricted) catalog so a filtered list preserves the relative
//! order of the unfiltered one.

use crate::catalog::{DisplayConfig, Product, ProductIndex, ProductKey};
use anyhow::{Result, anyhow};
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Rank of a product whose tags are absent from the priority list.
///
/// Strictly greater than any valid priority index, so unranked products sort
/// after every ranked one.
pub const UNRANKED: usize = usize::MAX;

/// Best (smallest) priority index of any of the product's tags.
///
/// Returns [`UNRANKED`] when the product has no tags or none of them appear
/// in the priority list.
pub fn tag_rank(tags: &[String], priority: &[String]) -> usize {
    let mut best = UNRANKED;
    for tag in tags {
        if let Some(position) = priority.iter().position(|entry| entry == tag) {
            best = best.min(position);
        }
    }
    best
}

#[derive(Debug, Clone, Default)]
/// User input narrowing the list: free-text search plus a single tag.
///
/// Both default to "no filter". An empty tag string also means "no filter"
/// so a select control's blank option can pass through unchanged.
pub struct ListingQuery {
    pub search: String,
    pub tag: Option<String>,
}

impl ListingQuery {
    fn tag_filter(&self) -> Option<&str> {
        match self.tag.as_deref() {
            Some("") | None => None,
            Some(tag) => Some(tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One list entry, ready for a display surface. Plain data; escaping is the
/// renderer's job.
pub struct DisplayItem {
    pub key: ProductKey,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
/// Ordered result of one list/filter cycle.
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lister with a compiled collator for the catalog's display locale.
///
/// Construction fails loudly on an unknown locale; everything after that is
/// a pure function of the index and the query.
pub struct ListingEngine {
    collator: Collator,
}

impl ListingEngine {
    pub fn new(display: &DisplayConfig) -> Result<Self> {
        let locale: Locale = display
            .locale
            .parse()
            .map_err(|err| anyhow!("invalid display locale '{}': {err}", display.locale))?;
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = Collator::try_new(&locale.into(), options).map_err(|err| {
            anyhow!(
                "loading collation data for locale '{}': {err}",
                display.locale
            )
        })?;
        Ok(Self { collator })
    }

    /// Build the ordered, filtered display list plus its count.
    pub fn display_list(&self, index: &ProductIndex, query: &ListingQuery) -> DisplayList {
        let mut ranked: Vec<(usize, &Product)> = index
            .products()
            .filter(|product| {
                index
                    .namespace()
                    .is_none_or(|prefix| product.key.as_str().starts_with(prefix))
            })
            .map(|product| (tag_rank(&product.tags, index.tag_priority()), product))
            .collect();

        ranked.sort_by(|(rank_a, a), (rank_b, b)| {
            rank_a
                .cmp(rank_b)
                .then_with(|| self.collator.compare(&a.name, &b.name))
                .then_with(|| a.key.cmp(&b.key))
        });

        let needle = normalize(&query.search);
        let items = ranked
            .into_iter()
            .filter(|(_, product)| {
                query
                    .tag_filter()
                    .is_none_or(|tag| product.tags.iter().any(|entry| entry == tag))
            })
            .filter(|(_, product)| needle.is_empty() || search_haystack(product).contains(&needle))
            .map(|(_, product)| DisplayItem {
                key: product.key.clone(),
                name: product.name.clone(),
                description: product.description.clone(),
                tags: product.tags.clone(),
                href: product.key.page_href(),
            })
            .collect();

        DisplayList { items }
    }

    /// Every tag present across the catalog, priority entries first (in
    /// priority order), the remainder in collated order.
    pub fn distinct_tags(&self, index: &ProductIndex) -> Vec<String> {
        let mut present: BTreeSet<&str> = BTreeSet::new();
        for product in index.products() {
            for tag in &product.tags {
                present.insert(tag.as_str());
            }
        }

        let mut ordered: Vec<String> = index
            .tag_priority()
            .iter()
            .filter(|tag| present.contains(tag.as_str()))
            .cloned()
            .collect();

        let mut rest: Vec<&str> = present
            .iter()
            .filter(|tag| !index.tag_priority().iter().any(|entry| entry == **tag))
            .copied()
            .collect();
        rest.sort_by(|a, b| self.compare(a, b));
        ordered.extend(rest.into_iter().map(str::to_string));
        ordered
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
}

fn search_haystack(product: &Product) -> String {
    normalize(&format!(
        "{} {} {}",
        product.name,
        product.description,
        product.tags.join(" ")
    ))
}
