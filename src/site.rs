//! Static site builder.
//!
//! Renders the list page plus one detail page per product into an output
//! directory. Pages are written through a temp file and persisted into
//! place, so a crash mid-build never leaves a half-written page behind.

use crate::catalog::ProductIndex;
use crate::listing::{ListingEngine, ListingQuery};
use crate::pricing::PriceBook;
use crate::render;
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Result of one site build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSummary {
    /// Pages written, the list page included.
    pub pages: usize,
}

pub struct SiteBuilder<'a> {
    index: &'a ProductIndex,
    book: &'a PriceBook,
    engine: &'a ListingEngine,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(index: &'a ProductIndex, book: &'a PriceBook, engine: &'a ListingEngine) -> Self {
        Self {
            index,
            book,
            engine,
        }
    }

    /// Render every page into `out_dir`, creating the directory when needed.
    ///
    /// The list page reflects the unfiltered listing order; each product in
    /// it gets a `<key>.html` detail page. Unpriced products render with
    /// the placeholder rather than aborting the build.
    pub fn build(&self, out_dir: &Path) -> Result<SiteSummary> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;

        let list = self
            .engine
            .display_list(self.index, &ListingQuery::default());
        write_page(
            out_dir,
            "index.html",
            &render::render_list_page(self.index.title(), &list),
        )?;

        for item in &list.items {
            let product = self
                .index
                .product(&item.key)
                .ok_or_else(|| anyhow!("display item '{}' missing from index", item.key))?;
            let html = render::render_product_page(product, self.book, self.index.display());
            write_page(out_dir, &item.href, &html)?;
        }

        let pages = list.count() + 1;
        info!(pages, out = %out_dir.display(), "site build complete");
        Ok(SiteSummary { pages })
    }
}

fn write_page(dir: &Path, name: &str, html: &str) -> Result<()> {
    let path = dir.join(name);
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("allocating temp file in {}", dir.display()))?;
    tmp.write_all(html.as_bytes())
        .with_context(|| format!("writing page body for {}", path.display()))?;
    tmp.persist(&path)
        .with_context(|| format!("persisting {}", path.display()))?;
    debug!(page = name, "page written");
    Ok(())
}
