//! Storefront command line.
//!
//! Usage:
//!   shopfront list [--search TEXT] [--tag TAG] [--json]
//!   shopfront tags
//!   shopfront price --product KEY --size GRAMS
//!   shopfront build [--out DIR]
//!   shopfront validate
//!
//! Catalog and price document paths come from `--catalog`/`--prices`, the
//! `SHOPFRONT_CATALOG`/`SHOPFRONT_PRICES` env vars, or the bundled defaults
//! under `catalogs/`, in that order. Diagnostics go to stderr so stdout
//! stays machine-consumable.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use shopfront::{
    DEFAULT_CATALOG_PATH, DEFAULT_PRICES_PATH, ListingEngine, ListingQuery, PriceBook,
    ProductIndex, ProductKey, SiteBuilder, format_price, validate_catalog_document,
    validate_prices_document,
};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shopfront")]
#[command(about = "Rank, filter, and price a storefront catalog, and build its static pages")]
struct Cli {
    /// Catalog document path (default: SHOPFRONT_CATALOG or the bundled catalog).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Price document path (default: SHOPFRONT_PRICES or the bundled table).
    #[arg(long, global = true)]
    prices: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ordered, filtered display list with its count.
    List {
        /// Case-insensitive substring matched against name, description, and tags.
        #[arg(long, default_value = "")]
        search: String,
        /// Keep only items carrying this tag.
        #[arg(long)]
        tag: Option<String>,
        /// Emit JSON instead of the human listing.
        #[arg(long)]
        json: bool,
    },
    /// Print every tag present in the catalog, priority entries first.
    Tags,
    /// Resolve and format the price for one product and size.
    Price {
        #[arg(long)]
        product: String,
        /// Size in grams.
        #[arg(long)]
        size: u32,
    },
    /// Render the static site.
    Build {
        /// Output directory.
        #[arg(long, default_value = "site")]
        out: PathBuf,
    },
    /// Validate the catalog and price documents against the bundled schemas.
    Validate,
}

fn main() {
    let filter = env::var("SHOPFRONT_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let catalog_path = resolve_data_path(cli.catalog, "SHOPFRONT_CATALOG", DEFAULT_CATALOG_PATH);
    let prices_path = resolve_data_path(cli.prices, "SHOPFRONT_PRICES", DEFAULT_PRICES_PATH);

    match cli.command {
        Command::List { search, tag, json } => run_list(&catalog_path, search, tag, json),
        Command::Tags => run_tags(&catalog_path),
        Command::Price { product, size } => run_price(&catalog_path, &prices_path, product, size),
        Command::Build { out } => run_build(&catalog_path, &prices_path, &out),
        Command::Validate => run_validate(&catalog_path, &prices_path),
    }
}

fn resolve_data_path(flag: Option<PathBuf>, env_var: &str, default: &str) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(value) = env::var(env_var) {
        if !value.is_empty() {
            return PathBuf::from(value);
        }
    }
    PathBuf::from(default)
}

fn run_list(catalog_path: &PathBuf, search: String, tag: Option<String>, json: bool) -> Result<()> {
    let index = ProductIndex::load(catalog_path)?;
    let engine = ListingEngine::new(index.display())?;
    let query = ListingQuery { search, tag };
    let list = engine.display_list(&index, &query);

    if json {
        let payload = json!({
            "count": list.count(),
            "items": list.items,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for item in &list.items {
        let tags = if item.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", item.tags.join(", "))
        };
        println!("{}  {}{}", item.key, item.name, tags);
    }
    println!("{}", shopfront::render::render_count(list.count()));
    Ok(())
}

fn run_tags(catalog_path: &PathBuf) -> Result<()> {
    let index = ProductIndex::load(catalog_path)?;
    let engine = ListingEngine::new(index.display())?;
    for tag in engine.distinct_tags(&index) {
        println!("{tag}");
    }
    Ok(())
}

fn run_price(
    catalog_path: &PathBuf,
    prices_path: &PathBuf,
    product: String,
    size: u32,
) -> Result<()> {
    let index = ProductIndex::load(catalog_path)?;
    let book = PriceBook::load(prices_path)?;
    let key = ProductKey(product);
    let amount = book.resolve(&key, size)?;
    println!("{}", format_price(amount, index.display()));
    Ok(())
}

fn run_build(catalog_path: &PathBuf, prices_path: &PathBuf, out: &PathBuf) -> Result<()> {
    let index = ProductIndex::load(catalog_path)?;
    let book = PriceBook::load(prices_path)?;
    let engine = ListingEngine::new(index.display())?;
    let summary = SiteBuilder::new(&index, &book, &engine).build(out)?;
    println!("{} page(s) written to {}", summary.pages, out.display());
    Ok(())
}

fn run_validate(catalog_path: &PathBuf, prices_path: &PathBuf) -> Result<()> {
    let catalog_doc = read_json(catalog_path)?;
    let prices_doc = read_json(prices_path)?;

    let mut failures = Vec::new();
    if let Err(err) = validate_catalog_document(&catalog_doc) {
        failures.push(format!("{}: {err:#}", catalog_path.display()));
    }
    if let Err(err) = validate_prices_document(&prices_doc) {
        failures.push(format!("{}: {err:#}", prices_path.display()));
    }

    if failures.is_empty() {
        println!("validate: PASS");
        return Ok(());
    }

    eprintln!("validate: FAIL");
    for failure in &failures {
        eprintln!("  - {failure}");
    }
    anyhow::bail!("document validation failed");
}

fn read_json(path: &PathBuf) -> Result<Value> {
    if !path.exists() {
        return Err(shopfront::DataSourceError::Missing { path: path.clone() }.into());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}
