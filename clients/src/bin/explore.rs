//! `multiverse-explore` — Expands the multiverse board graph into a SQLite file.
//!
//! Opens (or creates) the store, inserts the seed as a root board, then
//! expands pass by pass until no unexpanded board is left or the expansion
//! budget is spent. Re-running on the same file resumes where the last run
//! stopped.
//!
//! **Usage:**
//! ```
//! multiverse-explore [--db <path>] [--config <path>] [--max-expansions <n>]
//! ```
//!
//! Logging follows `RUST_LOG`, falling back to the `log` directive of the
//! configuration file.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use multiverse::RulesetCatalog;
use multiverse_explorer::{Explorer, ExplorerConfig};
use multiverse_store::GraphStore;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Explore the reachable board graph of the four-threshold rule family.
#[derive(Parser)]
#[command(
    name = "multiverse-explore",
    about = "Expand the multiverse board graph into a SQLite store"
)]
struct Args {
    /// Store file (overrides `store.path` from the configuration).
    #[arg(long)]
    db: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many expansions.
    #[arg(long)]
    max_expansions: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ExplorerConfig::default(),
    };
    if let Some(db) = args.db {
        config.store.path = db;
    }
    if let Some(max) = args.max_expansions {
        config.exploration.max_expansions = Some(max);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log))
        .with_context(|| format!("invalid log filter {:?}", config.log))?;
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let catalog = RulesetCatalog::compute();
    let store = GraphStore::open_with(&config.store.path, config.store_options())
        .with_context(|| format!("opening store {}", config.store.path.display()))?;
    let explorer = Explorer::new(&store, &catalog);

    let seed = explorer.seed(&config.seed_id()?)?;
    info!(
        store = %config.store.path.display(),
        %seed,
        boards = store.total_boards()?,
        pending = store.unexpanded_count()?,
        "Starting exploration"
    );

    let report = explorer.expand_all_with_budget(config.exploration.max_expansions)?;

    println!("Multiverse Exploration Report");
    println!("=============================");
    println!();
    for pass in &report.passes {
        println!(
            "pass {:>4}: {:>8} pending  {:>8} expanded  {:>8} new  {:>6} evicted  {:>6} declined  {:>4} failed",
            pass.pass,
            pass.pending,
            pass.expanded,
            pass.new_boards,
            pass.evictions,
            pass.declined,
            pass.failed
        );
    }
    for failure in &report.failed {
        println!("FAIL {}: {}", failure.id, failure.error);
    }
    println!();
    println!(
        "Expanded {} boards in {} passes; store holds {} boards, {} unexpanded.",
        report.total_expanded(),
        report.passes.len(),
        store.total_boards()?,
        store.unexpanded_count()?
    );
    if report.total_declined() > 0 {
        println!(
            "{} parent links declined by full parent sets.",
            report.total_declined()
        );
    }
    if report.budget_exhausted {
        println!("Stopped at the expansion budget; run again to continue.");
    }

    Ok(())
}
