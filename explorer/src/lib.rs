//! Expansion driver for the multiverse board graph.
//!
//! [`Explorer`] pulls unexpanded boards from a [`GraphStore`], evolves each
//! under every ruleset of a [`RulesetCatalog`], and records the children and
//! parent back-links. [`Explorer::expand_all`] repeats until no unexpanded
//! board is left, or until an expansion budget runs out.
//!
//! ```
//! use multiverse::{BoardId, RulesetCatalog};
//! use multiverse_explorer::Explorer;
//! use multiverse_store::GraphStore;
//!
//! let store = GraphStore::open_in_memory().unwrap();
//! let catalog = RulesetCatalog::compute();
//! let explorer = Explorer::new(&store, &catalog);
//!
//! let seed = explorer.seed(&BoardId::single_cell()).unwrap();
//! let report = explorer.expand_all_with_budget(Some(3)).unwrap();
//! assert_eq!(report.total_expanded(), 3);
//! assert!(report.budget_exhausted);
//! assert!(store.is_expanded(&seed).unwrap());
//! ```
//!
//! [`GraphStore`]: multiverse_store::GraphStore
//! [`RulesetCatalog`]: multiverse::RulesetCatalog

pub mod config;
pub mod error;
pub mod explorer;
pub mod report;

pub use config::{ConfigError, ExplorationConfig, ExplorerConfig, StoreConfig};
pub use error::ExploreError;
pub use explorer::Explorer;
pub use report::{ExpansionReport, FailedExpansion, NodeExpansion, PassSummary};
