//! jcr-harvest - Harvest AEM content package exports into a metadata graph
//!
//! This library ingests AEM Package Manager `.zip` exports and builds a
//! normalized, queryable in-memory entity graph - the *harvest*. It
//! supports:
//!
//! - Walking a package's `jcr_root/` tree and parsing every
//!   `.content.xml` record
//! - Namespace-prefix recovery from records where naive attribute
//!   parsing would lose the `xmlns:` declarations
//! - Multi-value attribute decoding, tag-path extraction, and folder
//!   derivation from archive entry names
//! - Deterministic merging of harvests built from several packages
//! - Ancestor-chain resolution for hierarchical tag ids
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use jcr_harvest::walk_package;
//!
//! let outcome = walk_package(Path::new("site-content.zip"))?;
//! println!(
//!     "Harvested {} nodes and {} tags",
//!     outcome.harvest.nodes.len(),
//!     outcome.harvest.tags.len()
//! );
//! # Ok::<(), jcr_harvest::HarvestError>(())
//! ```

pub mod cli;
pub mod error;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod tags;
pub mod utils;

// Re-export commonly used types
pub use error::HarvestError;
pub use indexer::merge::merge_harvests;
pub use indexer::walker::{WalkOutcome, WalkWarning, walk_package, walk_packages};
pub use models::Harvest;
pub use parsers::record::parse_content_record;
pub use tags::{TagLevel, tag_hierarchy};
