//! Harvest construction from package archives.
//!
//! # Error Handling Strategy
//!
//! The indexer combines graceful degradation with explicit failure
//! accounting:
//!
//! - **Record-level failures**: parse failures skip the record, are
//!   logged, and surface as [`WalkWarning`] entries in the walk outcome.
//!   This allows partial harvests when some records are corrupted.
//!
//! - **Archive-level failures**: a missing `jcr_root/` anchor or an
//!   unreadable archive aborts that package's walk with a
//!   [`crate::HarvestError`].
//!
//! - **Summary reporting**: each walk prints collection counts and the
//!   number of skipped records, giving users visibility into harvest
//!   completeness.

pub mod assembler;
pub mod merge;
pub mod walker;

pub use assembler::absorb_record;
pub use merge::merge_harvests;
pub use walker::{WalkOutcome, WalkWarning, walk_package, walk_packages};
