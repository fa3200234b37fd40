//! Data models for the package harvest.
//!
//! This module defines the data structures used throughout the pipeline:
//!
//! - [`Harvest`] - The aggregate of all entity collections built from a walk
//! - [`Node`], [`Property`], [`TagAssignment`], [`Namespace`], [`Folder`],
//!   [`Tag`] - The six entity kinds keyed inside a harvest
//! - [`ParsedRecord`] - The intermediate result of parsing one record,
//!   before it is folded into a harvest
//!
//! Entity types derive serde traits so a harvest can be exported as JSON;
//! the harvest itself is a plain owned value threaded explicitly through
//! walk, merge, and downstream audit calls.

pub mod harvest;
pub mod record;

pub use harvest::{Folder, Harvest, Namespace, Node, Property, Tag, TagAssignment};
pub use record::{ParsedRecord, RecordProperty};
