//! XML parsers for content records.
//!
//! # Error Handling Strategy
//!
//! Record parsing is fallible at two levels, and both are recoverable
//! from the pipeline's point of view:
//!
//! - **Tier fallback**: the namespace-aware event stream is preferred;
//!   when it fails (most commonly on non-UTF-8 bytes) the record is
//!   lossily re-read and `xmlns:` bindings recovered from literal
//!   attributes. The fallback is lower fidelity but keeps real-world
//!   exports flowing.
//!
//! - **Total failure**: when both tiers fail, the error propagates to
//!   the walker, which logs it, records a warning, and continues with
//!   the next record. A single broken record never aborts a walk.

pub mod record;

pub use record::parse_content_record;
