//! Error types for the harvest pipeline.
//!
//! Only two failure kinds exist in this core:
//!
//! - **Fatal archive errors** ([`HarvestError`]): the package is not an
//!   AEM export (no `jcr_root/` anywhere), or the archive itself cannot
//!   be opened or enumerated. These abort the walk for that package and
//!   propagate to the caller.
//! - **Per-record parse errors**: malformed XML, unreadable bytes, an
//!   oversized entry. These never become a `HarvestError`; the walker
//!   logs them, records a [`crate::indexer::WalkWarning`], skips the
//!   record, and continues. A partial harvest is a normal outcome.
//!
//! Audit and export failures belong to downstream collaborators and have
//! no representation here.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while walking a package archive.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// No entry path contains a `jcr_root` segment, so no logical-path
    /// base exists. The package is not a Package Manager export.
    #[error("no jcr_root/ found in {package} - is this a valid AEM Package Manager export?")]
    MissingJcrRoot { package: PathBuf },

    /// The archive could not be opened or an entry could not be located.
    #[error("failed to read package archive")]
    Zip(#[from] zip::result::ZipError),

    /// Filesystem error opening the package.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
