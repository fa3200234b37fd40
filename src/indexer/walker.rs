//! Package archive walker.
//!
//! # Error Handling Strategy
//!
//! The walker follows a **graceful degradation** approach suitable for
//! batch audit tooling:
//!
//! - **Archive-level errors**: a package with no `jcr_root/` anywhere, or
//!   an unreadable archive, is fatal for that package and propagates as a
//!   [`HarvestError`].
//! - **Record-level errors**: malformed XML, non-decodable bytes, or an
//!   oversized entry skip that one record. Each skip is logged to stderr
//!   and recorded as a [`WalkWarning`] in the returned outcome, so
//!   callers and tests can assert on failure counts instead of scraping
//!   logs. A partial harvest is a normal outcome, not an error state.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use zip::ZipArchive;

use crate::error::HarvestError;
use crate::indexer::assembler::absorb_record;
use crate::models::Harvest;
use crate::parsers::parse_content_record;
use crate::utils::{CONTENT_RECORD_FILE, jcr_root_prefix, logical_path};

/// Maximum decompressed size of a single content record. Entries above
/// this are skipped with a warning rather than buffered.
const MAX_RECORD_BYTES: u64 = 10 * 1024 * 1024;

/// A skipped record: the logical path it would have occupied and why it
/// was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkWarning {
    pub jcr_path: String,
    pub message: String,
}

/// Result of walking one package: the harvest plus every per-record
/// failure encountered along the way.
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub harvest: Harvest,
    pub warnings: Vec<WalkWarning>,
}

/// Walk one AEM package export and build its harvest.
///
/// Entries are processed in lexicographic order of their full entry
/// names, so repeated runs and downstream merges are reproducible. Only
/// entries whose final segment is `.content.xml` under the `jcr_root/`
/// prefix are parsed; everything else is ignored. Logical JCR paths are
/// derived from the entry name strings, never from extracted filesystem
/// paths, so reserved characters like the colon in `jcr:content` are
/// never a problem. Entry bytes are read into one scratch buffer that is
/// reset per entry and released when the walk ends.
///
/// After the last entry, every tag's `asset_count` is recomputed from
/// the assignment list and a summary line is printed.
///
/// # Errors
///
/// Returns [`HarvestError::MissingJcrRoot`] when no entry path contains
/// the `jcr_root` anchor segment, and archive or IO errors when the
/// package itself cannot be read.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use jcr_harvest::walk_package;
///
/// let outcome = walk_package(Path::new("site-content.zip"))?;
/// println!("{} nodes, {} skipped", outcome.harvest.nodes.len(), outcome.warnings.len());
/// # Ok::<(), jcr_harvest::HarvestError>(())
/// ```
pub fn walk_package(package: &Path) -> Result<WalkOutcome, HarvestError> {
    let file = File::open(package)?;
    let mut archive = ZipArchive::new(file)?;

    // Backslash separators appear in archives built by some Windows
    // tools; normalize for path logic but keep the raw name for lookup.
    let mut entries: Vec<(String, String)> =
        archive.file_names().map(|name| (name.replace('\\', "/"), name.to_string())).collect();
    entries.sort();

    let jcr_prefix = entries
        .iter()
        .find_map(|(normalized, _)| jcr_root_prefix(normalized))
        .ok_or_else(|| HarvestError::MissingJcrRoot { package: package.to_path_buf() })?;

    let mut harvest = Harvest::default();
    let mut warnings = Vec::new();
    let mut scratch = Vec::new();

    for (normalized, raw_name) in &entries {
        if !normalized.starts_with(&jcr_prefix) {
            continue;
        }
        if normalized.rsplit('/').next() != Some(CONTENT_RECORD_FILE) {
            continue;
        }
        let jcr_path = logical_path(normalized, &jcr_prefix);

        scratch.clear();
        if let Err(message) = read_entry_bounded(&mut archive, raw_name, &mut scratch) {
            skip(&mut warnings, &jcr_path, message);
            continue;
        }

        match parse_content_record(&scratch, &jcr_path) {
            Ok(Some(record)) => absorb_record(&mut harvest, record),
            Ok(None) => {}
            Err(e) => skip(&mut warnings, &jcr_path, e.to_string()),
        }
    }

    harvest.recount_tag_usage();
    eprintln!(
        "Harvested {}: {} nodes, {} tags, {} namespaces, {} folders ({} records skipped)",
        package.display(),
        harvest.nodes.len(),
        harvest.tags.len(),
        harvest.namespaces.len(),
        harvest.folders.len(),
        warnings.len(),
    );

    Ok(WalkOutcome { harvest, warnings })
}

/// Walk several packages on the rayon pool, one isolated harvest each.
///
/// Outcomes come back in the order the packages were given, which is the
/// order callers must feed them to [`crate::merge_harvests`]: the merge
/// is order-sensitive (later harvests overwrite nodes, earlier harvests
/// win tags), so reproducibility depends on preserving caller order.
pub fn walk_packages(packages: &[PathBuf]) -> Result<Vec<WalkOutcome>, HarvestError> {
    packages.par_iter().map(|package| walk_package(package)).collect()
}

fn read_entry_bounded(
    archive: &mut ZipArchive<File>,
    raw_name: &str,
    scratch: &mut Vec<u8>,
) -> Result<(), String> {
    let entry = archive.by_name(raw_name).map_err(|e| e.to_string())?;
    // Read one byte past the limit so a record of exactly the limit is
    // kept and only genuinely larger entries are rejected.
    entry.take(MAX_RECORD_BYTES + 1).read_to_end(scratch).map_err(|e| e.to_string())?;
    if scratch.len() as u64 > MAX_RECORD_BYTES {
        return Err(format!("record exceeds size limit ({MAX_RECORD_BYTES} bytes)"));
    }
    Ok(())
}

fn skip(warnings: &mut Vec<WalkWarning>, jcr_path: &str, message: String) {
    eprintln!("Warning: skipping {jcr_path}: {message}");
    warnings.push(WalkWarning { jcr_path: jcr_path.to_string(), message });
}
