//! Combining independently built harvests.

use crate::models::{Harvest, Tag};

/// Merge harvests in the given order into one.
///
/// Nodes, properties, namespaces, and folders union by key with the
/// *later* harvest winning collisions. Tags union by id with the
/// *earlier* harvest's title and description winning, and their
/// `asset_count` is always reset before recombination. Assignment lists
/// concatenate verbatim in input order and are never deduplicated:
/// duplicates across packages are independent source records, not the
/// same fact twice.
///
/// After concatenation every tag's `asset_count` is recomputed from the
/// merged assignment list. Summing pre-merge per-harvest counts would
/// miscount, so the per-harvest numbers are discarded entirely.
pub fn merge_harvests<I>(harvests: I) -> Harvest
where
    I: IntoIterator<Item = Harvest>,
{
    let mut merged = Harvest::default();
    for harvest in harvests {
        merged.nodes.extend(harvest.nodes);
        merged.properties.extend(harvest.properties);
        merged.namespaces.extend(harvest.namespaces);
        merged.folders.extend(harvest.folders);
        for (tag_id, tag) in harvest.tags {
            merged.tags.entry(tag_id).or_insert(Tag { asset_count: 0, ..tag });
        }
        merged.tag_assignments.extend(harvest.tag_assignments);
    }
    merged.recount_tag_usage();
    merged
}
