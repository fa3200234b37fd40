//! Folds parsed records into a harvest.
//!
//! One call per successfully parsed record; the walker owns the harvest
//! and threads it through. Keyed collections follow the policies of the
//! data model: nodes and properties overwrite (a re-walk is idempotent),
//! namespaces and folders are first-seen-wins, tag assignments are
//! append-only.

use crate::models::{Folder, Harvest, Namespace, Node, ParsedRecord, Property, Tag, TagAssignment};
use crate::tags::{TAG_ROOT, normalize_tag_path};
use crate::utils::{folder_name, folder_path, parent_folder};

/// Sibling property holding a tag definition's display title.
const TAG_TITLE_PROPERTY: &str = "jcr:title";
/// Sibling property holding a tag definition's description.
const TAG_DESCRIPTION_PROPERTY: &str = "jcr:description";

/// Fold one parsed record into the harvest.
pub fn absorb_record(harvest: &mut Harvest, record: ParsedRecord) {
    let jcr_path = record.path;

    harvest.nodes.insert(jcr_path.clone(), Node {
        path: jcr_path.clone(),
        node_type: record.node_type,
        resource_type: record.resource_type,
        template: record.template,
        last_modified: record.last_modified,
        last_modified_by: record.last_modified_by,
    });

    // Group the record's properties by full name, then replace whatever
    // a previous parse of this path stored under each key. The grouped
    // vector keeps every token of a multi-valued attribute; inserting
    // rows one at a time into a single-slot map would keep only the
    // last, and appending across parses would duplicate rows when two
    // entry spellings map to the same logical path.
    let mut grouped: Vec<((String, String), Vec<Property>)> = Vec::new();
    for property in record.properties {
        let key = (jcr_path.clone(), property.full_name.clone());
        let row = Property {
            jcr_path: jcr_path.clone(),
            namespace: property.namespace,
            name: property.name,
            full_name: property.full_name,
            value: property.value,
            is_multi: property.is_multi,
        };
        match grouped.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, rows)) => rows.push(row),
            None => grouped.push((key, vec![row])),
        }
    }
    for (key, rows) in grouped {
        harvest.properties.insert(key, rows);
    }

    for tag_path in record.tags {
        harvest.tag_assignments.push(TagAssignment { jcr_path: jcr_path.clone(), tag_path });
    }

    // First binding of a URI wins; later records may legitimately bind
    // the same URI to another prefix, and that information is dropped.
    for (prefix, uri) in record.namespaces {
        harvest
            .namespaces
            .entry(uri.clone())
            .or_insert_with(|| Namespace { uri, prefix });
    }

    if let Some(folder) = folder_path(&jcr_path) {
        harvest.folders.entry(folder.to_string()).or_insert_with(|| Folder {
            folder_path: folder.to_string(),
            folder_name: folder_name(folder).to_string(),
            depth_level: folder.matches('/').count(),
            parent_folder: parent_folder(folder).to_string(),
        });
    }

    // Tag definitions live under the tag root. Title and description are
    // read back from the properties stored above, so this must stay
    // after property collection.
    if jcr_path.contains(TAG_ROOT) {
        let tag_id = normalize_tag_path(&jcr_path);
        if !tag_id.is_empty() {
            let lookup = |name: &str| {
                harvest
                    .properties
                    .get(&(jcr_path.clone(), name.to_string()))
                    .and_then(|rows| rows.first())
                    .map(|row| row.value.clone())
                    .unwrap_or_default()
            };
            let tag_title = lookup(TAG_TITLE_PROPERTY);
            let description = lookup(TAG_DESCRIPTION_PROPERTY);
            harvest.tags.insert(tag_id.clone(), Tag {
                tag_id,
                tag_title,
                description,
                asset_count: 0,
            });
        }
    }
}
