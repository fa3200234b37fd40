use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tags::normalize_tag_path;

/// One repository node, keyed in the harvest by its JCR path.
///
/// Populated from the reserved node-level attributes of a `.content.xml`
/// record (`jcr:primaryType`, `sling:resourceType`, `cq:template`, the
/// last-modified pair). Last write wins, so re-walking the same package
/// is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub path: String,
    pub node_type: Option<String>,
    pub resource_type: Option<String>,
    pub template: Option<String>,
    pub last_modified: Option<String>,
    pub last_modified_by: Option<String>,
}

/// One property value on a node. Multi-valued attributes produce several
/// `Property` rows sharing the same `full_name`, each carrying one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub jcr_path: String,
    pub namespace: String,
    pub name: String,
    pub full_name: String,
    pub value: String,
    pub is_multi: bool,
}

/// One tag applied to a node. Append-only and never deduplicated: usage
/// counts are derived from this list, and two records legitimately assign
/// the same tag twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAssignment {
    pub jcr_path: String,
    pub tag_path: String,
}

/// A namespace binding observed on some record, keyed by URI.
/// First sighting wins; later records binding the same URI to a different
/// prefix do not change the stored prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub uri: String,
    pub prefix: String,
}

/// A content folder derived from a node path by stripping the
/// `jcr:content` subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub folder_path: String,
    pub folder_name: String,
    pub depth_level: usize,
    pub parent_folder: String,
}

/// A tag definition found under `/content/cq:tags/`, keyed by its
/// slash-separated tag id.
///
/// `asset_count` is only meaningful after [`Harvest::recount_tag_usage`];
/// it is never trusted incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: String,
    pub tag_title: String,
    pub description: String,
    pub asset_count: usize,
}

/// The normalized in-memory aggregate produced by walking one or more
/// packages. This is the single source of truth handed to downstream
/// audit and export collaborators, which read and enrich it in place.
///
/// `properties` is keyed by `(jcr_path, full_name)` and holds a list of
/// rows under each key: a multi-valued attribute contributes several
/// distinct values for one name, and a single-slot map would silently
/// keep only the last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Harvest {
    pub nodes: BTreeMap<String, Node>,
    pub properties: BTreeMap<(String, String), Vec<Property>>,
    pub tags: BTreeMap<String, Tag>,
    pub tag_assignments: Vec<TagAssignment>,
    pub namespaces: BTreeMap<String, Namespace>,
    pub folders: BTreeMap<String, Folder>,
}

impl Harvest {
    /// Recompute every tag's `asset_count` from `tag_assignments`.
    ///
    /// Counts are reset to zero first, so calling this after any bulk
    /// mutation (end of a walk, end of a merge) always yields the
    /// authoritative numbers. Assignments to tags with no definition in
    /// `tags` are ignored.
    pub fn recount_tag_usage(&mut self) {
        for tag in self.tags.values_mut() {
            tag.asset_count = 0;
        }
        for assignment in &self.tag_assignments {
            let tag_id = normalize_tag_path(&assignment.tag_path);
            if let Some(tag) = self.tags.get_mut(&tag_id) {
                tag.asset_count += 1;
            }
        }
    }

    /// All property rows in deterministic key order, flattened across
    /// multi-value groups.
    pub fn property_rows(&self) -> impl Iterator<Item = &Property> {
        self.properties.values().flatten()
    }
}
