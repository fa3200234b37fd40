//! Tag id helpers and the ancestor-hierarchy resolver.
//!
//! Tag ids are flat slash-separated strings derived from node paths under
//! the tag-definition root (`/content/cq:tags/wknd/activity/cycling` has
//! the id `wknd/activity/cycling`). Because ids are plain path strings,
//! the hierarchy is acyclic by construction and every ancestor is just a
//! prefix of the id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Tag;

/// Root path prefix under which tag definitions live.
pub const TAG_ROOT: &str = "/content/cq:tags/";

/// Deepest ancestor level reported by [`tag_hierarchy`].
pub const MAX_HIERARCHY_LEVELS: usize = 4;

/// One ancestor level of a tag. Fields are empty strings when the level
/// lies beyond the tag's depth or when the ancestor has no stored
/// title/description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLevel {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Reduce a raw tag path to its tag id by dropping the tag root and any
/// surrounding slashes. Paths that never mention the root (assignments
/// usually carry bare ids like `wknd/activity/cycling`) pass through
/// unchanged apart from slash trimming.
pub fn normalize_tag_path(raw: &str) -> String {
    raw.replace(TAG_ROOT, "").trim_matches('/').to_string()
}

/// Resolve the level 1..=4 ancestor chain of a tag id.
///
/// For each level `k` within the tag's depth, the ancestor id is the
/// first `k` segments of the id rejoined with `/`; title and description
/// come from the lookup, or stay empty when the ancestor was never
/// defined. Levels beyond the tag's depth are entirely empty.
pub fn tag_hierarchy(tag_id: &str, tags: &BTreeMap<String, Tag>) -> Vec<TagLevel> {
    let parts: Vec<&str> = tag_id.split('/').collect();
    (1..=MAX_HIERARCHY_LEVELS)
        .map(|level| {
            if level > parts.len() {
                return TagLevel::default();
            }
            let ancestor_id = parts[..level].join("/");
            let (title, description) = match tags.get(&ancestor_id) {
                Some(tag) => (tag.tag_title.clone(), tag.description.clone()),
                None => (String::new(), String::new()),
            };
            TagLevel { id: ancestor_id, title, description }
        })
        .collect()
}

/// Number of segments in a tag id.
pub fn depth(tag_id: &str) -> usize {
    tag_id.matches('/').count() + 1
}

/// Parent tag id, or empty for a top-level tag.
pub fn parent(tag_id: &str) -> &str {
    tag_id.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Last segment of a tag id.
pub fn label(tag_id: &str) -> &str {
    tag_id.rsplit_once('/').map_or(tag_id, |(_, label)| label)
}
