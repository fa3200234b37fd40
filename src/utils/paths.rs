//! Logical-path derivation from archive entry names.
//!
//! JCR paths are synthesized from zip entry name strings, never from
//! extracted filesystem paths: node names like `jcr:content` contain a
//! colon, which several filesystems and archive tools reject. Inside a
//! package export that node is spelled `_jcr_content`, and this module
//! substitutes the logical spelling back in.

/// Path segment marking the repository root inside a package archive.
pub const JCR_ROOT: &str = "jcr_root";

/// Filename identifying a content record; every other entry is ignored.
pub const CONTENT_RECORD_FILE: &str = ".content.xml";

/// Filesystem-safe spelling of the `jcr:content` child node.
pub const JCR_CONTENT_SAFE: &str = "/_jcr_content";

/// Logical spelling of the `jcr:content` child node.
pub const JCR_CONTENT: &str = "/jcr:content";

/// Locate the `jcr_root/` prefix (inclusive, with trailing slash) inside
/// a normalized entry name, if the anchor segment appears at all.
pub fn jcr_root_prefix(entry_name: &str) -> Option<String> {
    let parts: Vec<&str> = entry_name.split('/').collect();
    let idx = parts.iter().position(|segment| *segment == JCR_ROOT)?;
    let mut prefix = parts[..=idx].join("/");
    prefix.push('/');
    Some(prefix)
}

/// Derive the logical JCR path of a record from its entry name.
///
/// Every segment between the `jcr_root/` prefix and the record filename
/// joins with `/`; a record sitting directly under the root maps to `/`.
/// The filesystem-safe `_jcr_content` segment is substituted back to its
/// logical `jcr:content` spelling.
///
/// # Examples
///
/// ```
/// use jcr_harvest::utils::logical_path;
///
/// let path = logical_path("pkg/jcr_root/content/site/_jcr_content/.content.xml", "pkg/jcr_root/");
/// assert_eq!(path, "/content/site/jcr:content");
/// assert_eq!(logical_path("pkg/jcr_root/.content.xml", "pkg/jcr_root/"), "/");
/// ```
pub fn logical_path(entry_name: &str, jcr_prefix: &str) -> String {
    let rel = &entry_name[jcr_prefix.len()..];
    let path = match rel.rsplit_once('/') {
        Some((dir, _file)) => format!("/{dir}"),
        None => String::from("/"),
    };
    path.replace(JCR_CONTENT_SAFE, JCR_CONTENT)
}

/// Derive the folder path of a node by stripping `jcr:content` and
/// everything below it. A path with no `jcr:content` segment is its own
/// folder candidate. Returns `None` for paths that collapse to nothing
/// (a record rooted at `/jcr:content` itself).
pub fn folder_path(jcr_path: &str) -> Option<&str> {
    let folder = match jcr_path.find(JCR_CONTENT) {
        Some(idx) => &jcr_path[..idx],
        None => jcr_path,
    };
    if folder.is_empty() { None } else { Some(folder) }
}

/// Parent of a folder path, or empty when the folder sits at the root.
pub fn parent_folder(folder_path: &str) -> &str {
    let trimmed = folder_path.trim_start_matches('/');
    if trimmed.contains('/') {
        folder_path.rsplit_once('/').map_or("", |(parent, _)| parent)
    } else {
        ""
    }
}

/// Last segment of a folder path.
pub fn folder_name(folder_path: &str) -> &str {
    folder_path.rsplit_once('/').map_or(folder_path, |(_, name)| name)
}
