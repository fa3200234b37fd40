//! Parser for a single `.content.xml` content record.
//!
//! A record is one XML element whose attributes carry all node data.
//! The tricky part is namespace recovery: the `xmlns:` declarations on
//! the root element define the prefix-to-URI bindings the whole harvest
//! depends on, and they are exactly what a naive attribute walk loses
//! once a parser resolves them away. Parsing is therefore two-tier:
//!
//! 1. **Preferred**: a [`NsReader`] event stream, which tracks namespace
//!    scopes as they open. After the root start event, every binding in
//!    scope is read back via [`NsReader::prefixes`].
//! 2. **Fallback**: if the event stream fails (typically non-UTF-8
//!    bytes), the raw bytes are lossily decoded and the root element is
//!    re-read with a plain [`Reader`], harvesting `xmlns:`-prefixed
//!    pseudo-attributes directly. This tier is lower fidelity: it only
//!    sees bindings that survive as literal attributes, and it cannot
//!    see the default (unprefixed) declaration.
//!
//! Attribute values may be string-encoded multi-values (`[a,b,c]`);
//! these are split into one property per token. Values containing a
//! literal comma inside a single logical item are a known limitation of
//! that encoding and are split anyway.

use quick_xml::events::Event;
use quick_xml::name::PrefixDeclaration;
use quick_xml::reader::{NsReader, Reader};

use crate::models::{ParsedRecord, RecordProperty};

/// Node-level attribute: primary node type.
pub const ATTR_PRIMARY_TYPE: &str = "jcr:primaryType";
/// Node-level attribute: sling resource type.
pub const ATTR_RESOURCE_TYPE: &str = "sling:resourceType";
/// Node-level attribute: page template.
pub const ATTR_TEMPLATE: &str = "cq:template";
/// Node-level attribute spellings for the last-modified timestamp.
pub const ATTR_LAST_MODIFIED: [&str; 2] = ["jcr:lastModified", "cq:lastModified"];
/// Node-level attribute spellings for the last-modified author.
pub const ATTR_LAST_MODIFIED_BY: [&str; 2] = ["jcr:lastModifiedBy", "cq:lastModifiedBy"];
/// Attributes whose values are tag assignments rather than properties.
pub const ATTR_TAGS: [&str; 2] = ["cq:tags", "sling:tags"];

/// Root element of a record as raw string pairs, shared by both tiers.
struct RawRoot {
    /// `(prefix, uri)` bindings in declaration order. The default
    /// declaration is recorded with an empty prefix.
    namespaces: Vec<(String, String)>,
    attributes: Vec<(String, String)>,
}

/// Parse one content record into a [`ParsedRecord`].
///
/// Returns `Ok(None)` when no root element exists (an empty or
/// element-free document); the caller skips such records silently.
/// Returns `Err` only when both parsing tiers fail, which the walker
/// treats as a recoverable per-record failure.
pub fn parse_content_record(
    bytes: &[u8],
    jcr_path: &str,
) -> Result<Option<ParsedRecord>, quick_xml::Error> {
    let root = match read_root_with_scopes(bytes) {
        Ok(root) => root,
        Err(_) => read_root_lossy(bytes)?,
    };
    let Some(root) = root else {
        return Ok(None);
    };

    let mut record = ParsedRecord {
        path: jcr_path.to_string(),
        namespaces: root.namespaces,
        ..ParsedRecord::default()
    };

    for (key, value) in root.attributes {
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let full_name = expanded_name_to_prefixed(&key, &record.namespaces);

        // Node-level fields are matched before multi-value decoding and
        // are not repeated as generic properties.
        if full_name == ATTR_PRIMARY_TYPE {
            record.node_type = Some(value);
            continue;
        }
        if full_name == ATTR_RESOURCE_TYPE {
            record.resource_type = Some(value);
            continue;
        }
        if full_name == ATTR_TEMPLATE {
            record.template = Some(value);
            continue;
        }
        if ATTR_LAST_MODIFIED.contains(&full_name.as_str()) {
            record.last_modified = Some(value);
            continue;
        }
        if ATTR_LAST_MODIFIED_BY.contains(&full_name.as_str()) {
            record.last_modified_by = Some(value);
            continue;
        }

        let (is_multi, values) = match decode_multi_value(&value) {
            Some(tokens) => (true, tokens),
            None => (false, vec![value]),
        };

        if ATTR_TAGS.contains(&full_name.as_str()) {
            record.tags.extend(values);
            continue;
        }

        let (namespace, name) = match full_name.split_once(':') {
            Some((namespace, local)) => (namespace.to_string(), local.to_string()),
            None => (String::new(), full_name.clone()),
        };
        for value in values {
            record.properties.push(RecordProperty {
                namespace: namespace.clone(),
                name: name.clone(),
                full_name: full_name.clone(),
                value,
                is_multi,
            });
        }
    }

    Ok(Some(record))
}

/// Preferred tier: read up to the root element with a namespace-aware
/// event stream and capture every binding in scope at that point.
fn read_root_with_scopes(bytes: &[u8]) -> Result<Option<RawRoot>, quick_xml::Error> {
    let mut reader = NsReader::from_reader(bytes);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) | Event::Empty(element) => {
                let mut namespaces = Vec::new();
                for (declaration, uri) in reader.prefixes() {
                    let prefix = match declaration {
                        PrefixDeclaration::Named(name) => {
                            String::from_utf8_lossy(name).into_owned()
                        }
                        PrefixDeclaration::Default => String::new(),
                    };
                    // The xml/xmlns prefixes are built in, not declared
                    // by the record.
                    if prefix == "xml" || prefix == "xmlns" {
                        continue;
                    }
                    namespaces
                        .push((prefix, String::from_utf8_lossy(uri.into_inner()).into_owned()));
                }
                let mut attributes = Vec::new();
                for attribute in element.attributes() {
                    let attribute = attribute?;
                    attributes.push((
                        String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
                        attribute.unescape_value()?.into_owned(),
                    ));
                }
                return Ok(Some(RawRoot { namespaces, attributes }));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// Fallback tier: lossily decode the bytes and re-read the root element
/// with a plain reader, collecting `xmlns:` pseudo-attributes as the
/// binding table.
fn read_root_lossy(bytes: &[u8]) -> Result<Option<RawRoot>, quick_xml::Error> {
    let text = String::from_utf8_lossy(bytes);
    let mut reader = Reader::from_str(&text);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                let mut namespaces = Vec::new();
                let mut attributes = Vec::new();
                for attribute in element.attributes() {
                    let attribute = attribute?;
                    let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                    let value = attribute.unescape_value()?.into_owned();
                    if let Some(prefix) = key.strip_prefix("xmlns:") {
                        namespaces.push((prefix.to_string(), value.clone()));
                    }
                    attributes.push((key, value));
                }
                return Ok(Some(RawRoot { namespaces, attributes }));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Convert an expanded name (`{uri}local`) to `prefix:local` using the
/// captured binding table. Degrades to the bare local name when no
/// prefix maps to the URI; non-expanded names pass through unchanged.
fn expanded_name_to_prefixed(name: &str, namespaces: &[(String, String)]) -> String {
    let Some(rest) = name.strip_prefix('{') else {
        return name.to_string();
    };
    let Some((uri, local)) = rest.split_once('}') else {
        return name.to_string();
    };
    match namespaces.iter().find(|(prefix, bound)| bound == uri && !prefix.is_empty()) {
        Some((prefix, _)) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

/// Decode the bracket-and-comma multi-value encoding.
///
/// Returns `Some(tokens)` only when the entire value is wrapped in
/// `[` `]` with a non-empty interior: tokens are comma-split, trimmed,
/// and empty tokens dropped (so a multi-value of blanks decodes to zero
/// tokens). Anything else is single-valued, including the literal `[]`.
fn decode_multi_value(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.split(',').map(str::trim).filter(|token| !token.is_empty()).map(String::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<jcr:root xmlns:jcr="http://www.jcp.org/jcr/1.0" xmlns:cq="http://www.day.com/jcr/cq/1.0"
    jcr:primaryType="cq:Page"
    jcr:title="Home"
    cq:template="/conf/site/settings/wcm/templates/homepage"
    cq:tags="[wknd/activity/cycling,properties:orientation/landscape]"/>
"#;

    fn parse(bytes: &[u8]) -> ParsedRecord {
        parse_content_record(bytes, "/content/site/en").unwrap().unwrap()
    }

    #[test]
    fn node_fields_are_routed_out_of_properties() {
        let record = parse(PAGE_XML);
        assert_eq!(record.path, "/content/site/en");
        assert_eq!(record.node_type.as_deref(), Some("cq:Page"));
        assert_eq!(record.template.as_deref(), Some("/conf/site/settings/wcm/templates/homepage"));
        assert_eq!(record.resource_type, None);
        let names: Vec<&str> = record.properties.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, ["jcr:title"]);
    }

    #[test]
    fn namespace_bindings_are_captured_from_scope_events() {
        let record = parse(PAGE_XML);
        assert!(
            record
                .namespaces
                .contains(&("jcr".to_string(), "http://www.jcp.org/jcr/1.0".to_string()))
        );
        assert!(
            record
                .namespaces
                .contains(&("cq".to_string(), "http://www.day.com/jcr/cq/1.0".to_string()))
        );
    }

    #[test]
    fn xmlns_declarations_are_not_properties() {
        let record = parse(PAGE_XML);
        assert!(record.properties.iter().all(|p| !p.full_name.starts_with("xmlns")));
    }

    #[test]
    fn tag_attributes_become_assignments_not_properties() {
        let record = parse(PAGE_XML);
        assert_eq!(record.tags, ["wknd/activity/cycling", "properties:orientation/landscape"]);
    }

    #[test]
    fn multi_value_splits_trims_and_drops_empty_tokens() {
        let xml = br#"<jcr:root keywords="[a, b ,c,,]"/>"#;
        let record = parse(xml);
        assert_eq!(record.properties.len(), 3);
        let values: Vec<&str> = record.properties.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, ["a", "b", "c"]);
        assert!(record.properties.iter().all(|p| p.is_multi));
        assert!(record.properties.iter().all(|p| p.full_name == "keywords"));
    }

    #[test]
    fn empty_brackets_stay_single_valued() {
        let xml = br#"<jcr:root empty="[]"/>"#;
        let record = parse(xml);
        assert_eq!(record.properties.len(), 1);
        assert_eq!(record.properties[0].value, "[]");
        assert!(!record.properties[0].is_multi);
    }

    #[test]
    fn blank_tokens_decode_to_no_properties() {
        let xml = br#"<jcr:root blank="[ , ]"/>"#;
        let record = parse(xml);
        assert!(record.properties.is_empty());
    }

    #[test]
    fn property_name_splits_into_namespace_and_local() {
        let xml = br#"<jcr:root xmlns:dc="http://purl.org/dc/elements/1.1/" dc:creator="alice" plain="1"/>"#;
        let record = parse(xml);
        let creator = record.properties.iter().find(|p| p.full_name == "dc:creator").unwrap();
        assert_eq!(creator.namespace, "dc");
        assert_eq!(creator.name, "creator");
        let plain = record.properties.iter().find(|p| p.full_name == "plain").unwrap();
        assert_eq!(plain.namespace, "");
        assert_eq!(plain.name, "plain");
    }

    #[test]
    fn expanded_names_convert_via_binding_table() {
        let bindings = vec![("jcr".to_string(), "http://www.jcp.org/jcr/1.0".to_string())];
        assert_eq!(
            expanded_name_to_prefixed("{http://www.jcp.org/jcr/1.0}title", &bindings),
            "jcr:title"
        );
        assert_eq!(expanded_name_to_prefixed("{http://unknown/}title", &bindings), "title");
        assert_eq!(expanded_name_to_prefixed("jcr:title", &bindings), "jcr:title");
    }

    #[test]
    fn empty_document_yields_none() {
        assert_eq!(parse_content_record(b"", "/x").unwrap(), None);
        assert_eq!(parse_content_record(b"<?xml version=\"1.0\"?>", "/x").unwrap(), None);
    }

    #[test]
    fn non_utf8_bytes_fall_back_to_lossy_reparse() {
        // 0xFF is invalid UTF-8; the event-stream tier rejects it and the
        // lossy tier substitutes U+FFFD.
        let mut xml = Vec::new();
        xml.extend_from_slice(br#"<jcr:root xmlns:jcr="http://www.jcp.org/jcr/1.0" jcr:title=""#);
        xml.push(0xFF);
        xml.extend_from_slice(br#"" jcr:primaryType="nt:unstructured"/>"#);

        let record = parse_content_record(&xml, "/x").unwrap().unwrap();
        assert_eq!(record.node_type.as_deref(), Some("nt:unstructured"));
        assert_eq!(record.properties.len(), 1);
        assert_eq!(record.properties[0].value, "\u{FFFD}");
        // The binding survives as a literal attribute, so even the
        // fallback tier sees it.
        assert!(
            record
                .namespaces
                .contains(&("jcr".to_string(), "http://www.jcp.org/jcr/1.0".to_string()))
        );
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_content_record(b"<jcr:root unterminated=\"", "/x").is_err());
    }
}
