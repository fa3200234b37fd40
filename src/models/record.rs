use serde::{Deserialize, Serialize};

/// One property parsed from a record, before the assembler attaches it to
/// a node path. Multi-valued attributes yield one `RecordProperty` per
/// token, all sharing `full_name` with `is_multi` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordProperty {
    pub namespace: String,
    pub name: String,
    pub full_name: String,
    pub value: String,
    pub is_multi: bool,
}

/// The structured result of parsing one `.content.xml` record.
///
/// Node-level attributes (`jcr:primaryType` and friends) land in the
/// dedicated fields and are not repeated in `properties`; tag-assignment
/// attributes land in `tags`. `namespaces` holds `(prefix, uri)` bindings
/// in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub path: String,
    pub node_type: Option<String>,
    pub resource_type: Option<String>,
    pub template: Option<String>,
    pub last_modified: Option<String>,
    pub last_modified_by: Option<String>,
    pub namespaces: Vec<(String, String)>,
    pub properties: Vec<RecordProperty>,
    pub tags: Vec<String>,
}
