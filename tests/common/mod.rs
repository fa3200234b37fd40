//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for creating test package archives
pub struct PackageBuilder {
    root: String,
    entries: Vec<(String, Vec<u8>)>,
}

impl PackageBuilder {
    /// Create a new builder whose entries live under `jcr_root/`
    pub fn new() -> Self {
        Self { root: "jcr_root".to_string(), entries: Vec::new() }
    }

    /// Place the content tree under a wrapper directory, the way Package
    /// Manager exports often nest `jcr_root` below the package name
    pub fn with_wrapper(mut self, wrapper: &str) -> Self {
        self.root = format!("{wrapper}/jcr_root");
        self
    }

    /// Add a `.content.xml` record at the given path under the root.
    /// An empty path places the record directly under `jcr_root/`
    pub fn with_record(mut self, path: &str, xml: &str) -> Self {
        let name = if path.is_empty() {
            format!("{}/.content.xml", self.root)
        } else {
            format!("{}/{}/.content.xml", self.root, path)
        };
        self.entries.push((name, xml.as_bytes().to_vec()));
        self
    }

    /// Add an arbitrary entry with raw bytes and a full entry name
    pub fn with_raw_entry(mut self, name: &str, bytes: &[u8]) -> Self {
        self.entries.push((name.to_string(), bytes.to_vec()));
        self
    }

    /// Write the archive to a temp file and return it
    pub fn build(self) -> NamedTempFile {
        let file = NamedTempFile::new().expect("Failed to create temp package");
        let mut zip = ZipWriter::new(file.as_file());
        for (name, bytes) in self.entries {
            zip.start_file(name, SimpleFileOptions::default())
                .expect("Failed to start zip entry");
            zip.write_all(&bytes).expect("Failed to write zip entry");
        }
        zip.finish().expect("Failed to finish zip");
        file
    }
}

/// A minimal page record with the standard namespace declarations
pub fn page_xml(extra_attributes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<jcr:root xmlns:jcr="http://www.jcp.org/jcr/1.0" xmlns:cq="http://www.day.com/jcr/cq/1.0"
    jcr:primaryType="cq:Page" {extra_attributes}/>
"#
    )
}

/// A tag-definition record with a title and description
pub fn tag_xml(title: &str, description: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<jcr:root xmlns:jcr="http://www.jcp.org/jcr/1.0" xmlns:cq="http://www.day.com/jcr/cq/1.0"
    jcr:primaryType="cq:Tag" jcr:title="{title}" jcr:description="{description}"/>
"#
    )
}
