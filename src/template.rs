//! Document model and template synthesis
//!
//! A generated document is one root node plus fixed metadata, built fully in
//! memory in a single pass and serialized once. Placeholder children per
//! section come from an explicit policy table keyed by the exact section
//! title, so the mapping stays auditable in one place.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::config::{Settings, TemplateStructure};
use crate::errors::{TemplateError, TemplateResult};
use crate::id::{generate_id, now_millis};

/// KityMinder format version understood by the downstream viewer.
pub const FORMAT_VERSION: &str = "1.4.43";

/// Template kind tag carried by every generated document.
pub const TEMPLATE_KIND: &str = "filetree";

/// Section title that stays childless.
pub const CONTEXT_LABEL: &str = "コンテキスト：";
/// Section title that receives two requirement placeholders.
pub const DETAILED_INSTRUCTIONS_LABEL: &str = "詳細指示";
/// Section title that receives the output-format placeholder.
pub const OUTPUT_FORMAT_LABEL: &str = "出力形式";
/// Section title that receives the supplementary-notes placeholder.
pub const SUPPLEMENTARY_NOTES_LABEL: &str = "補足";

/// Placeholder attached to sections with no dedicated policy.
pub const GENERIC_PLACEHOLDER: &str = "詳細をここに記載";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeData {
    pub id: String,
    /// Milliseconds since epoch at node construction
    pub created: i64,
    pub text: String,
}

/// One element of the document tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub data: NodeData,
    pub children: Vec<Node>,
}

impl Node {
    /// Leaf node with a fresh id and creation timestamp.
    fn new(text: impl Into<String>) -> Self {
        Self {
            data: NodeData {
                id: generate_id(),
                created: now_millis(),
                text: text.into(),
            },
            children: Vec::new(),
        }
    }

    /// Node count including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Depth-first pre-order walk, which is generation order.
    pub fn walk(&self, visit: &mut impl FnMut(&Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// One root node plus fixed metadata. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
    pub template: String,
    pub theme: String,
    pub version: String,
}

/// Placeholder children a section receives, keyed by its exact title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildPolicy {
    /// Section stays childless
    Childless,
    /// Fixed placeholder leaves, in order
    Leaves(&'static [&'static str]),
}

/// Section-title policy table. Titles not listed here get one generic
/// placeholder leaf.
const SECTION_POLICIES: &[(&str, ChildPolicy)] = &[
    (CONTEXT_LABEL, ChildPolicy::Childless),
    (
        DETAILED_INSTRUCTIONS_LABEL,
        ChildPolicy::Leaves(&["具体的な要求1", "具体的な要求2"]),
    ),
    (
        OUTPUT_FORMAT_LABEL,
        ChildPolicy::Leaves(&["期待する出力の形式を記載"]),
    ),
    (
        SUPPLEMENTARY_NOTES_LABEL,
        ChildPolicy::Leaves(&["追加の情報や制約条件"]),
    ),
];

fn policy_for(title: &str) -> ChildPolicy {
    SECTION_POLICIES
        .iter()
        .find(|(label, _)| *label == title)
        .map(|(_, policy)| *policy)
        .unwrap_or(ChildPolicy::Leaves(&[GENERIC_PLACEHOLDER]))
}

/// Expand the configured section list into a full document tree.
///
/// Section titles and the root prefix are read through the dotted-key
/// lookup, so a config file missing either key falls back to the compiled
/// structure. Pure given its inputs except for id/timestamp generation.
pub fn build_document(title: &str, config: &Settings) -> Document {
    let structure = TemplateStructure::default();
    let root_prefix: String = config.get_or("template_structure.root_prefix", structure.root_prefix);
    let sections: Vec<String> =
        config.get_or("template_structure.default_children", structure.default_children);

    let mut root = Node::new(format!("{root_prefix}{title}"));
    for section_title in &sections {
        let mut section = Node::new(section_title.clone());
        if let ChildPolicy::Leaves(placeholders) = policy_for(section_title) {
            for text in placeholders {
                section.children.push(Node::new(*text));
            }
        }
        root.children.push(section);
    }
    debug!("built document with {} nodes", root.count());

    Document {
        root,
        template: TEMPLATE_KIND.to_string(),
        theme: config.default_theme.clone(),
        version: FORMAT_VERSION.to_string(),
    }
}

/// Serialize the document to `path`: UTF-8, 4-space pretty indentation,
/// non-ASCII characters emitted literally. Write failure is fatal.
pub fn write_document(document: &Document, path: &Path) -> TemplateResult<()> {
    let write_err = |source: std::io::Error| TemplateError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    buf.push(b'\n');

    std::fs::write(path, buf).map_err(write_err)
}
