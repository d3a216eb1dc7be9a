//! Leaf/branch classification of field subtrees.
//!
//! The source format has no schema saying which tags hold text and which
//! hold further fields. The rule is structural: a node with exactly one
//! direct child (usually its bare text) is a leaf, anything else is a branch.

use crate::diagnostics::DiagnosticSink;
use crate::extract::Extractor;
use crate::markup::{element_children, MarkupNode};
use crate::types::{FieldMap, FieldValue};

/// Classification of a node for processing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Exactly one direct child: its text is extracted.
    Leaf,
    /// Zero or several direct children: recurse per child tag.
    Branch,
}

impl NodeKind {
    /// Classify by direct child count alone.
    ///
    /// # Examples
    /// ```
    /// use markup_cooker::classify::NodeKind;
    ///
    /// assert_eq!(NodeKind::from_child_count(1), NodeKind::Leaf);
    /// assert_eq!(NodeKind::from_child_count(0), NodeKind::Branch);
    /// assert_eq!(NodeKind::from_child_count(3), NodeKind::Branch);
    /// ```
    #[must_use]
    pub fn from_child_count(count: usize) -> Self {
        if count == 1 {
            Self::Leaf
        } else {
            Self::Branch
        }
    }
}

/// Classify a node. Text children count like element children.
pub fn classify<N: MarkupNode>(node: N) -> NodeKind {
    NodeKind::from_child_count(node.children().len())
}

/// Build the value of a field subtree.
///
/// Leaves are handed to the extractor. Branches map each distinct child tag
/// name to the value of the last child with that name, kept at the position
/// of the first one. A node without children is an empty branch.
///
/// # Arguments
/// * `node` - Root of the field subtree
/// * `extractor` - Line extractor for leaves
/// * `sink` - Receiver for extraction diagnostics
pub fn build_field<N: MarkupNode>(
    node: N,
    extractor: &Extractor,
    sink: &mut dyn DiagnosticSink,
) -> FieldValue {
    match classify(node) {
        NodeKind::Leaf => FieldValue::Leaf(extractor.extract(&node.text(), sink)),
        NodeKind::Branch => {
            let mut fields = FieldMap::new();
            for child in element_children(node) {
                let Some(tag) = child.tag_name() else {
                    continue;
                };
                let value = build_field(child, extractor, sink);
                fields.insert(tag.to_string(), value);
            }
            FieldValue::Branch(fields)
        }
    }
}
