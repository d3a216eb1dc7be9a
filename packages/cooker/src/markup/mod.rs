//! Markup tree providers and helpers for navigating them.
//!
//! The extraction engine never depends on a concrete tree type. It works on
//! anything implementing [`MarkupNode`]: a tag name, ordered direct children
//! and a flattened text accessor. Two providers ship with the crate:
//!
//! - [`tree`]: a tolerant tag-tree builder for the pseudo-markup format
//! - [`xml`]: an adapter over `roxmltree` for well-formed XML input

pub mod preprocess;
pub mod tree;
pub mod xml;

pub use preprocess::{fold_tag_whitespace, preprocess, strip_comment_lines};
pub use tree::{MarkupTree, TreeNode};
pub use xml::{wrap_document, XmlNode, XML_DOCUMENT_TAG};

/// Read-only view of a node in a parsed markup tree.
///
/// Text nodes are nodes too: they have no tag name and no children, and
/// their text is their content. Element nodes list both element and text
/// children, in document order.
pub trait MarkupNode: Copy {
    /// Tag name of an element, or `None` for a text node.
    fn tag_name(&self) -> Option<&str>;

    /// Direct children (elements and text) in document order.
    fn children(&self) -> Vec<Self>;

    /// Concatenated text of all descendants, whitespace preserved.
    fn text(&self) -> String;
}

/// Which tree provider parses the preprocessed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TreeProvider {
    /// Tolerant tag-tree builder (stray `<`/`>` and unclosed tags allowed).
    #[default]
    Lenient,
    /// Strict XML via roxmltree.
    Xml,
}

/// Check if a node is an element.
pub fn is_element<N: MarkupNode>(node: N) -> bool {
    node.tag_name().is_some()
}

/// Get all element children of a node.
///
/// # Arguments
/// * `node` - Parent node
///
/// # Returns
/// Element children in document order (text nodes excluded)
pub fn element_children<N: MarkupNode>(node: N) -> Vec<N> {
    node.children().into_iter().filter(|c| is_element(*c)).collect()
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
pub fn find_child<N: MarkupNode>(node: N, tag: &str) -> Option<N> {
    node.children()
        .into_iter()
        .find(|child| child.tag_name() == Some(tag))
}

/// Find all child elements with the given tag name.
pub fn find_children<N: MarkupNode>(node: N, tag: &str) -> Vec<N> {
    node.children()
        .into_iter()
        .filter(|child| child.tag_name() == Some(tag))
        .collect()
}
