//! Strict XML tree provider backed by roxmltree.
//!
//! Source files hold many top-level records, so the text is wrapped in a
//! synthetic `<document>` element before parsing; records then appear as
//! its direct children, exactly like under the lenient provider's root.
//! Tag names are taken as written (XML is case-sensitive) and namespace
//! prefixes are dropped.

use roxmltree::Node;

use super::MarkupNode;

/// Tag name of the synthetic wrapper element.
pub const XML_DOCUMENT_TAG: &str = "document";

/// Wrap source text in the synthetic document element.
///
/// # Examples
/// ```
/// use markup_cooker::markup::wrap_document;
///
/// assert_eq!(wrap_document("<a/><b/>"), "<document><a/><b/></document>");
/// ```
#[must_use]
pub fn wrap_document(text: &str) -> String {
    format!("<{XML_DOCUMENT_TAG}>{text}</{XML_DOCUMENT_TAG}>")
}

/// [`MarkupNode`] view over a roxmltree node.
///
/// Only element and text nodes are exposed; comments and processing
/// instructions are invisible to the extraction engine.
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a, 'input>(Node<'a, 'input>);

impl<'a, 'input> XmlNode<'a, 'input> {
    /// Wrap a roxmltree node.
    #[must_use]
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self(node)
    }
}

impl MarkupNode for XmlNode<'_, '_> {
    fn tag_name(&self) -> Option<&str> {
        self.0.is_element().then(|| self.0.tag_name().name())
    }

    fn children(&self) -> Vec<Self> {
        self.0
            .children()
            .filter(|child| child.is_element() || child.is_text())
            .map(XmlNode)
            .collect()
    }

    fn text(&self) -> String {
        if self.0.is_text() {
            return self.0.text().unwrap_or_default().to_string();
        }
        self.0
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }
}
