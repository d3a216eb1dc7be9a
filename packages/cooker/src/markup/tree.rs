//! Tolerant tag-tree builder for the pseudo-markup format.
//!
//! The source format is tag-structured but not XML: leaf text freely uses
//! `<` and `>` (e.g. `[<20100101]`), records are not wrapped in a single
//! root, and end tags are sometimes missing. Tokenization is delegated to
//! the html5ever tokenizer, so `<` only opens a tag when followed by a
//! letter (or `/` and a letter), tag names are ASCII-lowercased, attributes
//! are dropped and character references are decoded. The tree is then
//! built with a plain stack of open elements rather than the HTML5
//! insertion modes:
//!
//! - an end tag closes the nearest open element of that name, together with
//!   every element opened after it; unmatched end tags are ignored
//! - elements still open at end of input are closed implicitly
//! - adjacent text is merged into one text node

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use super::MarkupNode;

/// Tag name of the synthetic document root.
pub const DOCUMENT_TAG: &str = "[document]";

/// Index of a node in the tree's arena.
type NodeId = usize;

const ROOT_ID: NodeId = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeData {
    Element { name: String, children: Vec<NodeId> },
    Text(String),
}

/// A parsed markup document.
///
/// Nodes live in an arena owned by the tree; [`TreeNode`] is a cheap,
/// copyable handle into it.
#[derive(Debug, Clone)]
pub struct MarkupTree {
    nodes: Vec<NodeData>,
}

/// Handle to a node of a [`MarkupTree`].
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    tree: &'a MarkupTree,
    id: NodeId,
}

impl MarkupTree {
    /// Parse text into a tree. Never fails: malformed markup degrades to text
    /// or to implicitly closed elements.
    ///
    /// # Examples
    /// ```
    /// use markup_cooker::markup::{find_child, MarkupNode, MarkupTree};
    ///
    /// let tree = MarkupTree::parse("<Country><code>NL</code></Country>");
    /// let country = find_child(tree.root(), "country").unwrap();
    /// assert_eq!(country.text(), "NL");
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let sink = ArenaTokenSink {
            builder: RefCell::new(TreeBuilder::new()),
        };
        let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

        if !input.is_empty() {
            let queue = BufferQueue::default();
            queue.push_back(StrTendril::from_slice(input));
            let _ = tokenizer.feed(&queue);
        }
        tokenizer.end();

        tokenizer.sink.builder.into_inner().finish()
    }

    /// The synthetic document root. Top-level markup are its children.
    #[must_use]
    pub fn root(&self) -> TreeNode<'_> {
        TreeNode {
            tree: self,
            id: ROOT_ID,
        }
    }

    /// Number of nodes (elements and text) including the document root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree only holds the document root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

impl<'a> TreeNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id]
    }

    fn collect_text(&self, out: &mut String) {
        match self.data() {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { children, .. } => {
                for &child in children {
                    TreeNode {
                        tree: self.tree,
                        id: child,
                    }
                    .collect_text(out);
                }
            }
        }
    }
}

impl MarkupNode for TreeNode<'_> {
    fn tag_name(&self) -> Option<&str> {
        match self.data() {
            NodeData::Element { name, .. } => Some(name),
            NodeData::Text(_) => None,
        }
    }

    fn children(&self) -> Vec<Self> {
        match self.data() {
            NodeData::Element { children, .. } => children
                .iter()
                .map(|&id| TreeNode {
                    tree: self.tree,
                    id,
                })
                .collect(),
            NodeData::Text(_) => Vec::new(),
        }
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }
}

/// Incremental arena builder keeping the stack of open elements.
struct TreeBuilder {
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
    pending_text: String,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            nodes: vec![NodeData::Element {
                name: DOCUMENT_TAG.to_string(),
                children: Vec::new(),
            }],
            open: vec![ROOT_ID],
            pending_text: String::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        self.pending_text.push_str(text);
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(ROOT_ID)
    }

    fn append_child(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(data);
        let parent = self.current();
        if let NodeData::Element { children, .. } = &mut self.nodes[parent] {
            children.push(id);
        }
        id
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        self.append_child(NodeData::Text(text));
    }

    fn open(&mut self, name: String, self_closing: bool) {
        self.flush_text();
        let id = self.append_child(NodeData::Element {
            name,
            children: Vec::new(),
        });
        if !self_closing {
            self.open.push(id);
        }
    }

    fn close(&mut self, name: &str) {
        // Never close the document root
        let position = self.open.iter().skip(1).rposition(|&id| {
            matches!(&self.nodes[id], NodeData::Element { name: n, .. } if n == name)
        });
        if let Some(index) = position {
            self.flush_text();
            self.open.truncate(index + 1);
        }
    }

    fn finish(mut self) -> MarkupTree {
        self.flush_text();
        MarkupTree { nodes: self.nodes }
    }
}

/// Token sink feeding html5ever tokens into a [`TreeBuilder`].
///
/// html5ever sinks take `&self`, hence the `RefCell`.
struct ArenaTokenSink {
    builder: RefCell<TreeBuilder>,
}

impl TokenSink for ArenaTokenSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut builder = self.builder.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => builder.open(tag.name.to_string(), tag.self_closing),
                TagKind::EndTag => builder.close(&tag.name),
            },
            Token::CharacterTokens(text) => builder.push_text(&text),
            Token::NullCharacterToken => builder.push_text("\0"),
            // Comments, doctypes and parse errors carry no content
            _ => {}
        }
        TokenSinkResult::Continue
    }
}
