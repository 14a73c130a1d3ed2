//! Document tree
//!
//! This module defines the parsed Markdown document model consumed by the
//! renderers. Nodes live in an arena owned by [`Document`] and are addressed
//! by [`NodeId`] handles, so parent and sibling links never own anything.

/// Handle to a node inside a [`Document`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListType {
    /// Bulleted list (`*`, `-`, `+`)
    #[default]
    Bullet,
    /// Numbered list
    Ordered,
}

/// List attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListData {
    pub list_type: ListType,
    /// First number of an ordered list (ignored for bullet lists)
    pub start: u64,
    pub tight: bool,
}

impl ListData {
    pub fn bullet() -> Self {
        Self {
            list_type: ListType::Bullet,
            start: 1,
            tight: true,
        }
    }

    pub fn ordered(start: u64) -> Self {
        Self {
            list_type: ListType::Ordered,
            start,
            tight: true,
        }
    }
}

/// The variant-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// Root document container
    Document,

    /// Block quote containing nested blocks
    BlockQuote,

    /// List (ordered or bulleted); children are items
    List(ListData),

    /// List item containing blocks
    Item,

    /// Heading with level (1-6)
    Heading { level: u8 },

    /// Fenced or indented code block
    CodeBlock { info: String, literal: String },

    /// Raw HTML block
    HtmlBlock(String),

    /// Block with caller-supplied output on enter and exit
    CustomBlock { on_enter: String, on_exit: String },

    /// Thematic break (horizontal rule)
    ThematicBreak,

    /// Paragraph containing inline content
    Paragraph,

    /// Plain text
    Text(String),

    /// Hard line break
    LineBreak,

    /// Soft line break
    SoftBreak,

    /// Inline code
    Code(String),

    /// Raw HTML inline
    HtmlInline(String),

    /// Inline with caller-supplied output on enter and exit
    CustomInline { on_enter: String, on_exit: String },

    /// Emphasis (italic)
    Emph,

    /// Strong emphasis (bold)
    Strong,

    /// Link; children are the link text
    Link { url: String, title: String },

    /// Image; children are the alt text
    Image { url: String, title: String },
}

impl NodeValue {
    pub fn text(text: impl Into<String>) -> Self {
        NodeValue::Text(text.into())
    }

    pub fn code(code: impl Into<String>) -> Self {
        NodeValue::Code(code.into())
    }

    pub fn code_block(info: impl Into<String>, literal: impl Into<String>) -> Self {
        NodeValue::CodeBlock {
            info: info.into(),
            literal: literal.into(),
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        NodeValue::Link {
            url: url.into(),
            title: String::new(),
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        NodeValue::Image {
            url: url.into(),
            title: String::new(),
        }
    }

    /// Nodes that never have children
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeValue::CodeBlock { .. }
                | NodeValue::HtmlBlock(_)
                | NodeValue::ThematicBreak
                | NodeValue::Text(_)
                | NodeValue::LineBreak
                | NodeValue::SoftBreak
                | NodeValue::Code(_)
                | NodeValue::HtmlInline(_)
        )
    }

    /// Check if this is a block-level node
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeValue::Document
                | NodeValue::BlockQuote
                | NodeValue::List(_)
                | NodeValue::Item
                | NodeValue::Heading { .. }
                | NodeValue::CodeBlock { .. }
                | NodeValue::HtmlBlock(_)
                | NodeValue::CustomBlock { .. }
                | NodeValue::ThematicBreak
                | NodeValue::Paragraph
        )
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    value: NodeValue,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
}

/// A parsed document: an arena of nodes rooted at a `Document` node
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create a document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                value: NodeValue::Document,
                parent: None,
                prev: None,
                next: None,
                first_child: None,
                last_child: None,
            }],
        }
    }

    /// The root `Document` node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_child(self.root()).is_none()
    }

    /// Append a new last child to `parent` and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is a leaf or `value` is a `Document`; either would
    /// break the tree shape every renderer relies on.
    pub fn append(&mut self, parent: NodeId, value: NodeValue) -> NodeId {
        assert!(
            !self.nodes[parent.index()].value.is_leaf(),
            "cannot append a child to leaf node {:?}",
            self.nodes[parent.index()].value
        );
        assert!(
            value != NodeValue::Document,
            "a document node can only be the root"
        );

        let id = NodeId(self.nodes.len() as u32);
        let prev = self.nodes[parent.index()].last_child;

        self.nodes.push(NodeData {
            value,
            parent: Some(parent),
            prev,
            next: None,
            first_child: None,
            last_child: None,
        });

        match prev {
            Some(prev) => self.nodes[prev.index()].next = Some(id),
            None => self.nodes[parent.index()].first_child = Some(id),
        }
        self.nodes[parent.index()].last_child = Some(id);

        id
    }

    /// Borrow a read-only view of a node
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    /// Mutable access to a node's payload, for builders extending literals
    pub fn value_mut(&mut self, id: NodeId) -> &mut NodeValue {
        &mut self.nodes[id.index()].value
    }

    pub fn value(&self, id: NodeId) -> &NodeValue {
        &self.nodes[id.index()].value
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].prev
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].next
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].last_child
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A borrowed node with navigation back into its document
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a NodeValue {
        self.doc.value(self.id)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc.parent(self.id).map(|id| self.doc.node(id))
    }

    pub fn prev(&self) -> Option<NodeRef<'a>> {
        self.doc.prev(self.id).map(|id| self.doc.node(id))
    }

    pub fn next(&self) -> Option<NodeRef<'a>> {
        self.doc.next(self.id).map(|id| self.doc.node(id))
    }

    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.doc.first_child(self.id).map(|id| self.doc.node(id))
    }

    pub fn last_child(&self) -> Option<NodeRef<'a>> {
        self.doc.last_child(self.id).map(|id| self.doc.node(id))
    }

    /// Iterate over direct children in order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> {
        let doc = self.doc;
        std::iter::successors(self.first_child(), move |n| {
            doc.next(n.id).map(|id| doc.node(id))
        })
    }

    /// Literal content of text-bearing nodes; empty for everything else
    pub fn literal(&self) -> &'a str {
        match self.value() {
            NodeValue::Text(s)
            | NodeValue::Code(s)
            | NodeValue::HtmlBlock(s)
            | NodeValue::HtmlInline(s) => s,
            NodeValue::CodeBlock { literal, .. } => literal,
            _ => "",
        }
    }

    /// Heading level, or 0 if this is not a heading
    pub fn heading_level(&self) -> u8 {
        match self.value() {
            NodeValue::Heading { level } => *level,
            _ => 0,
        }
    }

    pub fn list_type(&self) -> Option<ListType> {
        match self.value() {
            NodeValue::List(data) => Some(data.list_type),
            _ => None,
        }
    }

    pub fn list_start(&self) -> Option<u64> {
        match self.value() {
            NodeValue::List(data) => Some(data.start),
            _ => None,
        }
    }

    pub fn url(&self) -> &'a str {
        match self.value() {
            NodeValue::Link { url, .. } | NodeValue::Image { url, .. } => url,
            _ => "",
        }
    }

    pub fn title(&self) -> &'a str {
        match self.value() {
            NodeValue::Link { title, .. } | NodeValue::Image { title, .. } => title,
            _ => "",
        }
    }

    pub fn on_enter(&self) -> &'a str {
        match self.value() {
            NodeValue::CustomBlock { on_enter, .. } | NodeValue::CustomInline { on_enter, .. } => {
                on_enter
            }
            _ => "",
        }
    }

    pub fn on_exit(&self) -> &'a str {
        match self.value() {
            NodeValue::CustomBlock { on_exit, .. } | NodeValue::CustomInline { on_exit, .. } => {
                on_exit
            }
            _ => "",
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(*self, &mut out);
        out
    }
}

fn collect_text(node: NodeRef<'_>, out: &mut String) {
    match node.value() {
        NodeValue::Text(s) | NodeValue::Code(s) => out.push_str(s),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_root() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
        assert_eq!(doc.node(doc.root()).value(), &NodeValue::Document);
        assert!(doc.node(doc.root()).parent().is_none());
    }

    #[test]
    fn test_append_links_siblings() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append(root, NodeValue::Paragraph);
        let b = doc.append(root, NodeValue::ThematicBreak);
        let c = doc.append(root, NodeValue::Paragraph);

        assert_eq!(doc.first_child(root), Some(a));
        assert_eq!(doc.last_child(root), Some(c));
        assert_eq!(doc.prev(a), None);
        assert_eq!(doc.next(a), Some(b));
        assert_eq!(doc.prev(c), Some(b));
        assert_eq!(doc.next(c), None);
        assert_eq!(doc.parent(b), Some(root));
    }

    #[test]
    fn test_children_iterates_in_order() {
        let mut doc = Document::new();
        let p = doc.append(doc.root(), NodeValue::Paragraph);
        doc.append(p, NodeValue::text("Hello "));
        let em = doc.append(p, NodeValue::Emph);
        doc.append(em, NodeValue::text("world"));

        let kinds: Vec<bool> = doc
            .node(p)
            .children()
            .map(|n| matches!(n.value(), NodeValue::Text(_)))
            .collect();
        assert_eq!(kinds, vec![true, false]);
        assert_eq!(doc.node(p).text_content(), "Hello world");
    }

    #[test]
    fn test_list_accessors() {
        let mut doc = Document::new();
        let list = doc.append(doc.root(), NodeValue::List(ListData::ordered(5)));
        let item = doc.append(list, NodeValue::Item);

        let parent = doc.node(item).parent().unwrap();
        assert_eq!(parent.list_type(), Some(ListType::Ordered));
        assert_eq!(parent.list_start(), Some(5));
        assert_eq!(doc.node(item).list_type(), None);
    }

    #[test]
    fn test_literal_accessors() {
        let mut doc = Document::new();
        let cb = doc.append(doc.root(), NodeValue::code_block("rust", "let x = 1;"));
        let h = doc.append(doc.root(), NodeValue::Heading { level: 2 });
        let custom = doc.append(
            doc.root(),
            NodeValue::CustomBlock {
                on_enter: ".nf".to_string(),
                on_exit: ".fi".to_string(),
            },
        );

        assert_eq!(doc.node(cb).literal(), "let x = 1;");
        assert_eq!(doc.node(h).heading_level(), 2);
        assert_eq!(doc.node(h).literal(), "");
        assert_eq!(doc.node(custom).on_enter(), ".nf");
        assert_eq!(doc.node(custom).on_exit(), ".fi");
    }

    #[test]
    fn test_value_mut_extends_literal() {
        let mut doc = Document::new();
        let cb = doc.append(doc.root(), NodeValue::code_block("", "a\n"));
        if let NodeValue::CodeBlock { literal, .. } = doc.value_mut(cb) {
            literal.push_str("b\n");
        }
        assert_eq!(doc.node(cb).literal(), "a\nb\n");
    }

    #[test]
    #[should_panic(expected = "leaf")]
    fn test_append_to_leaf_panics() {
        let mut doc = Document::new();
        let text = doc.append(doc.root(), NodeValue::text("x"));
        doc.append(text, NodeValue::Emph);
    }

    #[test]
    fn test_is_block() {
        assert!(NodeValue::Paragraph.is_block());
        assert!(NodeValue::List(ListData::bullet()).is_block());
        assert!(!NodeValue::Emph.is_block());
        assert!(!NodeValue::text("x").is_block());
    }
}
