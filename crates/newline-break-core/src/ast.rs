//! Markdown node tree
//!
//! Every node carries a kind tag, an optional string value and, for
//! container kinds, an ordered sequence of owned children. Scalar attributes
//! (link destinations, image alternative text, heading depth) live in the
//! kind and are never part of the child sequence.

/// Node kinds, following mdast naming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root document container
    Root,

    /// Paragraph containing phrasing content
    Paragraph,

    /// Heading with depth (1-6)
    Heading { depth: u8 },

    /// Block quote containing nested blocks
    Blockquote,

    /// List (ordered or unordered) of list items
    List { ordered: bool, start: u32 },

    /// List item containing blocks
    ListItem,

    /// Fenced or indented code block, code in `value`
    Code { lang: Option<String> },

    /// Raw HTML, markup in `value`
    Html,

    /// Thematic break (horizontal rule)
    ThematicBreak,

    /// Table; the first row is the header row
    Table,

    TableRow,

    TableCell,

    /// Plain text, content in `value`
    Text,

    /// Emphasis (italic)
    Emphasis,

    /// Strong emphasis (bold)
    Strong,

    /// Strikethrough
    Delete,

    /// Inline code, content in `value`
    InlineCode,

    /// Link with destination and optional title; the link text is the child sequence
    Link { url: String, title: Option<String> },

    /// Image; the alternative text is a scalar attribute, not a child
    Image {
        url: String,
        alt: String,
        title: Option<String>,
    },

    /// Hard line break
    Break,
}

impl NodeKind {
    /// The mdast type name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading { .. } => "heading",
            NodeKind::Blockquote => "blockquote",
            NodeKind::List { .. } => "list",
            NodeKind::ListItem => "listItem",
            NodeKind::Code { .. } => "code",
            NodeKind::Html => "html",
            NodeKind::ThematicBreak => "thematicBreak",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableCell => "tableCell",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Delete => "delete",
            NodeKind::InlineCode => "inlineCode",
            NodeKind::Link { .. } => "link",
            NodeKind::Image { .. } => "image",
            NodeKind::Break => "break",
        }
    }

    /// Whether nodes of this kind own a child sequence
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::Paragraph
                | NodeKind::Heading { .. }
                | NodeKind::Blockquote
                | NodeKind::List { .. }
                | NodeKind::ListItem
                | NodeKind::Table
                | NodeKind::TableRow
                | NodeKind::TableCell
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Delete
                | NodeKind::Link { .. }
        )
    }

    /// Whether nodes of this kind hold their content in `value`
    pub fn carries_value(&self) -> bool {
        matches!(
            self,
            NodeKind::Text | NodeKind::Code { .. } | NodeKind::Html | NodeKind::InlineCode
        )
    }
}

/// A markdown tree node.
///
/// The parent exclusively owns its children; there are no back-references.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node kind, including scalar attributes
    pub kind: NodeKind,

    /// String content for text, code, html and inline code nodes
    pub value: Option<String>,

    /// Child nodes, present only for container kinds
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a container node of the given kind
    pub fn container(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            value: None,
            children: Some(children),
        }
    }

    /// Create a leaf node without a value
    pub fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            value: None,
            children: None,
        }
    }

    fn literal(kind: NodeKind, value: &str) -> Self {
        Self {
            kind,
            value: Some(value.to_string()),
            children: None,
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Root, children)
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Paragraph, children)
    }

    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Self::container(NodeKind::Heading { depth }, children)
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Blockquote, children)
    }

    pub fn list(ordered: bool, start: u32, items: Vec<Node>) -> Self {
        Self::container(NodeKind::List { ordered, start }, items)
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Self::container(NodeKind::ListItem, children)
    }

    pub fn code(lang: Option<&str>, code: &str) -> Self {
        Self::literal(
            NodeKind::Code {
                lang: lang.map(str::to_string),
            },
            code,
        )
    }

    pub fn html(html: &str) -> Self {
        Self::literal(NodeKind::Html, html)
    }

    pub fn thematic_break() -> Self {
        Self::leaf(NodeKind::ThematicBreak)
    }

    pub fn table(rows: Vec<Node>) -> Self {
        Self::container(NodeKind::Table, rows)
    }

    pub fn table_row(cells: Vec<Node>) -> Self {
        Self::container(NodeKind::TableRow, cells)
    }

    pub fn table_cell(children: Vec<Node>) -> Self {
        Self::container(NodeKind::TableCell, children)
    }

    /// Create a text node
    pub fn text(content: &str) -> Self {
        Self::literal(NodeKind::Text, content)
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Emphasis, children)
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Strong, children)
    }

    pub fn delete(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Delete, children)
    }

    pub fn inline_code(code: &str) -> Self {
        Self::literal(NodeKind::InlineCode, code)
    }

    /// Create a link node whose text is `children`
    pub fn link(url: &str, title: Option<&str>, children: Vec<Node>) -> Self {
        Self::container(
            NodeKind::Link {
                url: url.to_string(),
                title: title.map(str::to_string),
            },
            children,
        )
    }

    /// Create an image node
    pub fn image(url: &str, alt: &str, title: Option<&str>) -> Self {
        Self::leaf(NodeKind::Image {
            url: url.to_string(),
            alt: alt.to_string(),
            title: title.map(str::to_string),
        })
    }

    /// Create a hard line break node
    pub fn line_break() -> Self {
        Self::leaf(NodeKind::Break)
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Check if this is a hard break node
    pub fn is_break(&self) -> bool {
        self.kind == NodeKind::Break
    }

    /// Check if this node's kind owns a child sequence
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// The string value, or an empty string for nodes without one
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Get all child nodes (empty for leaves)
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Mutable access to the child sequence, if this node has one
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.children.as_mut()
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Get all text content from this node and descendants.
    ///
    /// Breaks contribute a newline; scalar attributes contribute nothing.
    pub fn text_content(&self) -> String {
        match self.kind {
            NodeKind::Text | NodeKind::InlineCode => self.value_str().to_string(),
            NodeKind::Break => "\n".to_string(),
            _ => self
                .children()
                .iter()
                .map(|child| child.text_content())
                .collect::<Vec<_>>()
                .join(""),
        }
    }

    /// Check if this node renders to nothing
    pub fn is_blank(&self) -> bool {
        match &self.kind {
            NodeKind::Text | NodeKind::Html | NodeKind::Code { .. } => {
                self.value_str().trim().is_empty()
            }
            NodeKind::InlineCode => self.value_str().is_empty(),
            NodeKind::Image { .. } | NodeKind::Break | NodeKind::ThematicBreak => false,
            _ => self.children().iter().all(|child| child.is_blank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert!(!node.is_container());
        assert_eq!(node.text_content(), "Hello World");
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_container_kinds() {
        assert!(Node::emphasis(vec![]).is_container());
        assert!(Node::link("#", None, vec![]).is_container());
        assert!(!Node::image("a.png", "alt", None).is_container());
        assert!(!Node::line_break().is_container());
        assert!(NodeKind::InlineCode.carries_value());
        assert!(!NodeKind::Break.carries_value());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(NodeKind::ListItem.name(), "listItem");
        assert_eq!(NodeKind::Break.name(), "break");
        assert_eq!(NodeKind::Heading { depth: 2 }.name(), "heading");
    }

    #[test]
    fn test_children() {
        let mut paragraph = Node::paragraph(vec![]);
        paragraph.add_child(Node::text("Hello"));
        paragraph.add_child(Node::line_break());
        paragraph.add_child(Node::text("World"));

        assert_eq!(paragraph.children().len(), 3);
        assert_eq!(paragraph.text_content(), "Hello\nWorld");
    }

    #[test]
    fn test_add_child_to_leaf_creates_sequence() {
        let mut node = Node::leaf(NodeKind::Paragraph);
        node.add_child(Node::text("x"));
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_text_content_skips_image_alt() {
        let paragraph = Node::paragraph(vec![
            Node::text("see "),
            Node::image("a.png", "hidden", None),
        ]);
        assert_eq!(paragraph.text_content(), "see ");
    }

    #[test]
    fn test_is_blank() {
        assert!(Node::paragraph(vec![Node::text("  ")]).is_blank());
        assert!(!Node::paragraph(vec![Node::line_break()]).is_blank());
        assert!(!Node::paragraph(vec![Node::image("a.png", "", None)]).is_blank());
        assert!(Node::root(vec![]).is_blank());
    }
}
