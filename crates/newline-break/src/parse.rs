//! Markdown parsing.
//!
//! Parses Markdown with comrak and adapts its arena tree into the owned
//! [`Node`] tree. Soft line endings are folded back into the surrounding
//! text values, so a paragraph written over several lines becomes a single
//! text node containing `\n`. Hard breaks already present in the source
//! become break nodes.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options as ComrakOptions};
use newline_break_core::Node;
use tracing::trace;

/// Parse a Markdown string into a root node.
///
/// # Example
///
/// ```rust
/// use newline_break::parse_markdown;
///
/// let tree = parse_markdown("one\ntwo");
/// let paragraph = &tree.children()[0];
/// assert_eq!(paragraph.children()[0].value.as_deref(), Some("one\ntwo"));
/// ```
pub fn parse_markdown(source: &str) -> Node {
    let arena = Arena::new();
    let options = comrak_options();
    let root = parse_document(&arena, source, &options);

    Node::root(convert_children(root))
}

fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options
}

/// Convert the children of a comrak node, merging adjacent text
fn convert_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut children: Vec<Node> = Vec::new();

    for child in node.children() {
        let data = child.data.borrow();
        match &data.value {
            NodeValue::Text(text) => push_text(&mut children, text),
            NodeValue::SoftBreak => push_text(&mut children, "\n"),
            _ => {
                if let Some(converted) = convert_node(child) {
                    children.push(converted);
                }
            }
        }
    }

    children
}

fn push_text(children: &mut Vec<Node>, text: &str) {
    match children.last_mut() {
        Some(last) if last.is_text() => {
            last.value.get_or_insert_with(String::new).push_str(text);
        }
        _ => children.push(Node::text(text)),
    }
}

/// Convert a single comrak node
fn convert_node<'a>(node: &'a AstNode<'a>) -> Option<Node> {
    let data = node.data.borrow();

    let converted = match &data.value {
        NodeValue::Document => Node::root(convert_children(node)),

        // Blocks
        NodeValue::Paragraph => Node::paragraph(convert_children(node)),

        NodeValue::Heading(heading) => Node::heading(heading.level, convert_children(node)),

        NodeValue::BlockQuote => Node::blockquote(convert_children(node)),

        NodeValue::List(list) => Node::list(
            list.list_type == ListType::Ordered,
            u32::try_from(list.start).unwrap_or(1),
            convert_children(node),
        ),

        NodeValue::Item(_) => Node::list_item(convert_children(node)),

        NodeValue::CodeBlock(code) => {
            let lang = code.info.split_whitespace().next();
            Node::code(lang, &code.literal)
        }

        NodeValue::HtmlBlock(html) => Node::html(&html.literal),

        NodeValue::ThematicBreak => Node::thematic_break(),

        NodeValue::Table(_) => Node::table(convert_children(node)),

        NodeValue::TableRow(_) => Node::table_row(convert_children(node)),

        NodeValue::TableCell => Node::table_cell(convert_children(node)),

        // Inlines
        NodeValue::Text(text) => Node::text(text),

        NodeValue::SoftBreak => Node::text("\n"),

        NodeValue::LineBreak => Node::line_break(),

        NodeValue::Emph => Node::emphasis(convert_children(node)),

        NodeValue::Strong => Node::strong(convert_children(node)),

        NodeValue::Strikethrough => Node::delete(convert_children(node)),

        NodeValue::Code(code) => Node::inline_code(&code.literal),

        NodeValue::HtmlInline(html) => Node::html(html),

        NodeValue::Link(link) => Node::link(
            &link.url,
            non_empty(&link.title),
            convert_children(node),
        ),

        NodeValue::Image(link) => {
            Node::image(&link.url, &collect_alt_text(node), non_empty(&link.title))
        }

        other => {
            trace!(node = ?other, "skipping unsupported markdown node");
            return None;
        }
    };

    Some(converted)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Flatten an image's description into its alternative text
fn collect_alt_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut alt = String::new();
    for child in node.children() {
        collect_text_content(child, &mut alt);
    }
    alt
}

fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push('\n'),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
