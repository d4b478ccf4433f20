//! NewlineBreakService - parse, normalize and serialize in one call.

use newline_break_core::{Node, Options};
use tracing::debug;

use crate::parse::parse_markdown;
use crate::transform::newline_to_break;
use crate::Result;

/// The main service for rewriting soft line endings as hard breaks
#[derive(Debug, Clone, Default)]
pub struct NewlineBreakService {
    options: Options,
}

impl NewlineBreakService {
    /// Create a NewlineBreakService with default options
    pub fn new() -> Self {
        Self {
            options: Options::default(),
        }
    }

    /// Create a NewlineBreakService with custom serialization options
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Convert Markdown text so every source line ending becomes a hard break
    pub fn convert(&self, markdown: &str) -> Result<String> {
        let mut tree = self.parse(markdown);
        let inserted = self.normalize(&mut tree)?;
        let result = self.serialize(&tree);

        debug!(
            input_len = markdown.len(),
            output_len = result.len(),
            inserted,
            "converted markdown"
        );
        Ok(result)
    }

    /// Parse Markdown text into a tree
    pub fn parse(&self, markdown: &str) -> Node {
        parse_markdown(markdown)
    }

    /// Rewrite line endings in a parsed tree in place, returning the number
    /// of inserted breaks
    pub fn normalize(&self, tree: &mut Node) -> Result<usize> {
        newline_to_break(tree)
    }

    /// Serialize a tree with this service's options
    pub fn serialize(&self, tree: &Node) -> String {
        newline_break_core::serialize(tree, &self.options)
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newline_break_core::BreakStyle;

    fn convert(input: &str) -> String {
        NewlineBreakService::new().convert(input).unwrap()
    }

    /// Parsing the converted text gives back the normalized tree
    fn assert_round_trip(input: &str) {
        let service = NewlineBreakService::new();
        let mut expected = service.parse(input);
        service.normalize(&mut expected).unwrap();

        let output = service.convert(input).unwrap();
        assert_eq!(service.parse(&output), expected, "{input:?} -> {output:?}");
    }

    #[test]
    fn test_no_space() {
        assert_eq!(convert("This is a\nparagraph."), "This is a\\\nparagraph.\n");
    }

    #[test]
    fn test_trailing_spaces() {
        for input in [
            "This is a \nparagraph.",
            "This is a  \nparagraph.",
            "This is a   \nparagraph.",
        ] {
            assert_eq!(convert(input), "This is a\\\nparagraph.\n", "{input:?}");
        }
    }

    #[test]
    fn test_carriage_return() {
        assert_eq!(convert("This is a\rparagraph."), "This is a\\\nparagraph.\n");
    }

    #[test]
    fn test_carriage_return_line_feed() {
        assert_eq!(convert("This is a\r\nparagraph."), "This is a\\\nparagraph.\n");
    }

    #[test]
    fn test_after_phrasing() {
        assert_eq!(convert("After *phrasing*\nmore."), "After *phrasing*\\\nmore.\n");
    }

    #[test]
    fn test_before_phrasing() {
        assert_eq!(convert("Before\n*phrasing*."), "Before\\\n*phrasing*.\n");
    }

    #[test]
    fn test_multiple() {
        assert_eq!(convert("Mul\nti\nple."), "Mul\\\nti\\\nple.\n");
    }

    #[test]
    fn test_none() {
        assert_eq!(convert("None."), "None.\n");
    }

    #[test]
    fn test_spaces_break_style() {
        let mut service = NewlineBreakService::new();
        service.options_mut().break_style = BreakStyle::Spaces;
        assert_eq!(service.options().break_style, BreakStyle::Spaces);

        let result = service.convert("a\nb").unwrap();
        assert_eq!(result, "a  \nb\n");
    }

    #[test]
    fn test_normalize_parsed_tree() {
        let service = NewlineBreakService::default();
        let mut tree = service.parse("a\nb\n\nc\nd");
        assert_eq!(service.normalize(&mut tree).unwrap(), 2);
        assert_eq!(service.normalize(&mut tree).unwrap(), 0);
        assert_eq!(service.serialize(&tree), "a\\\nb\n\nc\\\nd\n");
    }

    #[test]
    fn test_document() {
        let input = [
            "no space",
            "asd",
            "",
            "one space ",
            "asd",
            "",
            "one tab\t",
            "asd",
            "",
            "in an ![image",
            "alt](#)",
            "",
            "in a [link",
            "alt](#)",
            "",
            "in an *emphasis",
            "emphasis*.",
            "",
            "in a **strong",
            "strong**.",
            "",
            "setext",
            "heading",
            "===",
            "",
            "> block",
            "> quote.",
            "",
            "* list",
            "  item.",
        ]
        .join("\n");

        let expected = [
            "no space\\",
            "asd",
            "",
            "one space\\",
            "asd",
            "",
            "one tab\\",
            "asd",
            "",
            "in an ![image",
            "alt](#)",
            "",
            "in a [link\\",
            "alt](#)",
            "",
            "in an *emphasis\\",
            "emphasis*.",
            "",
            "in a **strong\\",
            "strong**.",
            "",
            "setext\\",
            "heading",
            "=======",
            "",
            "> block\\",
            "> quote.",
            "",
            "*   list\\",
            "    item.",
            "",
        ]
        .join("\n");

        assert_eq!(convert(&input), expected);
        assert_round_trip(&input);
    }

    #[test]
    fn test_escaped_line_start_round_trips() {
        for input in ["a\n\\# b", "a\n\\> b", "a\n\\=\\=\\=", "a\n\\- b", "x\n1\\. y"] {
            assert_round_trip(input);
        }
        assert_eq!(convert("a\n\\# b"), "a\\\n\\# b\n");
    }

    #[test]
    fn test_escaped_inline_syntax_round_trips() {
        assert_round_trip("a \\*b\\* c\nd");
        assert_round_trip("a &amp;b");
        assert_eq!(convert("a \\*b\\* c\nd"), "a \\*b\\* c\\\nd\n");
    }

    #[test]
    fn test_link_title_round_trips() {
        assert_round_trip("[a\nb](u \"t\\\"x\")");
    }

    #[test]
    fn test_nested_list_round_trips() {
        assert_round_trip("* a\n\n    * b\n    c");
        assert_eq!(
            convert("* a\n\n    * b\n    c"),
            "*   a\n\n    *   b\\\n        c\n"
        );
    }

    #[test]
    fn test_code_block_blank_lines_round_trip() {
        assert_round_trip("```rust\na\n\n\nb\n```");
        assert_eq!(convert("```rust\na\n\n\nb\n```"), "```rust\na\n\n\nb\n```\n");
    }
}
