//! # newline-break
//!
//! Turn the line endings inside markdown text into hard breaks.
//!
//! A paragraph written over several lines normally reflows into one line
//! when rendered. After [`newline_to_break`] runs on its tree, each of those
//! line endings is an explicit break node, so serializing the tree keeps
//! every line as written.
//!
//! ## Design
//!
//! The transform works on the [`Node`] tree from `newline-break-core` and
//! mutates it in place:
//!
//! - **Any depth**: text inside emphasis, strong, links, quotes and lists is
//!   handled the same as text directly in a paragraph
//! - **Children only**: scalar attributes such as an image's alternative
//!   text are never touched
//! - **Idempotent**: a normalized tree has no line endings left in its text
//!
//! Parsing (via comrak) and serialization are provided so the transform can
//! be driven from text to text.
//!
//! ## Example (tree)
//!
//! ```rust
//! use newline_break::{newline_to_break, Node};
//!
//! let mut tree = Node::root(vec![Node::paragraph(vec![Node::text("Mul\nti\nple.")])]);
//! let inserted = newline_to_break(&mut tree).unwrap();
//! assert_eq!(inserted, 2);
//! ```
//!
//! ## Example (Markdown string)
//!
//! ```rust
//! use newline_break::NewlineBreakService;
//!
//! let service = NewlineBreakService::new();
//! let markdown = service.convert("This is a\nparagraph.").unwrap();
//! assert_eq!(markdown, "This is a\\\nparagraph.\n");
//! ```

mod parse;
mod service;
mod transform;

pub use newline_break_core::{
    serialize, BreakStyle, CodeBlockStyle, HeadingStyle, Node, NodeKind, Options,
};
pub use parse::parse_markdown;
pub use service::NewlineBreakService;
pub use transform::{contains_line_ending, newline_to_break, split_text};

/// Error type for newline-break operations
#[derive(Debug, thiserror::Error)]
pub enum NewlineBreakError {
    #[error("Invalid tree: {kind} node {reason}")]
    InvalidTree {
        kind: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, NewlineBreakError>;
