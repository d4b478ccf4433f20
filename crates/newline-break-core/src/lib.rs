//! newline-break-core - Markdown node tree and serialization
//!
//! This crate provides the node tree rewritten by `newline-break` and a
//! serializer that turns it back into Markdown text.
//!
//! # Architecture
//!
//! ```text
//! Markdown ──parse──▶ ┌───────────┐ ──newline_to_break──┐
//!                     │ Node tree │ ◀───────────────────┘
//!                     └───────────┘ ──serialize──▶ Markdown
//! ```
//!
//! # Example
//!
//! ```rust
//! use newline_break_core::{serialize, Node, Options};
//!
//! let tree = Node::root(vec![
//!     Node::heading(1, vec![Node::text("Hello World")]),
//!     Node::paragraph(vec![
//!         Node::text("This is "),
//!         Node::strong(vec![Node::text("bold")]),
//!         Node::line_break(),
//!         Node::text("text."),
//!     ]),
//! ]);
//!
//! let markdown = serialize(&tree, &Options::default());
//! assert_eq!(markdown, "Hello World\n===========\n\nThis is **bold**\\\ntext.\n");
//! ```

mod ast;
mod options;
mod serialize;

pub use ast::{Node, NodeKind};
pub use options::{BreakStyle, CodeBlockStyle, HeadingStyle, Options};
pub use serialize::serialize;
