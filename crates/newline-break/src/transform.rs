//! Line ending to hard break conversion.
//!
//! Walks a [`Node`] tree depth-first and replaces every text node whose value
//! contains line endings with alternating text fragments and break nodes,
//! spliced into the parent's child sequence in place.

use newline_break_core::Node;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{NewlineBreakError, Result};

/// A line ending (`\r\n`, `\r` or `\n`) and the spaces or tabs before it
static LINE_ENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*(?:\r\n|\r|\n)").expect("line ending pattern is valid"));

// A single line ending yields text, break, text
type Pieces = SmallVec<[Node; 3]>;

/// Replace line endings inside text nodes with hard break nodes.
///
/// Every node reachable through child sequences is visited, whatever its
/// kind. Scalar attributes such as an image's alternative text are not
/// children and are left alone. The tree is mutated in place and the number
/// of inserted break nodes is returned; running it again on the result
/// inserts nothing.
///
/// # Errors
///
/// Returns [`NewlineBreakError::InvalidTree`] when a node violates the
/// node/child-sequence contract. The tree is left partially rewritten in
/// that case.
///
/// A text node passed as the root has no parent sequence to splice into and
/// is returned unchanged, line endings included.
pub fn newline_to_break(tree: &mut Node) -> Result<usize> {
    if tree.is_text() {
        check_structure(tree)?;
        trace!("text root left unchanged");
        return Ok(0);
    }

    let inserted = visit(tree)?;
    debug!(inserted, "converted line endings to hard breaks");
    Ok(inserted)
}

/// Check whether a text value contains any line ending
pub fn contains_line_ending(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

/// Split a text value at its line endings.
///
/// Returns `None` when the value has no line ending. Otherwise returns the
/// replacement sequence: one break node per line ending, with the non-empty
/// fragments between them as text nodes. Spaces and tabs directly before a
/// line ending are dropped.
pub fn split_text(value: &str) -> Option<SmallVec<[Node; 3]>> {
    let mut endings = LINE_ENDING.find_iter(value).peekable();
    endings.peek()?;

    let mut pieces = Pieces::new();
    let mut start = 0;

    for ending in endings {
        push_fragment(&mut pieces, &value[start..ending.start()]);
        pieces.push(Node::line_break());
        start = ending.end();
    }
    push_fragment(&mut pieces, &value[start..]);

    Some(pieces)
}

fn push_fragment(pieces: &mut Pieces, fragment: &str) {
    if !fragment.is_empty() {
        pieces.push(Node::text(fragment));
    }
}

fn visit(node: &mut Node) -> Result<usize> {
    check_structure(node)?;

    let Some(children) = node.children_mut() else {
        return Ok(0);
    };

    // Leaves first, then this level
    let mut inserted = 0;
    for child in children.iter_mut() {
        inserted += visit(child)?;
    }

    let mut index = 0;
    while index < children.len() {
        let pieces = if children[index].is_text() {
            split_text(children[index].value_str())
        } else {
            None
        };

        match pieces {
            Some(pieces) => {
                let breaks = pieces.iter().filter(|piece| piece.is_break()).count();
                let len = pieces.len();
                trace!(index, breaks, "splitting text node");

                children.splice(index..=index, pieces);
                inserted += breaks;
                // Fragments are free of line endings; skip past them
                index += len;
            }
            None => index += 1,
        }
    }

    Ok(inserted)
}

fn check_structure(node: &Node) -> Result<()> {
    let kind = &node.kind;

    let reason = if kind.is_container() && node.children.is_none() {
        "has no child sequence"
    } else if !kind.is_container() && node.children.is_some() {
        "is a leaf but has a child sequence"
    } else if kind.carries_value() && node.value.is_none() {
        "has no string value"
    } else {
        return Ok(());
    };

    Err(NewlineBreakError::InvalidTree {
        kind: kind.name(),
        reason,
    })
}
