//! Markdown tree serialization
//!
//! Converts a [`Node`] tree into Markdown text. Text values are escaped so
//! that parsing the output again yields the same tree.

use crate::ast::{Node, NodeKind};
use crate::options::{CodeBlockStyle, HeadingStyle, Options};

/// Serialize a tree to Markdown string.
///
/// Blocks are separated by one blank line and non-empty output ends with a
/// single newline.
pub fn serialize(node: &Node, options: &Options) -> String {
    let mut output = render_block(node, options);
    if !output.is_empty() {
        output.push('\n');
    }
    output
}

/// Inline rendering context
#[derive(Default, Clone, Copy)]
struct Context {
    /// Hard breaks cannot span lines (ATX headings, table cells)
    single_line: bool,
}

/// Render one block without a trailing newline
fn render_block(node: &Node, options: &Options) -> String {
    match &node.kind {
        NodeKind::Root | NodeKind::ListItem => render_blocks(node.children(), options),

        NodeKind::Heading { depth } => render_heading(*depth, node.children(), options),

        NodeKind::Blockquote => {
            let content = render_blocks(node.children(), options);
            let mut out = String::with_capacity(content.len() + 16);
            for (i, line) in content.split('\n').enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push('>');
                if !line.is_empty() {
                    out.push(' ');
                    out.push_str(line);
                }
            }
            out
        }

        NodeKind::List { ordered, start } => {
            render_list(*ordered, *start, node.children(), options)
        }

        NodeKind::Code { lang } => render_code_block(lang.as_deref(), node.value_str(), options),

        NodeKind::ThematicBreak => options.hr.clone(),

        NodeKind::Table => render_table(node.children(), options),

        NodeKind::Html => node.value_str().trim_end_matches('\n').to_string(),

        // Paragraphs, and phrasing content found at block level
        _ => {
            let mut out = String::new();
            if node.kind == NodeKind::Paragraph {
                serialize_inlines(node.children(), options, Context::default(), &mut out);
            } else {
                serialize_inline(node, options, Context::default(), &mut out);
            }
            if out.trim().is_empty() {
                out.clear();
            }
            out
        }
    }
}

/// Render a block sequence, one blank line between blocks
fn render_blocks(blocks: &[Node], options: &Options) -> String {
    let rendered: Vec<String> = blocks
        .iter()
        .filter(|block| matches!(block.kind, NodeKind::Code { .. }) || !block.is_blank())
        .map(|block| render_block(block, options))
        .filter(|block| !block.is_empty())
        .collect();
    rendered.join("\n\n")
}

fn render_heading(level: u8, content: &[Node], options: &Options) -> String {
    let setext = options.heading_style == HeadingStyle::Setext && level <= 2;
    let ctx = Context {
        single_line: !setext,
    };

    let mut text = String::new();
    serialize_inlines(content, options, ctx, &mut text);
    if text.trim().is_empty() {
        return String::new();
    }

    if setext {
        // Underline matches the last line of a heading that spans lines
        let last_line_len = text
            .rsplit('\n')
            .next()
            .map_or(0, |line| line.chars().count());
        let underline = if level == 1 { "=" } else { "-" };
        format!("{text}\n{}", underline.repeat(last_line_len.max(1)))
    } else {
        format!("{} {text}", "#".repeat(usize::from(level)))
    }
}

fn render_list(ordered: bool, start: u32, items: &[Node], options: &Options) -> String {
    let rendered: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if ordered {
                format!("{}.  ", u64::from(start) + i as u64)
            } else {
                format!("{}   ", options.bullet_list_marker)
            };
            render_list_item(item, &marker, options)
        })
        .collect();
    rendered.join("\n")
}

fn render_list_item(item: &Node, marker: &str, options: &Options) -> String {
    let content = render_block(item, options);
    if content.is_empty() {
        return marker.trim_end().to_string();
    }

    // Continuation lines line up with the content after the marker
    let indent = " ".repeat(marker.chars().count());
    let mut out = String::with_capacity(content.len() + marker.len() * 2);
    out.push_str(marker);
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }
    out
}

fn render_code_block(lang: Option<&str>, code: &str, options: &Options) -> String {
    let code = code.strip_suffix('\n').unwrap_or(code);

    // Indented code cannot hold leading or trailing blank lines
    let edge_blank = code.lines().next().map_or(true, |line| line.trim().is_empty())
        || code.lines().last().map_or(true, |line| line.trim().is_empty());
    let use_fenced =
        lang.is_some() || options.code_block_style == CodeBlockStyle::Fenced || edge_blank;

    if !use_fenced {
        let lines: Vec<String> = code
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("    {line}")
                }
            })
            .collect();
        return lines.join("\n");
    }

    let mut fence = if options.fence.is_empty() {
        "```".to_string()
    } else {
        options.fence.clone()
    };
    let fence_char = fence.chars().next().unwrap_or('`');
    while code.contains(fence.as_str()) {
        fence.push(fence_char);
    }

    let mut out = String::with_capacity(code.len() + fence.len() * 2 + 8);
    out.push_str(&fence);
    out.push_str(lang.unwrap_or(""));
    out.push('\n');
    if !code.is_empty() {
        out.push_str(code);
        out.push('\n');
    }
    out.push_str(&fence);
    out
}

fn render_table(rows: &[Node], options: &Options) -> String {
    let ctx = Context { single_line: true };
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.children()
                .iter()
                .map(|cell| {
                    let mut text = String::new();
                    serialize_inlines(cell.children(), options, ctx, &mut text);
                    text.trim().to_string()
                })
                .collect()
        })
        .collect();

    let Some((header, body)) = cells.split_first() else {
        return String::new();
    };
    if header.is_empty() {
        return String::new();
    }

    // Column widths, minimum of 3 for the separator
    let col_count = cells.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![3; col_count];
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(table_row(header, &widths));

    let mut separator = String::from("|");
    for &width in &widths {
        separator.push(' ');
        separator.push_str(&"-".repeat(width));
        separator.push_str(" |");
    }
    lines.push(separator);

    for row in body {
        lines.push(table_row(row, &widths));
    }

    lines.join("\n")
}

fn table_row(row: &[String], widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (i, &width) in widths.iter().enumerate() {
        let cell = row.get(i).map_or("", String::as_str);
        out.push(' ');
        out.push_str(cell);
        for _ in cell.chars().count()..width {
            out.push(' ');
        }
        out.push_str(" |");
    }
    out
}

fn serialize_inlines(inlines: &[Node], options: &Options, ctx: Context, out: &mut String) {
    for inline in inlines {
        serialize_inline(inline, options, ctx, out);
    }
}

fn serialize_inline(inline: &Node, options: &Options, ctx: Context, out: &mut String) {
    match &inline.kind {
        NodeKind::Text => escape_text(inline.value_str(), ctx, out),

        NodeKind::Html => out.push_str(inline.value_str()),

        NodeKind::Strong => {
            serialize_delimited(inline.children(), &options.strong_delimiter, options, ctx, out)
        }

        NodeKind::Emphasis => {
            let mut buf = [0u8; 4];
            let delimiter = options.em_delimiter.encode_utf8(&mut buf);
            serialize_delimited(inline.children(), delimiter, options, ctx, out)
        }

        NodeKind::Delete => serialize_delimited(inline.children(), "~~", options, ctx, out),

        NodeKind::InlineCode => {
            let code = inline.value_str();
            if !code.is_empty() {
                let backticks = if code.contains('`') { "``" } else { "`" };
                let space = if code.starts_with('`') || code.ends_with('`') {
                    " "
                } else {
                    ""
                };
                out.push_str(backticks);
                out.push_str(space);
                out.push_str(code);
                out.push_str(space);
                out.push_str(backticks);
            }
        }

        NodeKind::Link { url, title } => {
            out.push('[');
            serialize_inlines(inline.children(), options, ctx, out);
            out.push_str("](");
            push_destination(url, out);
            push_title(title.as_deref(), out);
            out.push(')');
        }

        NodeKind::Image { url, alt, title } => {
            out.push_str("![");
            escape_text(alt, ctx, out);
            out.push_str("](");
            push_destination(url, out);
            push_title(title.as_deref(), out);
            out.push(')');
        }

        NodeKind::Break => {
            if ctx.single_line {
                out.push(' ');
            } else {
                out.push_str(options.break_style.token());
            }
        }

        // Block kinds nested in phrasing content: render their phrasing
        _ => serialize_inlines(inline.children(), options, ctx, out),
    }
}

fn serialize_delimited(
    content: &[Node],
    delimiter: &str,
    options: &Options,
    ctx: Context,
    out: &mut String,
) {
    let start = out.len();
    out.push_str(delimiter);
    let inner = out.len();
    serialize_inlines(content, options, ctx, out);
    if out[inner..].trim().is_empty() {
        out.truncate(start);
    } else {
        out.push_str(delimiter);
    }
}

/// Escape a text value so it reads back as the same literal text
fn escape_text(text: &str, ctx: Context, out: &mut String) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(if ctx.single_line { ' ' } else { '\n' });
        }
        escape_line(line, ctx, out);
    }
}

fn escape_line(line: &str, ctx: Context, out: &mut String) {
    let at_line_start = out.is_empty() || out.ends_with('\n');
    let marker_end = if at_line_start {
        ordered_marker_end(line)
    } else {
        None
    };

    for (i, c) in line.char_indices() {
        let line_start = at_line_start && i == 0;
        match c {
            // Leading whitespace would be stripped or read as indentation
            ' ' if line_start => out.push_str("&#x20;"),
            '\t' if line_start => out.push_str("&#x9;"),

            '#' | '>' | '+' | '-' | '=' if line_start => {
                out.push('\\');
                out.push(c);
            }
            '#' if ctx.single_line => out.push_str("\\#"),

            '\\' | '`' | '*' | '_' | '[' | ']' | '~' | '|' | '<' => {
                out.push('\\');
                out.push(c);
            }

            '&' if line[i + 1..]
                .chars()
                .next()
                .is_some_and(|next| next.is_ascii_alphanumeric() || next == '#') =>
            {
                out.push_str("\\&");
            }

            '.' | ')' if marker_end == Some(i) => {
                out.push('\\');
                out.push(c);
            }

            _ => out.push(c),
        }
    }
}

/// Byte index of the `.` or `)` closing an ordered list marker at line start
fn ordered_marker_end(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    match line.as_bytes().get(digits) {
        Some(b'.' | b')') if digits > 0 => Some(digits),
        _ => None,
    }
}

fn push_destination(url: &str, out: &mut String) {
    let bracketed = url.is_empty()
        || url
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'));

    if bracketed {
        out.push('<');
    }
    for c in url.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '<' | '>' if bracketed => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    if bracketed {
        out.push('>');
    }
}

fn push_title(title: Option<&str>, out: &mut String) {
    if let Some(t) = title {
        out.push_str(" \"");
        for c in t.chars() {
            if matches!(c, '"' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
}
