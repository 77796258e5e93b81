//! Markdown renderer.
//!
//! Serializes a [`Node`] forest back into markdown text: ATX heading
//! markers, `-` bullets and `N.` ordinals, triple-backtick fences, `>`
//! quote prefixes, pipe tables. Every block is terminated by a single
//! newline; [`Node::BlankLine`] contributes the empty line between
//! blocks. Rendering is a pure function of the forest, so rendering the
//! same forest twice yields identical text.

use super::node::Node;

/// Render a block forest to markdown text.
pub fn render(forest: &[Node]) -> String {
    let mut out = String::new();
    for node in forest {
        render_block(node, &mut out);
    }
    out
}

fn render_block(node: &Node, out: &mut String) {
    match node {
        Node::Heading { level, children } => {
            for _ in 0..*level {
                out.push('#');
            }
            out.push(' ');
            render_inline_children(children, out);
            out.push('\n');
        }
        Node::Paragraph { children } | Node::BlockText { children } => {
            render_inline_children(children, out);
            out.push('\n');
        }
        Node::BlankLine => out.push('\n'),
        Node::List { start, children } => render_list(*start, children, 0, out),
        Node::BlockCode { language, body } => {
            out.push_str("```");
            if let Some(lang) = language {
                out.push_str(lang);
            }
            out.push('\n');
            out.push_str(body);
            if !body.is_empty() && !body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        Node::BlockQuote { children } => {
            let inner = render(children);
            for line in inner.lines() {
                if line.is_empty() {
                    out.push_str(">\n");
                } else {
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        Node::Table { children } => render_table(children, out),
        Node::ThematicBreak => out.push_str("---\n"),
        Node::Html { raw } => {
            out.push_str(raw);
            if !raw.ends_with('\n') {
                out.push('\n');
            }
        }
        Node::Fragment { children } => {
            if children.iter().any(is_block) {
                for child in children {
                    render_block(child, out);
                }
            } else {
                render_inline_children(children, out);
                out.push('\n');
            }
        }
        // A stray inline at block position still gets its own line.
        inline => {
            render_inline(inline, out);
            out.push('\n');
        }
    }
}

fn render_list(start: Option<u64>, items: &[Node], depth: usize, out: &mut String) {
    let mut ordinal = start.unwrap_or(1);
    for item in items {
        for _ in 0..depth {
            out.push_str("  ");
        }
        if start.is_some() {
            out.push_str(&format!("{ordinal}. "));
        } else {
            out.push_str("- ");
        }
        match item {
            Node::ListItem { children } => render_item(children, depth, out),
            other => {
                render_inline(other, out);
                out.push('\n');
            }
        }
        ordinal += 1;
    }
}

/// Render a list item: inline content on the marker line, nested
/// blocks (sub-lists, code, quotes) below it.
fn render_item(children: &[Node], depth: usize, out: &mut String) {
    let mut line = String::new();
    let mut trailing: Vec<&Node> = Vec::new();
    for child in children {
        match child {
            Node::List { .. } | Node::BlockCode { .. } | Node::BlockQuote { .. } => {
                trailing.push(child);
            }
            Node::Paragraph { children } | Node::BlockText { children } => {
                if !line.is_empty() {
                    line.push(' ');
                }
                render_inline_children(children, &mut line);
            }
            inline => render_inline(inline, &mut line),
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
    for block in trailing {
        match block {
            Node::List { start, children } => render_list(*start, children, depth + 1, out),
            other => render_block(other, out),
        }
    }
}

fn render_table(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::TableHead { children: cells } => {
                render_table_row(cells, out);
                out.push('|');
                for _ in cells {
                    out.push_str(" --- |");
                }
                out.push('\n');
            }
            Node::TableRow { children: cells } => render_table_row(cells, out),
            _ => {}
        }
    }
}

fn render_table_row(cells: &[Node], out: &mut String) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        match cell {
            Node::TableCell { children } => render_inline_children(children, out),
            other => render_inline(other, out),
        }
        out.push_str(" |");
    }
    out.push('\n');
}

fn render_inline_children(children: &[Node], out: &mut String) {
    for child in children {
        render_inline(child, out);
    }
}

fn render_inline(node: &Node, out: &mut String) {
    match node {
        Node::Text { raw } => out.push_str(raw),
        Node::CodeSpan { raw } => {
            out.push('`');
            out.push_str(raw);
            out.push('`');
        }
        Node::Emphasis { children } => {
            out.push('*');
            render_inline_children(children, out);
            out.push('*');
        }
        Node::Strong { children } => {
            out.push_str("**");
            render_inline_children(children, out);
            out.push_str("**");
        }
        Node::Strikethrough { children } => {
            out.push_str("~~");
            render_inline_children(children, out);
            out.push_str("~~");
        }
        Node::Link { url, children } => {
            out.push('[');
            render_inline_children(children, out);
            out.push_str("](");
            out.push_str(url);
            out.push(')');
        }
        Node::Image { alt, url } => {
            out.push_str("![");
            out.push_str(alt);
            out.push_str("](");
            out.push_str(url);
            out.push(')');
        }
        Node::SoftBreak => out.push('\n'),
        Node::HardBreak => out.push_str("\\\n"),
        Node::Html { raw } => out.push_str(raw),
        other => {
            if let Some(children) = other.children() {
                render_inline_children(children, out);
            }
        }
    }
}

fn is_block(node: &Node) -> bool {
    matches!(
        node,
        Node::Heading { .. }
            | Node::Paragraph { .. }
            | Node::List { .. }
            | Node::BlockText { .. }
            | Node::BlockCode { .. }
            | Node::BlockQuote { .. }
            | Node::Table { .. }
            | Node::ThematicBreak
            | Node::BlankLine
    )
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_document;
    use super::*;

    fn round_trip(md: &str) -> String {
        render(&parse_document(md).unwrap())
    }

    #[test]
    fn test_heading_and_paragraph_reproduce_exactly() {
        assert_eq!(round_trip("# Title\n\nHello world.\n"), "# Title\n\nHello world.\n");
    }

    #[test]
    fn test_bullet_list_reproduces_exactly() {
        assert_eq!(round_trip("- one\n- two\n"), "- one\n- two\n");
    }

    #[test]
    fn test_ordered_list_markers() {
        assert_eq!(round_trip("1. first\n2. second\n"), "1. first\n2. second\n");
    }

    #[test]
    fn test_fenced_code_keeps_language_tag() {
        assert_eq!(
            round_trip("```rust\nfn main() {}\n```\n"),
            "```rust\nfn main() {}\n```\n"
        );
    }

    #[test]
    fn test_code_without_trailing_newline_is_terminated() {
        let node = Node::BlockCode {
            language: None,
            body: "[Code 1]".to_string(),
        };
        assert_eq!(render(&[node]), "```\n[Code 1]\n```\n");
    }

    #[test]
    fn test_block_quote_prefixes() {
        assert_eq!(round_trip("> quoted words\n"), "> quoted words\n");
    }

    #[test]
    fn test_inline_formatting_round_trips() {
        assert_eq!(
            round_trip("some *em* and **strong** and `code` here\n"),
            "some *em* and **strong** and `code` here\n"
        );
    }

    #[test]
    fn test_link_and_image() {
        assert_eq!(
            round_trip("see [docs](https://example.com) and ![alt](pic.png)\n"),
            "see [docs](https://example.com) and ![alt](pic.png)\n"
        );
    }

    #[test]
    fn test_table_round_trips() {
        let md = "| a | b |\n| --- | --- |\n| 1 | 2 |\n";
        assert_eq!(round_trip(md), md);
    }

    #[test]
    fn test_nested_list_indents() {
        let out = round_trip("- parent\n  - child\n");
        assert!(out.contains("- parent\n"));
        assert!(out.contains("  - child\n"));
    }

    #[test]
    fn test_thematic_break() {
        assert_eq!(round_trip("---\n"), "---\n");
    }

    #[test]
    fn test_rendering_is_stable_under_reparse() {
        // Whatever normalization the first round applies, a second
        // parse-render round must be a fixed point.
        let md = "# T\n\npara one\n\n- a\n- b\n\n> quote\n\n```sh\nls\n```\n";
        let once = round_trip(md);
        let twice = round_trip(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_line_renders_bare_newline() {
        let forest = vec![
            Node::Paragraph {
                children: vec![Node::text("a")],
            },
            Node::BlankLine,
            Node::Paragraph {
                children: vec![Node::text("b")],
            },
        ];
        assert_eq!(render(&forest), "a\n\nb\n");
    }
}
