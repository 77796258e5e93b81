//! Markdown parser adapter.
//!
//! Adapts the `pulldown-cmark` event stream into an owned [`Node`]
//! forest. Table and strikethrough extensions are enabled; every other
//! construct the parser emits is either mapped to its dedicated variant
//! or folded into [`Node::Fragment`].
//!
//! The adapter synthesizes one [`Node::BlankLine`] between adjacent
//! top-level blocks so the rewrite engine sees (and preserves) vertical
//! spacing explicitly. Runs of blank lines in the input collapse to one.
//!
//! # Example
//!
//! ```rust
//! use templyk_content::markdown::{parse_document, Node};
//!
//! let forest = parse_document("# Title\n\nBody text.\n").unwrap();
//! assert!(matches!(forest[0], Node::Heading { level: 1, .. }));
//! assert!(matches!(forest[1], Node::BlankLine));
//! assert!(matches!(forest[2], Node::Paragraph { .. }));
//! ```

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use templyk_core::Result;

use super::node::Node;

/// Parse a markdown document into its top-level block forest.
///
/// Never fails for syntactically tolerable input; the `Result` carries
/// the pipeline's parse-error contract for callers that treat the
/// parser as fallible.
pub fn parse_document(text: &str) -> Result<Vec<Node>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = TreeBuilder::default();
    for event in Parser::new_ext(text, options) {
        builder.push_event(event);
    }

    Ok(interleave_blank_lines(builder.finish()))
}

/// Insert a single blank line between adjacent top-level blocks.
fn interleave_blank_lines(blocks: Vec<Node>) -> Vec<Node> {
    let mut forest = Vec::with_capacity(blocks.len() * 2);
    for block in blocks {
        if !forest.is_empty() {
            forest.push(Node::BlankLine);
        }
        forest.push(block);
    }
    forest
}

/// An open container on the builder stack.
struct Frame {
    kind: FrameKind,
    children: Vec<Node>,
}

enum FrameKind {
    Heading(u8),
    Paragraph,
    List(Option<u64>),
    ListItem,
    BlockQuote,
    CodeBlock(Option<String>),
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link(String),
    Image(String),
    Fragment,
}

/// Stack-based event-to-tree builder.
///
/// Every `Start` pushes a frame, every `End` closes the top frame;
/// `pulldown-cmark` guarantees the two are balanced, so the close never
/// needs to inspect which tag ended.
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.leaf(Node::text(text.into_string())),
            Event::Code(raw) => self.leaf(Node::CodeSpan {
                raw: raw.into_string(),
            }),
            Event::Html(raw) | Event::InlineHtml(raw) => self.leaf(Node::Html {
                raw: raw.into_string(),
            }),
            Event::SoftBreak => self.leaf(Node::SoftBreak),
            Event::HardBreak => self.leaf(Node::HardBreak),
            Event::Rule => self.leaf(Node::ThematicBreak),
            // Footnote references, task markers, math: nothing the
            // transform dispatches on.
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Heading { level, .. } => FrameKind::Heading(level as u8),
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::List(start) => FrameKind::List(start),
            Tag::Item => FrameKind::ListItem,
            Tag::BlockQuote(_) => FrameKind::BlockQuote,
            Tag::CodeBlock(code_kind) => FrameKind::CodeBlock(language_of(&code_kind)),
            Tag::Table(_) => FrameKind::Table,
            Tag::TableHead => FrameKind::TableHead,
            Tag::TableRow => FrameKind::TableRow,
            Tag::TableCell => FrameKind::TableCell,
            Tag::Emphasis => FrameKind::Emphasis,
            Tag::Strong => FrameKind::Strong,
            Tag::Strikethrough => FrameKind::Strikethrough,
            Tag::Link { dest_url, .. } => FrameKind::Link(dest_url.into_string()),
            Tag::Image { dest_url, .. } => FrameKind::Image(dest_url.into_string()),
            _ => FrameKind::Fragment,
        };
        self.stack.push(Frame {
            kind,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let node = build_node(frame);
        self.leaf(node);
    }

    fn leaf(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        // Defensive close of any frame left open by a truncated stream.
        while !self.stack.is_empty() {
            self.close();
        }
        self.roots
    }
}

fn build_node(frame: Frame) -> Node {
    let children = frame.children;
    match frame.kind {
        FrameKind::Heading(level) => Node::Heading { level, children },
        FrameKind::Paragraph => Node::Paragraph { children },
        FrameKind::List(start) => Node::List { start, children },
        FrameKind::ListItem => Node::ListItem { children },
        FrameKind::BlockQuote => Node::BlockQuote { children },
        FrameKind::CodeBlock(language) => Node::BlockCode {
            language,
            body: collect_text(&children),
        },
        FrameKind::Table => Node::Table { children },
        FrameKind::TableHead => Node::TableHead { children },
        FrameKind::TableRow => Node::TableRow { children },
        FrameKind::TableCell => Node::TableCell { children },
        FrameKind::Emphasis => Node::Emphasis { children },
        FrameKind::Strong => Node::Strong { children },
        FrameKind::Strikethrough => Node::Strikethrough { children },
        FrameKind::Link(url) => Node::Link { url, children },
        FrameKind::Image(url) => Node::Image {
            alt: collect_text(&children),
            url,
        },
        FrameKind::Fragment => Node::Fragment { children },
    }
}

fn language_of(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

/// Concatenate the plain-text content of a node sequence.
fn collect_text(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        match node {
            Node::Text { raw } | Node::CodeSpan { raw } => text.push_str(raw),
            Node::SoftBreak | Node::HardBreak => text.push('\n'),
            other => {
                if let Some(children) = other.children() {
                    text.push_str(&collect_text(children));
                }
            }
        }
    }
    text
}
