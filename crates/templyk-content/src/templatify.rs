//! The templatify transform.
//!
//! Turns a finished markdown document into a structurally faithful
//! skeleton: content-bearing elements (paragraphs, list items, code
//! bodies, images, links, tables, block quotes) are replaced by numbered
//! placeholder tokens, while structural scaffolding (headings, list
//! markers, fence delimiters, blank lines) is preserved verbatim.
//!
//! The pipeline is parse → rewrite → render. The rewrite walks the
//! forest top-down, dispatching on node type; placeholder numbering is
//! positional, never content-based, and each category counts up from 1
//! with no gaps within one invocation.
//!
//! # Example
//!
//! ```rust
//! use templyk_content::templatify::{templatify, TemplatifyOptions};
//!
//! let out = templatify(
//!     "# Title\n\nAn explanatory paragraph.\n",
//!     &TemplatifyOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(out, "# Title\n\n[Paragraph 1]\n");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use templyk_core::Result;

use crate::markdown::frontmatter::{validate_frontmatter, TemplateFrontmatter};
use crate::markdown::node::Node;
use crate::markdown::parser::parse_document;
use crate::markdown::render::render;

/// Textual wrapping convention for placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStyle {
    /// `[Paragraph 1]`
    #[default]
    Bracket,
    /// `{{Paragraph 1}}`
    Curly,
}

/// Pruning policy applied during the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Keep everything (default).
    #[default]
    Full,
    /// Reserved denser variant; currently prunes nothing beyond `Full`.
    Compact,
    /// Drop headings deeper than level 3.
    Outline,
}

/// Options for one [`templatify`] call.
#[derive(Debug, Clone, Default)]
pub struct TemplatifyOptions {
    /// Token wrapping style.
    pub token_style: TokenStyle,
    /// Pruning policy.
    pub verbosity: Verbosity,
    /// Optional frontmatter variables, validated against the template
    /// schema before the rewrite runs.
    pub frontmatter: Option<serde_yaml::Mapping>,
}

/// Per-invocation rewrite state.
///
/// Created fresh for every [`templatify`] call and discarded after it;
/// never shared across calls or threads.
struct TemplatifyContext {
    token_style: TokenStyle,
    verbosity: Verbosity,
    /// Validated variables available to the rewrite. Currently
    /// informational only; nothing is substituted back into tokens.
    #[allow(dead_code)]
    frontmatter: Option<TemplateFrontmatter>,
    /// Next-to-assign index per placeholder category.
    counters: BTreeMap<&'static str, u32>,
}

impl TemplatifyContext {
    fn new(options: &TemplatifyOptions, frontmatter: Option<TemplateFrontmatter>) -> Self {
        Self {
            token_style: options.token_style,
            verbosity: options.verbosity,
            frontmatter,
            counters: BTreeMap::new(),
        }
    }

    /// Claim the next index for a category. Counting starts at 1.
    fn next_index(&mut self, category: &'static str) -> u32 {
        let count = self.counters.entry(category).or_insert(0);
        *count += 1;
        *count
    }

    /// The styled token text for the next index of a category.
    fn styled_label(&mut self, category: &'static str) -> String {
        let label = format!("{category} {}", self.next_index(category));
        match self.token_style {
            TokenStyle::Bracket => format!("[{label}]"),
            TokenStyle::Curly => format!("{{{{{label}}}}}"),
        }
    }

    /// Mint a placeholder node for a category.
    fn token(&mut self, category: &'static str) -> Node {
        let text = self.styled_label(category);
        Node::BlockText {
            children: vec![Node::text(text)],
        }
    }
}

/// Templatify a markdown document.
///
/// Parses `md_text` into a block forest, rewrites every top-level node
/// in document order (dropping pruned nodes), and renders the surviving
/// forest back to markdown. Deterministic and side-effect-free; fails
/// only when supplied frontmatter does not validate.
pub fn templatify(md_text: &str, options: &TemplatifyOptions) -> Result<String> {
    let frontmatter = options
        .frontmatter
        .as_ref()
        .map(validate_frontmatter)
        .transpose()?;

    let forest = parse_document(md_text)?;
    let mut ctx = TemplatifyContext::new(options, frontmatter);
    let rewritten: Vec<Node> = forest
        .into_iter()
        .filter_map(|node| rewrite(node, &mut ctx))
        .collect();

    Ok(render(&rewritten))
}

/// Rewrite one node, returning `None` to prune it and its subtree.
///
/// Dispatch is exhaustive over the node variants; anything without a
/// dedicated rule recurses into its children and is reconstructed
/// unchanged. Never fails: unknown shapes are a structural
/// pass-through, not an error.
fn rewrite(node: Node, ctx: &mut TemplatifyContext) -> Option<Node> {
    match node {
        // Headings are structural anchors: their text is retained
        // verbatim, except that outline verbosity drops deep ones.
        Node::Heading { level, children } => {
            if ctx.verbosity == Verbosity::Outline && level > 3 {
                log::debug!("pruning level-{level} heading under outline verbosity");
                return None;
            }
            Some(Node::Heading {
                level,
                children: rewrite_children(children, ctx),
            })
        }
        // Bare prose collapses to a single token; mixed-content
        // paragraphs keep their embedded media and links visible as
        // their own placeholders.
        Node::Paragraph { children } => {
            if children.iter().all(Node::is_text) {
                Some(ctx.token("Paragraph"))
            } else {
                Some(Node::Paragraph {
                    children: rewrite_children(children, ctx),
                })
            }
        }
        // One token per list entry, regardless of the entry's internal
        // richness. Anything that is not an item passes through.
        Node::List { start, children } => {
            let children = children
                .into_iter()
                .map(|child| match child {
                    Node::ListItem { .. } => ctx.token("Item"),
                    other => other,
                })
                .collect();
            Some(Node::List { start, children })
        }
        // The fence survives, the body and language tag do not.
        Node::BlockCode { .. } => Some(Node::BlockCode {
            language: None,
            body: ctx.styled_label("Code"),
        }),
        Node::Image { .. } => Some(ctx.token("Image")),
        Node::Link { .. } => Some(ctx.token("Link")),
        Node::Table { .. } => Some(ctx.token("Table")),
        Node::BlockQuote { .. } => Some(ctx.token("Block_quote")),
        // Vertical spacing passes through untouched and uncounted.
        Node::BlankLine => Some(Node::BlankLine),
        other => Some(other.map_children(|children| rewrite_children(children, ctx))),
    }
}

fn rewrite_children(children: Vec<Node>, ctx: &mut TemplatifyContext) -> Vec<Node> {
    children
        .into_iter()
        .filter_map(|child| rewrite(child, ctx))
        .collect()
}
