use std::sync::LazyLock;

use ego_tree::iter::Edge;
use scraper::{ElementRef, Html, Selector, node::Node};

use crate::extractor::model::{TextBlock, normalize_whitespace};

/// Content-bearing tags scanned on every page.
pub const CONTENT_TAGS: &[&str] = &["h1", "h2", "h3", "p", "span", "div", "li"];

/// Extra tags scanned by the interactive variant.
pub const INTERACTIVE_TAGS: &[&str] = &["button"];

/// Subtrees whose text is never rendered.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that visually separate their text from neighbouring text.
const BREAKING_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "button", "dd", "div", "dl", "dt",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "section", "table", "td", "th", "tr", "ul",
];

static CONTENT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| tag_selector(CONTENT_TAGS.iter()));

static INTERACTIVE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| tag_selector(CONTENT_TAGS.iter().chain(INTERACTIVE_TAGS)));

fn tag_selector<'a>(tags: impl Iterator<Item = &'a &'static str>) -> Selector {
    let list = tags.copied().collect::<Vec<_>>().join(", ");
    Selector::parse(&list).expect("tag list is a valid selector")
}

/// Select allow-listed elements in document order and return their
/// non-empty visible text.
pub fn select_blocks(html: &str, include_buttons: bool) -> Vec<TextBlock> {
    let document = Html::parse_document(html);
    let selector: &Selector = if include_buttons {
        &INTERACTIVE_SELECTOR
    } else {
        &CONTENT_SELECTOR
    };

    document
        .select(selector)
        .filter(|element| !inside_hidden(element))
        .map(visible_text)
        .filter(|text| !text.is_empty())
        .map(TextBlock::from)
        .collect()
}

fn inside_hidden(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
    })
}

/// Text of `element` and its descendants, skipping hidden subtrees.
///
/// Walks open/close edges instead of recursing so arbitrarily deep markup
/// cannot exhaust the stack.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    let mut hidden_depth = 0usize;

    for edge in element.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Text(text) if hidden_depth == 0 => raw.push_str(text),
                Node::Element(el) if HIDDEN_TAGS.contains(&el.name()) => hidden_depth += 1,
                Node::Element(el) if hidden_depth == 0 && BREAKING_TAGS.contains(&el.name()) => {
                    raw.push(' ')
                }
                _ => {}
            },
            Edge::Close(node) => match node.value() {
                Node::Element(el) if HIDDEN_TAGS.contains(&el.name()) => {
                    hidden_depth = hidden_depth.saturating_sub(1)
                }
                Node::Element(el) if hidden_depth == 0 && BREAKING_TAGS.contains(&el.name()) => {
                    raw.push(' ')
                }
                _ => {}
            },
        }
    }
    normalize_whitespace(&raw)
}
