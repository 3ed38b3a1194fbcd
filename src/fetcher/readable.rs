//! Main-content text extraction from fetched HTML
//!
//! 1. Picks the first semantic region in priority order (`<main>`,
//!    `<article>`, content-specific containers), falling back to `<body>`
//! 2. Skips text inside non-content elements (scripts, navigation, frames)
//! 3. Collapses whitespace and truncates to a character budget

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

use crate::utils::{collapse_whitespace, truncate_chars};

/// Maximum nesting depth walked before the rest of a subtree is ignored
const MAX_NESTING_DEPTH: usize = 100;

/// Elements whose text never counts as readable content
const STRIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "iframe", "noscript",
];

// Hardcoded selectors should never fail to parse; a failure is a bug.

static MAIN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("main").expect("BUG: hardcoded CSS selector 'main' is invalid")
});

static ARTICLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("article").expect("BUG: hardcoded CSS selector 'article' is invalid")
});

static CONTENT_CLASS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".content").expect("BUG: hardcoded CSS selector '.content' is invalid")
});

static CONTENT_ID_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#content").expect("BUG: hardcoded CSS selector '#content' is invalid")
});

static POST_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".post").expect("BUG: hardcoded CSS selector '.post' is invalid")
});

static ENTRY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".entry").expect("BUG: hardcoded CSS selector '.entry' is invalid")
});

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body").expect("BUG: hardcoded CSS selector 'body' is invalid")
});

fn main_region(document: &Html) -> ElementRef<'_> {
    let candidates: [&Selector; 7] = [
        &MAIN_SELECTOR,
        &ARTICLE_SELECTOR,
        &CONTENT_CLASS_SELECTOR,
        &CONTENT_ID_SELECTOR,
        &POST_SELECTOR,
        &ENTRY_SELECTOR,
        &BODY_SELECTOR,
    ];

    candidates
        .iter()
        .find_map(|selector| document.select(selector).find(|el| !is_stripped(*el)))
        .unwrap_or_else(|| document.root_element())
}

/// True when `element` is, or sits inside, a non-content element
fn is_stripped(element: ElementRef<'_>) -> bool {
    std::iter::once(*element)
        .chain(element.ancestors())
        .filter_map(|node| node.value().as_element())
        .any(|el| STRIPPED_ELEMENTS.contains(&el.name()))
}

fn collect_text(node: NodeRef<'_, Node>, depth: usize, out: &mut String) {
    if depth > MAX_NESTING_DEPTH {
        tracing::trace!("Readable text walk hit nesting limit {MAX_NESTING_DEPTH}");
        return;
    }

    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(element) if STRIPPED_ELEMENTS.contains(&element.name()) => {}
            Node::Element(_) => collect_text(child, depth + 1, out),
            _ => {}
        }
    }
}

/// Readable text of `html`, whitespace-collapsed and cut to `max_chars`
///
/// Deterministic: identical input always yields identical output.
#[must_use]
pub fn extract_readable_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let region = main_region(&document);

    let mut raw = String::with_capacity(html.len() / 4);
    collect_text(*region, 0, &mut raw);

    truncate_chars(&collapse_whitespace(&raw), max_chars)
}
