//! Read-only query interface over a parsed HTML snapshot.
//!
//! Both navigation strategies and the table extractor only ever look at a
//! document through the handful of queries below. A live browser page is
//! queried the same way, by snapshotting its markup first.
//!
//! `scraper`'s tree is `!Send`, so an [`HtmlDocument`] must never be held
//! across an `.await`: parse, query and drop it inside a synchronous function.

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tags that can be clicked during interactive navigation, in order of
/// preference: anchors first, then inline text containers.
pub const CLICKABLE_TAGS: &[&str] = &["a", "span"];

/// A parsed, immutable document snapshot.
pub struct HtmlDocument {
    html: Html,
}

/// A text node together with the element that holds it.
#[derive(Debug, Clone, Copy)]
pub struct TextNode<'a> {
    text: &'a str,
    parent: ElementRef<'a>,
}

impl<'a> TextNode<'a> {
    /// The node's own text, trimmed.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn parent(&self) -> ElementRef<'a> {
        self.parent
    }
}

/// The `(tag, class set)` signature of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSchema {
    pub tag: String,
    pub classes: BTreeSet<String>,
}

impl StructuralSchema {
    pub fn new<I, S>(tag: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag: tag.into(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Signature of an existing element.
    pub fn of(element: ElementRef<'_>) -> Self {
        Self::new(element.value().name(), element.value().classes())
    }

    /// Same tag, and shares at least one class with the schema. An empty
    /// class set matches on tag alone.
    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        let value = element.value();
        if value.name() != self.tag {
            return false;
        }
        self.classes.is_empty() || value.classes().any(|c| self.classes.contains(c))
    }
}

/// An element to click in a live session, identified the way the page script
/// finds it: the first element with this tag whose trimmed text equals `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTarget {
    pub tag: String,
    pub label: String,
}

impl ClickTarget {
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.tag == "a"
    }
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Every element, in document order.
    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }

    /// First text node, in document order, whose trimmed text satisfies `matches`.
    pub fn find_text_matching<F>(&self, matches: F) -> Option<TextNode<'_>>
    where
        F: Fn(&str) -> bool,
    {
        self.html.root_element().descendants().find_map(|node| {
            let text = node.value().as_text()?.trim();
            if !matches(text) {
                return None;
            }
            let parent = node.parent().and_then(ElementRef::wrap)?;
            Some(TextNode { text, parent })
        })
    }

    /// The element holding a text node.
    pub fn parent_of<'a>(node: &TextNode<'a>) -> ElementRef<'a> {
        node.parent
    }

    /// The parent of an element, if it has one.
    pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
        element.parent().and_then(ElementRef::wrap)
    }

    /// Every `<a>` whose trimmed text is exactly `label`.
    pub fn find_anchors_with_exact_text(&self, label: &str) -> Vec<ElementRef<'_>> {
        let label = label.trim();
        self.elements()
            .filter(|el| el.value().name() == "a" && element_text(*el) == label)
            .collect()
    }

    /// Closest `<a>` at or above the element holding `node`.
    pub fn nearest_anchor<'a>(node: &TextNode<'a>) -> Option<ElementRef<'a>> {
        std::iter::once(node.parent)
            .chain(node.parent.ancestors().filter_map(ElementRef::wrap))
            .find(|el| el.value().name() == "a")
    }

    /// Every element matching `schema`, in document order.
    pub fn find_all_matching(&self, schema: &StructuralSchema) -> Vec<ElementRef<'_>> {
        self.elements().filter(|el| schema.matches(*el)).collect()
    }

    /// The element a user would click for `label`: the first anchor with that
    /// exact text, else the first inline text container with it.
    pub fn find_clickable(&self, label: &str) -> Option<ClickTarget> {
        let label = label.trim();
        CLICKABLE_TAGS
            .iter()
            .find(|tag| {
                self.elements()
                    .any(|el| el.value().name() == **tag && element_text(el) == label)
            })
            .map(|tag| ClickTarget::new(*tag, label))
    }
}

/// All descendant text of an element, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Link destination of an anchor, if any.
pub fn href(element: ElementRef<'_>) -> Option<&str> {
    element
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|h| !h.is_empty())
}
