// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document traversal shared by the scanner and the annotator.
//!
//! Both passes enumerate [`text_bearing_elements`] and identify an element
//! by its position in that sequence. The positions only line up when both
//! passes see the same markup; [`source_digest`] lets callers check that.

use scraper::{ElementRef, Html, Selector};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Tags whose text is checked for contrast
pub const TEXT_BEARING_TAGS: &[&str] = &[
    "p", "span", "div", "a", "button", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th",
    "label",
];

/// Ancestor components kept in a location path
const MAX_PATH_DEPTH: usize = 5;

static TEXT_BEARING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&TEXT_BEARING_TAGS.join(", ")).expect("valid selector"));

/// Every candidate element in document order, including ones without text
pub fn text_bearing_elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> + '_ {
    document.select(&TEXT_BEARING)
}

/// Text of the element's direct text children, trimmed and space-joined.
/// Text inside nested elements is not included.
pub fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// XPath-like locator such as `/html/body/div/p[2]`.
///
/// Walks at most five levels up. A 1-based position is added only when the
/// parent has more than one child with the same tag.
pub fn location_path(element: ElementRef<'_>) -> String {
    let mut components = Vec::new();
    let mut child = element;

    while let Some(parent) = child.parent() {
        let name = child.value().name();
        let same_tag: Vec<ElementRef<'_>> = parent
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| sibling.value().name() == name)
            .collect();

        if same_tag.len() > 1 {
            let position = same_tag
                .iter()
                .position(|sibling| sibling.id() == child.id())
                .map_or(1, |p| p + 1);
            components.push(format!("{}[{}]", name, position));
        } else {
            components.push(name.to_string());
        }

        if components.len() >= MAX_PATH_DEPTH {
            break;
        }
        match ElementRef::wrap(parent) {
            Some(next) => child = next,
            None => break,
        }
    }

    if components.is_empty() {
        return format!("/{}", element.value().name());
    }
    components.reverse();
    format!("/{}", components.join("/"))
}

/// Hex SHA-256 of the markup a report was produced from
pub fn source_digest(markup: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(markup.as_bytes());
    hex::encode(hasher.finalize())
}
