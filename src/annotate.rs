// SPDX-License-Identifier: PMPL-1.0-or-later
//! Visual markers for contrast issues.
//!
//! The markup is parsed again, the parsed tree is edited in place and then
//! serialized. Elements whose position in [`text_bearing_elements`] matches
//! an issue's `element_index` get an outline class and a hover tooltip, and
//! a stylesheet for both is appended to `<head>`.

use crate::document::{source_digest, text_bearing_elements};
use crate::error::{ColorsenseError, Result};
use crate::issue::{ContrastIssue, ScanReport};
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

pub const MARKER_CLASS: &str = "contrast-issue-marker";
pub const TOOLTIP_CLASS: &str = "contrast-tooltip";
pub const MARKER_ATTRIBUTE: &str = "data-contrast-issue";

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

static HEAD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("head").expect("valid selector"));

const MARKER_STYLESHEET: &str = r#"
.contrast-issue-marker {
    outline: 2px solid red !important;
    position: relative;
    cursor: help;
}
.contrast-issue-marker::after {
    content: '⚠️';
    position: absolute;
    top: -10px;
    right: -10px;
    background: red;
    color: white;
    border-radius: 50%;
    width: 20px;
    height: 20px;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 12px;
}
.contrast-tooltip {
    display: block;
    visibility: hidden;
    white-space: pre-line;
    background-color: #333;
    color: #fff;
    text-align: left;
    border-radius: 6px;
    padding: 10px;
    position: absolute;
    z-index: 10000;
    bottom: 125%;
    left: 50%;
    transform: translateX(-50%);
    width: 300px;
    font-size: 12px;
    line-height: 1.4;
}
.contrast-issue-marker:hover .contrast-tooltip {
    visibility: visible;
}
"#;

/// Mark up `markup` with the given issues.
///
/// With no issues the input is returned untouched. Issues are matched by
/// `element_index` only, so they must come from scanning this same markup.
/// When several issues share an index the first one is used.
pub fn annotate(markup: &str, issues: &[ContrastIssue]) -> String {
    if issues.is_empty() {
        return markup.to_string();
    }

    let mut by_index: HashMap<usize, &ContrastIssue> = HashMap::new();
    for issue in issues {
        by_index.entry(issue.element_index).or_insert(issue);
    }

    let mut document = Html::parse_document(markup);
    let marked: Vec<_> = text_bearing_elements(&document)
        .enumerate()
        .filter_map(|(index, element)| {
            by_index
                .get(&index)
                .map(|issue| (element.id(), marked_element(element.value()), *issue))
        })
        .collect();
    let head = document.select(&HEAD).next().map(|head| head.id());
    debug!("Marking {} of {} issues", marked.len(), issues.len());

    for (id, element, issue) in marked {
        let Some(mut node) = document.tree.get_mut(id) else {
            continue;
        };
        *node.value() = Node::Element(element);
        let mut tooltip = node.append(Node::Element(Element::new(
            html_name("span"),
            vec![attribute("class", TOOLTIP_CLASS)],
        )));
        tooltip.append(text_node(&issue.describe()));
    }

    if let Some(mut head) = head.and_then(|id| document.tree.get_mut(id)) {
        let mut style = head.append(Node::Element(Element::new(html_name("style"), Vec::new())));
        style.append(text_node(MARKER_STYLESHEET));
    }

    document.html()
}

/// Annotate after checking the report was produced from this exact markup
pub fn annotate_report(markup: &str, report: &ScanReport) -> Result<String> {
    if let Some(expected) = &report.source_digest {
        let actual = source_digest(markup);
        if *expected != actual {
            return Err(ColorsenseError::StaleReport {
                expected: expected.clone(),
                actual,
            });
        }
    }
    Ok(annotate(markup, &report.issues))
}

/// Copy of `original` carrying the marker class and data attribute.
///
/// Attributes are rebuilt from their local names. Text-bearing tags are
/// HTML elements, whose attributes never carry a namespace.
fn marked_element(original: &Element) -> Element {
    let mut attrs = Vec::new();
    let mut has_class = false;
    for (name, value) in original.attrs() {
        if name == MARKER_ATTRIBUTE {
            continue;
        }
        if name == "class" {
            has_class = true;
            if value.trim().is_empty() {
                attrs.push(attribute(name, MARKER_CLASS));
            } else {
                attrs.push(attribute(name, &format!("{} {}", value, MARKER_CLASS)));
            }
        } else {
            attrs.push(attribute(name, value));
        }
    }
    if !has_class {
        attrs.push(attribute("class", MARKER_CLASS));
    }
    attrs.push(attribute(MARKER_ATTRIBUTE, "true"));
    Element::new(original.name.clone(), attrs)
}

fn html_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(local))
}

fn attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
        value: StrTendril::from(value),
    }
}

fn text_node(text: &str) -> Node {
    Node::Text(Text {
        text: StrTendril::from(text),
    })
}
