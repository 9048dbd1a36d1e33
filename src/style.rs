// SPDX-License-Identifier: PMPL-1.0-or-later
//! Inline style resolution for a single element.
//!
//! Only the element's own `style` attribute is consulted. There is no
//! cascade, no external stylesheet and no computed-style engine, so the
//! result approximates what a browser would render.

use crate::color::{parse_color, Color};
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

static FONT_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([\d.]+)\s*(pt|px)\b").expect("valid regex"));

/// Headings rendered large enough by default to use the large-text thresholds
const LARGE_TEXT_TAGS: &[&str] = &["h1", "h2", "h3"];

const BOLD_WEIGHTS: &[&str] = &["bold", "bolder", "700", "800", "900"];

/// Effective colors and size class of one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSnapshot {
    pub foreground: Color,
    pub background: Color,
    pub is_large_text: bool,
}

/// Ordered `property: value` declarations from an inline style attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Split a `style` attribute into declarations, keeping source order
    pub fn parse(style: &str) -> Self {
        let declarations = style
            .split(';')
            .filter_map(|decl| {
                let (property, value) = decl.split_once(':')?;
                let property = property.trim().to_ascii_lowercase();
                let value = strip_important(value.trim());
                if property.is_empty() || value.is_empty() {
                    return None;
                }
                Some((property, value.to_string()))
            })
            .collect();
        Self { declarations }
    }

    /// Value of the first declaration whose property is one of `properties`
    pub fn first(&self, properties: &[&str]) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(property, _)| properties.contains(&property.as_str()))
            .map(|(_, value)| value.as_str())
    }

    pub fn color(&self) -> Option<&str> {
        self.first(&["color"])
    }

    pub fn background(&self) -> Option<&str> {
        self.first(&["background", "background-color"])
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    }
}

/// Resolve the style of a parsed element
pub fn resolve_style(element: ElementRef<'_>, inherited_background: Option<Color>) -> StyleSnapshot {
    let el = element.value();
    resolve(el.name(), el.attr("style"), inherited_background)
}

/// Resolve a style from a tag name and its raw `style` attribute.
///
/// Foreground falls back to black. Background falls back to
/// `inherited_background`, then white.
pub fn resolve(tag: &str, style: Option<&str>, inherited_background: Option<Color>) -> StyleSnapshot {
    let declarations = style.map(InlineStyle::parse).unwrap_or_default();

    let foreground = declarations.color().and_then(parse_color).unwrap_or(Color::BLACK);
    let background = declarations
        .background()
        .and_then(parse_color)
        .or(inherited_background)
        .unwrap_or(Color::WHITE);

    StyleSnapshot {
        foreground,
        background,
        is_large_text: is_large_text(tag, &declarations),
    }
}

/// WCAG large text: 18pt (24px), or 14pt (about 19px) when bold.
/// An explicit pt/px `font-size` overrides the heading default.
pub fn is_large_text(tag: &str, declarations: &InlineStyle) -> bool {
    let by_tag = LARGE_TEXT_TAGS.contains(&tag.to_ascii_lowercase().as_str());

    let is_bold = declarations
        .first(&["font-weight"])
        .map(|w| BOLD_WEIGHTS.contains(&w.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    let Some(caps) = declarations.first(&["font-size"]).and_then(|v| FONT_SIZE.captures(v)) else {
        return by_tag;
    };
    let Ok(size) = caps[1].parse::<f64>() else {
        return by_tag;
    };

    match caps[2].to_ascii_lowercase().as_str() {
        "pt" => size >= 18.0 || (is_bold && size >= 14.0),
        "px" => size >= 24.0 || (is_bold && size >= 19.0),
        _ => by_tag,
    }
}

/// Nearest ancestor background declared inline, if any
pub fn inherited_background(element: ElementRef<'_>) -> Option<Color> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter_map(|ancestor| ancestor.value().attr("style"))
        .find_map(|style| InlineStyle::parse(style).background().and_then(parse_color))
}
