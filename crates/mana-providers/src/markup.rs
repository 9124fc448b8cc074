//! Lightweight markup extraction
//!
//! Scraped pages are only read, never rendered, so a handful of regexes
//! over the raw markup is enough: tables, rows, tags, attributes and text.

use once_cell::sync::Lazy;
use regex::Regex;

static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<table\b.*?</table>").expect("table regex"));
static ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tr\b.*?</tr>").expect("row regex"));
static IMG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("img regex"));
static OPEN_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<[a-z][a-z0-9]*\b[^>]*>").expect("open tag regex"));
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)([a-z_:][-a-z0-9_:]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attr regex")
});
static OPACITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)opacity\s*:\s*([0-9]*\.?[0-9]+)").expect("opacity regex"));
static CELL_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<td\b[^>]*>\s*<span\b[^>]*>(.*?)</span>").expect("cell span regex")
});
static OPEN_WITH_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(<[a-z][a-z0-9]*\b[^>]*>)([^<]*)").expect("open tag with text regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Every `<table>` block, in document order
///
/// Nested tables are not supported.
#[must_use]
pub fn tables(html: &str) -> Vec<&str> {
    TABLE_RE.find_iter(html).map(|m| m.as_str()).collect()
}

/// Every `<tr>` block of a fragment
#[must_use]
pub fn rows(fragment: &str) -> Vec<&str> {
    ROW_RE.find_iter(fragment).map(|m| m.as_str()).collect()
}

/// Every `<img>` tag of a fragment
#[must_use]
pub fn images(fragment: &str) -> Vec<&str> {
    IMG_RE.find_iter(fragment).map(|m| m.as_str()).collect()
}

/// Opening tags carrying a class, in document order
#[must_use]
pub fn tags_with_class<'a>(html: &'a str, class: &str) -> Vec<&'a str> {
    OPEN_TAG_RE
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| has_class(tag, class))
        .collect()
}

/// Leading text of every element carrying a class
#[must_use]
pub fn class_texts(html: &str, class: &str) -> Vec<String> {
    OPEN_WITH_TEXT_RE
        .captures_iter(html)
        .filter(|caps| caps.get(1).is_some_and(|tag| has_class(tag.as_str(), class)))
        .filter_map(|caps| caps.get(2))
        .map(|m| text(m.as_str()))
        .collect()
}

/// Attribute value of a single tag
#[must_use]
pub fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    ATTR_RE.captures_iter(tag).find_map(|caps| {
        let key = caps.get(1)?;
        if !key.as_str().eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2).or_else(|| caps.get(3)).map(|v| v.as_str())
    })
}

/// Whether a tag's class list contains `class`
#[must_use]
pub fn has_class(tag: &str, class: &str) -> bool {
    attr(tag, "class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

/// Inline-style opacity of a tag, `1.0` when unset
#[must_use]
pub fn opacity(tag: &str) -> f32 {
    attr(tag, "style")
        .and_then(|style| OPACITY_RE.captures(style))
        .and_then(|caps| caps.get(1))
        .and_then(|v| v.as_str().parse().ok())
        .unwrap_or(1.0)
}

/// Text of every `<td><span>..</span>` pair
#[must_use]
pub fn cell_span_texts(html: &str) -> Vec<String> {
    CELL_SPAN_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| text(m.as_str()))
        .collect()
}

/// Fragment with tags removed, entities decoded and whitespace collapsed
#[must_use]
pub fn text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WS_RE.replace_all(decoded.trim(), " ").into_owned()
}

/// Markup following the element with the given id
///
/// Falls back to the whole document when the id is absent.
#[must_use]
pub fn after_id<'a>(html: &'a str, id: &str) -> &'a str {
    let needle = format!("id=\"{id}\"");
    html.find(&needle).map_or(html, |start| &html[start..])
}
