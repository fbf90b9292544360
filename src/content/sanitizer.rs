//! Markup sanitizer
//!
//! Reduces arbitrary HTML to a fixed set of structural tags. Elements outside
//! the allow-list are dropped together with everything inside them, which
//! also blanks `<script>` and `<style>` content.

use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Tags that survive sanitization
pub const ALLOWED_TAGS: &[&str] = &["p", "h1", "h2", "h3", "ul", "ol", "li", "img"];

/// Elements serialized without a closing tag
const VOID_TAGS: &[&str] = &["img"];

/// Attributes kept for a given tag, in output order
fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href"],
        "img" => &["src", "alt"],
        _ => &[],
    }
}

/// Sanitizes a markup string down to the allow-listed tags and attributes
///
/// This is a pure function; the same input always yields the same output.
///
/// # Example
///
/// ```
/// use site_scribe::content::clean_content;
///
/// let cleaned = clean_content(r#"<h1 class="x">Hi</h1><script>alert(1)</script>"#);
/// assert_eq!(cleaned, "<h1>Hi</h1>");
/// ```
pub fn clean_content(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(fragment.root_element(), &mut out);
    out
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_text(&text.text)),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    write_element(child_el, out);
                }
            }
            // Comments, doctypes and processing instructions are dropped
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let tag = element.value().name();
    if !ALLOWED_TAGS.contains(&tag) {
        return;
    }

    out.push('<');
    out.push_str(tag);
    for name in allowed_attributes(tag) {
        if let Some(value) = element.value().attr(name) {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        }
    }

    if VOID_TAGS.contains(&tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    write_children(element, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
