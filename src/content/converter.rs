//! Conversion of sanitized markup into content blocks
//!
//! Only the immediate children of `<body>` are interpreted. Lists get one
//! extra pass over their `<li>` descendants; anything deeper is flattened to
//! its text.

use crate::content::block::{ContentBlock, HeadingLevel};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Converts sanitized markup into an ordered sequence of content blocks
///
/// # Mapping
///
/// | Node | Block |
/// |------|-------|
/// | `h1`..`h3` | Heading at that level |
/// | `p`, `div` | Paragraph, if the trimmed text is non-empty |
/// | `a` | Link (always) |
/// | `img` | Image (always) |
/// | `ul` / `ol` | One list item per non-empty `li` |
/// | text | Paragraph, if non-empty after trimming |
///
/// Anything else is skipped.
///
/// # Example
///
/// ```
/// use site_scribe::content::{convert_html, ContentBlock, HeadingLevel};
///
/// let blocks = convert_html("<h1>  Title  </h1>");
/// assert_eq!(
///     blocks,
///     vec![ContentBlock::Heading { level: HeadingLevel::H1, text: "Title".to_string() }]
/// );
/// ```
pub fn convert_html(html: &str) -> Vec<ContentBlock> {
    let document = Html::parse_document(html);
    let mut blocks = Vec::new();

    let Ok(body_selector) = Selector::parse("body") else {
        return blocks;
    };
    let Some(body) = document.select(&body_selector).next() else {
        return blocks;
    };

    for child in body.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    convert_element(element, &mut blocks);
                }
            }
            Node::Text(text) => {
                let plain = text.text.trim();
                if !plain.is_empty() {
                    blocks.push(ContentBlock::Paragraph(plain.to_string()));
                }
            }
            _ => {}
        }
    }

    blocks
}

fn convert_element(element: ElementRef<'_>, blocks: &mut Vec<ContentBlock>) {
    let tag = element.value().name();

    if let Some(level) = HeadingLevel::from_tag(tag) {
        blocks.push(ContentBlock::Heading {
            level,
            text: trimmed_text(element),
        });
        return;
    }

    match tag {
        "p" | "div" => {
            let text = trimmed_text(element);
            if !text.is_empty() {
                blocks.push(ContentBlock::Paragraph(text));
            }
        }
        "a" => blocks.push(ContentBlock::Link {
            text: trimmed_text(element),
            href: element.value().attr("href").map(str::to_string),
        }),
        "img" => blocks.push(ContentBlock::Image {
            src: element.value().attr("src").map(str::to_string),
        }),
        "ul" => push_list_items(element, false, blocks),
        "ol" => push_list_items(element, true, blocks),
        _ => {}
    }
}

/// Emits every non-empty `li` below `list`, nested ones included
fn push_list_items(list: ElementRef<'_>, ordered: bool, blocks: &mut Vec<ContentBlock>) {
    let Ok(li_selector) = Selector::parse("li") else {
        return;
    };
    for item in list.select(&li_selector) {
        let text = trimmed_text(item);
        if !text.is_empty() {
            blocks.push(ContentBlock::ListItem { text, ordered });
        }
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph(text.to_string())
    }

    #[test]
    fn test_heading_is_trimmed() {
        let blocks = convert_html("<h1>  Title  </h1>");
        assert_eq!(
            blocks,
            vec![ContentBlock::Heading {
                level: HeadingLevel::H1,
                text: "Title".to_string()
            }]
        );
    }

    #[test]
    fn test_heading_levels() {
        let blocks = convert_html("<h1>A</h1><h2>B</h2><h3>C</h3>");
        let levels: Vec<u8> = blocks
            .iter()
            .map(|b| match b {
                ContentBlock::Heading { level, .. } => level.as_u8(),
                other => panic!("unexpected block {:?}", other),
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_heading_still_emitted() {
        let blocks = convert_html("<h2> </h2>");
        assert_eq!(
            blocks,
            vec![ContentBlock::Heading {
                level: HeadingLevel::H2,
                text: String::new()
            }]
        );
    }

    #[test]
    fn test_empty_paragraph_skipped() {
        assert!(convert_html("<p>   </p><div></div>").is_empty());
    }

    #[test]
    fn test_paragraph_and_div() {
        let blocks = convert_html("<p> One </p><div>Two</div>");
        assert_eq!(blocks, vec![paragraph("One"), paragraph("Two")]);
    }

    #[test]
    fn test_nested_markup_is_flattened() {
        let blocks = convert_html("<div><p>Inner</p> <span>tail</span></div>");
        assert_eq!(blocks, vec![paragraph("Inner tail")]);
    }

    #[test]
    fn test_link_and_image() {
        let blocks = convert_html(r#"<a href="/docs"> Docs </a><img src="/a.png" alt="A">"#);
        assert_eq!(
            blocks,
            vec![
                ContentBlock::Link {
                    text: "Docs".to_string(),
                    href: Some("/docs".to_string())
                },
                ContentBlock::Image {
                    src: Some("/a.png".to_string())
                },
            ]
        );
        assert_eq!(blocks[0].display_text(), "Docs (/docs)");
        assert_eq!(blocks[1].display_text(), "Image: /a.png");
    }

    #[test]
    fn test_link_without_href_is_kept() {
        let blocks = convert_html("<a>Anchor</a>");
        assert_eq!(
            blocks,
            vec![ContentBlock::Link {
                text: "Anchor".to_string(),
                href: None
            }]
        );
    }

    #[test]
    fn test_lists_expand_in_place() {
        let html = "<p>Before</p><ul><li>a</li><li> </li><li>b</li></ul><ol><li>one</li></ol><p>After</p>";
        let blocks = convert_html(html);
        assert_eq!(
            blocks,
            vec![
                paragraph("Before"),
                ContentBlock::ListItem {
                    text: "a".to_string(),
                    ordered: false
                },
                ContentBlock::ListItem {
                    text: "b".to_string(),
                    ordered: false
                },
                ContentBlock::ListItem {
                    text: "one".to_string(),
                    ordered: true
                },
                paragraph("After"),
            ]
        );
    }

    #[test]
    fn test_top_level_text_nodes() {
        let blocks = convert_html("Intro <p>Body</p>  Outro  ");
        assert_eq!(
            blocks,
            vec![paragraph("Intro"), paragraph("Body"), paragraph("Outro")]
        );
    }

    #[test]
    fn test_unknown_elements_skipped() {
        assert!(convert_html("<span>x</span><table><tr><td>y</td></tr></table>").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(convert_html("").is_empty());
    }

    #[test]
    fn test_is_deterministic() {
        let html = "<h1>T</h1><p>P</p><ul><li>x</li></ul><img src=\"i.png\">";
        assert_eq!(convert_html(html), convert_html(html));
    }
}
