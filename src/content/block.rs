use std::fmt;

/// Heading depth retained by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Maps `h1`..`h3` to a level; any other tag yields None
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }

    /// Paragraph style id used in the generated word-processor document
    pub fn style_id(&self) -> &'static str {
        match self {
            Self::H1 => "Heading1",
            Self::H2 => "Heading2",
            Self::H3 => "Heading3",
        }
    }
}

/// One structural unit of a converted page, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Heading { level: HeadingLevel, text: String },

    Paragraph(String),

    /// Anchor text and its target, if the anchor had one
    Link { text: String, href: Option<String> },

    Image { src: Option<String> },

    ListItem { text: String, ordered: bool },
}

impl ContentBlock {
    /// The single line of text this block renders as
    ///
    /// Links render as `text (href)` and images as `Image: src`; a missing
    /// attribute renders as an empty string.
    pub fn display_text(&self) -> String {
        match self {
            Self::Heading { text, .. } | Self::Paragraph(text) | Self::ListItem { text, .. } => {
                text.clone()
            }
            Self::Link { text, href } => {
                format!("{} ({})", text, href.as_deref().unwrap_or_default())
            }
            Self::Image { src } => format!("Image: {}", src.as_deref().unwrap_or_default()),
        }
    }
}

impl fmt::Display for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}
