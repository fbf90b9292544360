//! Content processing for fetched pages
//!
//! This module contains the markup pipeline that runs between fetching and
//! writing:
//! - Sanitization down to a fixed allow-list of structural tags
//! - Conversion of sanitized markup into an ordered list of content blocks

mod block;
mod converter;
mod sanitizer;

pub use block::{ContentBlock, HeadingLevel};
pub use converter::convert_html;
pub use sanitizer::{clean_content, ALLOWED_TAGS};
