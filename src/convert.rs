//! Body-to-markup conversion.
//!
//! The renderer only sees the [`ContentConverter`] trait; [`MarkdownConverter`]
//! is the stock implementation backed by `pulldown-cmark`.

use pulldown_cmark::{Options, Parser, html as md_html};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Content conversion failed: {message}")]
pub struct ConversionError {
    pub message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns an opaque article body into display markup (HTML).
///
/// Implementations must be pure: the same body always yields the same
/// markup, and routes are converted concurrently.
pub trait ContentConverter: Send + Sync {
    fn convert(&self, body: &str) -> Result<String, ConversionError>;
}

/// CommonMark plus tables, footnotes, strikethrough and task lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }
}

impl ContentConverter for MarkdownConverter {
    fn convert(&self, body: &str) -> Result<String, ConversionError> {
        let parser = Parser::new_ext(body, Self::options());
        let mut html = String::with_capacity(body.len() * 3 / 2);
        md_html::push_html(&mut html, parser);
        Ok(html)
    }
}
