//! Shared types passed between pipeline stages.
//!
//! A [`Document`] is produced by the validator, a [`Route`] by the route
//! deriver, and a [`RenderedPage`] by the renderer. All three are immutable
//! once built.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Whether draft documents are published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildMode {
    /// Drafts are excluded from the route table.
    #[default]
    Production,
    /// Drafts are published alongside everything else.
    Preview,
}

impl BuildMode {
    pub fn from_drafts_flag(drafts: bool) -> Self {
        if drafts {
            BuildMode::Preview
        } else {
            BuildMode::Production
        }
    }

    pub fn publishes_drafts(self) -> bool {
        matches!(self, BuildMode::Preview)
    }
}

/// A validated article with fully resolved metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// URL-safe identifier, unique across the collection
    pub slug: String,
    /// Record identity: path relative to the content root (`blog/hello.md`)
    pub source: String,
    pub title: String,
    pub date: NaiveDate,
    pub author: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw markdown body, handed to the converter untouched
    #[serde(skip)]
    pub body: String,
}

/// Binding from a published slug to its document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub slug: String,
    /// Site-absolute URL path (`/blog/hello`)
    pub path: String,
    /// Source identity of the bound document
    pub source: String,
    /// Zero-based insertion index among published routes
    pub order: usize,
}

/// Final HTML for one route, not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub slug: String,
    pub path: String,
    /// Output file path relative to the output directory (`blog/hello/index.html`)
    pub output_path: String,
    pub title: String,
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_production() {
        assert_eq!(BuildMode::default(), BuildMode::Production);
        assert!(!BuildMode::Production.publishes_drafts());
    }

    #[test]
    fn drafts_flag_selects_preview() {
        assert_eq!(BuildMode::from_drafts_flag(true), BuildMode::Preview);
        assert_eq!(BuildMode::from_drafts_flag(false), BuildMode::Production);
        assert!(BuildMode::Preview.publishes_drafts());
    }
}
