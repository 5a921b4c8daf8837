//! Shared test utilities for the simple-blog test suite.
//!
//! Builders for raw records and documents so unit tests can exercise one
//! stage without walking a directory.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let raw = record("hello.md", "title: Hello\ndate: 2025-06-04\nauthor: Jane\n", "Body");
//! let post = doc_with_tags("hello", &["release"]);
//! let collection = collection_of(vec![post]);
//! ```

use crate::collection::Collection;
use crate::store::RawRecord;
use crate::types::Document;
use chrono::NaiveDate;
use std::path::PathBuf;

/// A raw record at `blog/<location>` with the given front-matter text.
pub fn record(location: &str, front_matter: &str, body: &str) -> RawRecord {
    RawRecord {
        source: format!("blog/{location}"),
        location: PathBuf::from(location),
        front_matter: Some(front_matter.to_string()),
        body: body.to_string(),
    }
}

/// Calendar date. Panics on an impossible date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// A valid, published document whose source is `blog/<slug>.md`.
pub fn doc(slug: &str) -> Document {
    Document {
        slug: slug.to_string(),
        source: format!("blog/{slug}.md"),
        title: format!("Title {slug}"),
        date: date(2025, 1, 1),
        author: "Author".to_string(),
        tags: Default::default(),
        draft: false,
        thumbnail: None,
        description: None,
        body: format!("Body of {slug}"),
    }
}

pub fn doc_with_tags(slug: &str, tags: &[&str]) -> Document {
    Document {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..doc(slug)
    }
}

pub fn collection_of(documents: Vec<Document>) -> Collection {
    Collection::new(documents)
}
