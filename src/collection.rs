//! Read-only query API over the validated document set.
//!
//! The collection is an arena: documents live in a `Vec` in insertion order
//! and a slug index points into it. Nothing is re-scanned after
//! construction and no mutation is exposed.

use crate::types::Document;
use std::collections::HashMap;
use thiserror::Error;

/// Lookup of a slug that no validated document carries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No document with slug '{slug}'")]
pub struct NotFoundError {
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct Collection {
    documents: Vec<Document>,
    by_slug: HashMap<String, usize>,
}

impl Collection {
    /// Index documents by slug. When slugs collide the first document keeps
    /// the index entry; the route deriver is what rejects the collision.
    pub fn new(documents: Vec<Document>) -> Self {
        let mut by_slug = HashMap::with_capacity(documents.len());
        for (idx, doc) in documents.iter().enumerate() {
            by_slug.entry(doc.slug.clone()).or_insert(idx);
        }
        Self { documents, by_slug }
    }

    /// Every document in insertion order. Each call starts a fresh pass.
    pub fn all(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn by_id(&self, slug: &str) -> Result<&Document, NotFoundError> {
        self.by_slug
            .get(slug)
            .map(|&idx| &self.documents[idx])
            .ok_or_else(|| NotFoundError {
                slug: slug.to_string(),
            })
    }

    /// Documents carrying `tag`, in insertion order.
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Document> + 'a {
        self.documents.iter().filter(move |d| d.tags.contains(tag))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
