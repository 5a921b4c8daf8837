//! Route derivation: one published URL per eligible document.
//!
//! Slugs must be unique across the whole validated set, drafts included,
//! compared without regard to ASCII case. A collision aborts the build
//! naming both sources; there is no "last one wins". Drafts are then dropped
//! from the table unless the build runs in preview mode.

use crate::types::{BuildMode, Document, Route};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Duplicate route '{slug}': {first} and {second}")]
pub struct DuplicateRouteError {
    pub slug: String,
    /// Source of the earlier document, in insertion order
    pub first: String,
    pub second: String,
}

/// Ordered set of published routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn get(&self, slug: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// URL path for a slug under `base_path` (`/blog` + `hello` → `/blog/hello`).
pub fn route_path(base_path: &str, slug: &str) -> String {
    format!("{}/{}", base_path.trim_end_matches('/'), slug)
}

/// Build the route table from validated documents.
pub fn derive_routes<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
    mode: BuildMode,
    base_path: &str,
) -> Result<RouteTable, DuplicateRouteError> {
    // keyed case-insensitively: `Intro` and `intro` land on the same file on
    // case-insensitive filesystems
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut routes = Vec::new();

    for doc in documents {
        if let Some(first) = seen.insert(doc.slug.to_ascii_lowercase(), &doc.source) {
            return Err(DuplicateRouteError {
                slug: doc.slug.clone(),
                first: first.to_string(),
                second: doc.source.clone(),
            });
        }

        if doc.draft && !mode.publishes_drafts() {
            continue;
        }

        routes.push(Route {
            slug: doc.slug.clone(),
            path: route_path(base_path, &doc.slug),
            source: doc.source.clone(),
            order: routes.len(),
        });
    }

    Ok(RouteTable { routes })
}
