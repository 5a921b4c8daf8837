//! Page rendering: one route in, one complete HTML page out.
//!
//! Rendering is a pure function of the route and the collection, so routes
//! are rendered in parallel and fanned in at the end. Any failure fails the
//! build; [`Renderer::render_all`] still renders every route so the build
//! report can list every broken article at once.
//!
//! ## Article Layout
//!
//! ```text
//! article.post
//! ├── header.post-header
//! │   ├── h1                  title
//! │   ├── p.post-author       "By Jane"
//! │   └── time.post-date      "04 Jun 2025"
//! ├── img.post-thumbnail      (optional)
//! ├── div.post-body           converted markdown
//! └── ul.post-tags            (only when tagged)
//! ```

use crate::collection::{Collection, NotFoundError};
use crate::convert::{ContentConverter, ConversionError};
use crate::shell::{PageShell, ShellContext};
use crate::types::{Document, RenderedPage, Route};
use maud::{Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The route table and the collection disagree: an internal bug.
    #[error("Route desynchronized from collection: {0}")]
    NotFound(#[from] NotFoundError),
    #[error("Failed to render '{slug}': {source}")]
    Conversion {
        slug: String,
        #[source]
        source: ConversionError,
    },
}

/// Output file for a route path: `/blog/hello` → `blog/hello/index.html`.
pub fn output_path(route_path: &str) -> String {
    let trimmed = route_path.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else {
        format!("{trimmed}/index.html")
    }
}

pub struct Renderer<'a> {
    collection: &'a Collection,
    converter: &'a dyn ContentConverter,
    shell: &'a dyn PageShell,
    date_format: &'a str,
}

impl<'a> Renderer<'a> {
    /// `date_format` must already be validated (see `SiteConfig::validate`).
    pub fn new(
        collection: &'a Collection,
        converter: &'a dyn ContentConverter,
        shell: &'a dyn PageShell,
        date_format: &'a str,
    ) -> Self {
        Self {
            collection,
            converter,
            shell,
            date_format,
        }
    }

    pub fn render(&self, route: &Route) -> Result<RenderedPage, RenderError> {
        let doc = self.collection.by_id(&route.slug)?;

        let body = self
            .converter
            .convert(&doc.body)
            .map_err(|source| RenderError::Conversion {
                slug: route.slug.clone(),
                source,
            })?;

        let page = ShellContext {
            title: &doc.title,
            description: doc.description.as_deref(),
        };
        let html = self
            .shell
            .wrap(&page, article(doc, self.date_format, &body))
            .into_string();

        Ok(RenderedPage {
            slug: route.slug.clone(),
            path: route.path.clone(),
            output_path: output_path(&route.path),
            title: doc.title.clone(),
            html,
        })
    }

    /// Render every route in parallel. Returns all pages in route order, or
    /// every error in route order if any route failed.
    pub fn render_all(&self, routes: &[Route]) -> Result<Vec<RenderedPage>, Vec<RenderError>> {
        let results: Vec<Result<RenderedPage, RenderError>> =
            routes.par_iter().map(|route| self.render(route)).collect();

        let mut pages = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(page) => pages.push(page),
                Err(err) => errors.push(err),
            }
        }

        if errors.is_empty() {
            Ok(pages)
        } else {
            Err(errors)
        }
    }
}

/// Formats a date with a strftime string, e.g. `%d %b %Y` → `04 Jun 2025`.
///
/// Formats a bare date cannot render (time or zone specifiers) fall back to
/// `YYYY-MM-DD` instead of panicking in a render worker.
pub fn format_date(date: &chrono::NaiveDate, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => date.format("%Y-%m-%d").to_string(),
    }
}

/// Renders the article region: author, date, then the converted body
fn article(doc: &Document, date_format: &str, body_html: &str) -> Markup {
    html! {
        article.post {
            header.post-header {
                h1 { (doc.title) }
                p.post-author { "By " (doc.author) }
                time.post-date datetime=(doc.date.format("%Y-%m-%d").to_string()) {
                    (format_date(&doc.date, date_format))
                }
            }
            @if let Some(thumbnail) = &doc.thumbnail {
                img.post-thumbnail src=(thumbnail) alt=(doc.title) loading="lazy";
            }
            div.post-body {
                (PreEscaped(body_html))
            }
            @if !doc.tags.is_empty() {
                ul.post-tags {
                    @for tag in &doc.tags {
                        li.post-tag { (tag) }
                    }
                }
            }
        }
    }
}
