//! # Simple Blog
//!
//! A minimal static builder for a product blog. Articles are markdown files
//! with a YAML front-matter block; each valid article becomes one page at a
//! stable URL (`/blog/{slug}`), wrapped in a shared page shell.
//!
//! # Architecture: Single-Pass Pipeline
//!
//! ```text
//! Document Store → Validator → Collection → Route Deriver → Page Renderer → dist/
//!    (store)       (metadata)  (collection)    (routes)        (render)     (generate)
//! ```
//!
//! The pipeline runs once per build, to completion or failure. There is no
//! server and no persistent state.
//!
//! - A malformed article is **excluded and reported**; the rest still publish.
//! - Two articles claiming the same slug **abort the build**, naming both files.
//! - A route whose page fails to render **fails the build**, and nothing is
//!   written: a failed build never leaves a partial site.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Content source trait, directory walk, front-matter splitting |
//! | [`metadata`] | Front-matter schema, per-record validation |
//! | [`naming`] | Slug derivation and URL-safety rules |
//! | [`collection`] | Read-only query API: `all`, `by_id`, `by_tag` |
//! | [`routes`] | Route table derivation, duplicate detection, draft filtering |
//! | [`convert`] | Body → markup converter trait, `pulldown-cmark` implementation |
//! | [`shell`] | Shared page chrome, rendered with Maud |
//! | [`render`] | One route → one page; parallel render with fan-in |
//! | [`generate`] | End-to-end build driver and artifact writing |
//! | [`config`] | `config.toml` loading, merging over defaults, validation |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared data model: `Document`, `Route`, `RenderedPage`, `BuildMode` |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! The shell and article layout are written with [Maud](https://maud.lambda.xyz/):
//! malformed markup is a compile error and every interpolated metadata value
//! is escaped. Only converter output is inserted pre-escaped.
//!
//! ## Explicit Collaborators
//!
//! The renderer never knows it is dealing with markdown or with a particular
//! site layout: it takes a [`convert::ContentConverter`] and a
//! [`shell::PageShell`]. Tests swap in failing converters to exercise the
//! error paths.
//!
//! ## Drafts
//!
//! `draft: true` articles are validated and take part in slug uniqueness in
//! every build, but only publish in preview mode (`--drafts`). Flipping the
//! mode therefore never turns a clean build into an ambiguous one.

pub mod collection;
pub mod config;
pub mod convert;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod render;
pub mod routes;
pub mod shell;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
