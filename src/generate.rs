//! Build driver: content root in, static article pages out.
//!
//! ```text
//! 1. Load      config.toml          →  SiteConfig
//! 2. List      blog/**/*.md         →  raw records         (fatal on I/O error)
//! 3. Validate  raw records          →  documents + excluded (per-record, parallel)
//! 4. Route     documents            →  route table          (fatal on duplicate slug)
//! 5. Render    route table          →  rendered pages       (parallel, fatal on any failure)
//! 6. Write     rendered pages       →  dist/blog/{slug}/index.html
//! ```
//!
//! Nothing is written until every route has rendered, so a failed build
//! leaves no half-published site behind. Stages 1–4 are exposed on their own
//! as [`plan`] for `check` and `routes`.

use crate::collection::Collection;
use crate::config::{self, ConfigError, SiteConfig};
use crate::convert::{ContentConverter, MarkdownConverter};
use crate::metadata::{self, ValidationError};
use crate::render::{RenderError, Renderer};
use crate::routes::{self, DuplicateRouteError, RouteTable};
use crate::shell::{PageShell, SiteShell};
use crate::store::{ContentSource, FsStore, StoreError};
use crate::types::{BuildMode, RenderedPage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    DuplicateRoute(#[from] DuplicateRouteError),
    #[error("{} page(s) failed to render", .0.len())]
    Render(Vec<RenderError>),
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything known about a build before rendering.
#[derive(Debug)]
pub struct Plan {
    pub config: SiteConfig,
    pub collection: Collection,
    pub routes: RouteTable,
    /// Records dropped by validation, in listing order
    pub excluded: Vec<ValidationError>,
}

/// Outcome of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    pub pages: Vec<RenderedPage>,
    pub excluded: Vec<ValidationError>,
}

/// Load config from the content root and plan from its blog directory.
pub fn plan(source_root: &Path, mode: BuildMode) -> Result<Plan, BuildError> {
    let config = config::load_config(source_root)?;
    let store = FsStore::new(source_root, &config.blog.dir);
    plan_from(&store, config, mode)
}

/// Plan from any content source with an already-loaded config.
pub fn plan_from(
    store: &dyn ContentSource,
    config: SiteConfig,
    mode: BuildMode,
) -> Result<Plan, BuildError> {
    let records = store.list_all()?;
    let validation = metadata::validate_all(&records);
    let collection = Collection::new(validation.documents);
    let routes = routes::derive_routes(collection.all(), mode, &config.blog.base_path)?;

    Ok(Plan {
        config,
        collection,
        routes,
        excluded: validation.excluded,
    })
}

/// Render every route in the plan with the stock converter and shell.
pub fn render(plan: &Plan) -> Result<Vec<RenderedPage>, BuildError> {
    let shell = SiteShell::new(&plan.config.site);
    render_with(plan, &MarkdownConverter, &shell)
}

/// Render every route with caller-supplied collaborators.
pub fn render_with(
    plan: &Plan,
    converter: &dyn ContentConverter,
    shell: &dyn PageShell,
) -> Result<Vec<RenderedPage>, BuildError> {
    let renderer = Renderer::new(
        &plan.collection,
        converter,
        shell,
        &plan.config.blog.date_format,
    );
    renderer
        .render_all(plan.routes.as_slice())
        .map_err(BuildError::Render)
}

/// Write rendered pages under `output_dir`, one file per route.
pub fn write_pages(pages: &[RenderedPage], output_dir: &Path) -> Result<(), BuildError> {
    for page in pages {
        let path = output_dir.join(&page.output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &page.html).map_err(|source| BuildError::Io { path, source })?;
    }
    Ok(())
}

/// Run the full pipeline and write the site.
pub fn build(source_root: &Path, output_dir: &Path, mode: BuildMode) -> Result<BuildReport, BuildError> {
    let plan = plan(source_root, mode)?;
    let pages = render(&plan)?;
    write_pages(&pages, output_dir)?;
    Ok(BuildReport {
        pages,
        excluded: plan.excluded,
    })
}
