//! Document store: discovery of raw article records.
//!
//! Stage 1 of the build. A [`ContentSource`] yields every raw record in one
//! shot; nothing is parsed here beyond splitting the front-matter block from
//! the body, so a malformed article can still be reported per-document by the
//! validator instead of failing the whole listing.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                      # Content root
//! ├── config.toml               # Site configuration (optional)
//! └── blog/                     # Blog directory (`blog.dir`)
//!     ├── hello.md              # → slug "hello"
//!     ├── 2025/
//!     │   └── launch-notes.md   # → slug "launch-notes"
//!     └── intro/
//!         └── index.md          # → slug "intro"
//! ```
//!
//! Records are listed sorted by file name at every level, which keeps route
//! order stable between builds.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Blog directory not found: {0}")]
    MissingDirectory(PathBuf),
}

/// One article as found in the content source, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Identity used in diagnostics: path relative to the content root
    pub source: String,
    /// Path relative to the blog directory, used to derive the slug
    pub location: PathBuf,
    /// Raw front-matter text between the `---` fences, if the file has any
    pub front_matter: Option<String>,
    pub body: String,
}

impl RawRecord {
    /// Build a record from a file's full text.
    pub fn from_text(source: impl Into<String>, location: impl Into<PathBuf>, text: &str) -> Self {
        let (front_matter, body) = split_front_matter(text);
        Self {
            source: source.into(),
            location: location.into(),
            front_matter: front_matter.map(String::from),
            body: body.to_string(),
        }
    }
}

/// Source of truth for raw records.
///
/// `list_all` is all-or-nothing: an error means the universe of documents is
/// unknown and no routes may be computed from it.
pub trait ContentSource {
    fn list_all(&self) -> Result<Vec<RawRecord>, StoreError>;
}

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Markdown files under a directory on disk.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    blog_dir: PathBuf,
}

impl FsStore {
    /// `blog_dir` is relative to `root`.
    pub fn new(root: impl Into<PathBuf>, blog_dir: impl AsRef<Path>) -> Self {
        let root = root.into();
        let blog_dir = root.join(blog_dir);
        Self { root, blog_dir }
    }
}

impl ContentSource for FsStore {
    fn list_all(&self) -> Result<Vec<RawRecord>, StoreError> {
        if !self.blog_dir.is_dir() {
            return Err(StoreError::MissingDirectory(self.blog_dir.clone()));
        }

        let mut records = Vec::new();
        let walker = WalkDir::new(&self.blog_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown(path) {
                continue;
            }

            let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            // walkdir only yields paths below the roots it was given
            let location = path.strip_prefix(&self.blog_dir).unwrap_or(path);
            let source = path.strip_prefix(&self.root).unwrap_or(path);

            records.push(RawRecord::from_text(
                to_slash(source),
                location.to_path_buf(),
                &text,
            ));
        }

        Ok(records)
    }
}

/// Records held in memory, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<RawRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl ContentSource for MemoryStore {
    fn list_all(&self) -> Result<Vec<RawRecord>, StoreError> {
        Ok(self.records.clone())
    }
}

/// Split a `---` fenced YAML block off the top of a document.
///
/// Returns `(None, text)` when the text does not open with a fence or the
/// fence is never closed.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_fence_line(text) else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            let front_matter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front_matter), body);
        }
        offset += line.len();
    }

    (None, text)
}

fn strip_fence_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.as_str()))
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
