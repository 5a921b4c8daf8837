//! Slug rules shared by the validator and the route deriver.
//!
//! A document's slug is either declared explicitly in its front-matter (used
//! verbatim, but it must be URL-safe) or derived from where the file lives:
//!
//! - `hello.md` → `hello`
//! - `Launch Notes.md` → `launch-notes`
//! - `2025/intro/index.md` → `intro` (an `index` file takes its directory's name)
//!
//! Derived slugs are always URL-safe; an empty result means the location has
//! no usable name and the document is rejected.

use std::path::Path;

/// Lowercase ASCII alphanumerics; every other run of characters becomes a
/// single dash. Leading and trailing dashes are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Derive a slug from a document's location relative to the blog directory.
pub fn slug_from_location(location: &Path) -> String {
    let stem = location
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.eq_ignore_ascii_case("index")
        && let Some(parent) = location.parent().and_then(|p| p.file_name())
    {
        return slugify(&parent.to_string_lossy());
    }
    slugify(&stem)
}

/// An explicit slug may only contain `[A-Za-z0-9_-]`.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases() {
        assert_eq!(slugify("Hello"), "hello");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Launch  Notes -- v2"), "launch-notes-v2");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  _intro_ "), "intro");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("café-menu"), "caf-menu");
    }

    #[test]
    fn slugify_empty_when_nothing_usable() {
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn location_uses_file_stem() {
        assert_eq!(slug_from_location(Path::new("hello.md")), "hello");
        assert_eq!(
            slug_from_location(Path::new("2025/Big Release.md")),
            "big-release"
        );
    }

    #[test]
    fn index_file_takes_directory_name() {
        assert_eq!(slug_from_location(Path::new("intro/index.md")), "intro");
        assert_eq!(slug_from_location(Path::new("a/Deep Dive/INDEX.md")), "deep-dive");
    }

    #[test]
    fn top_level_index_keeps_its_name() {
        assert_eq!(slug_from_location(Path::new("index.md")), "index");
    }

    #[test]
    fn url_safe_accepts_dashes_and_underscores() {
        assert!(is_url_safe("my_post-2"));
        assert!(is_url_safe("Intro"));
    }

    #[test]
    fn url_safe_rejects_separators_and_spaces() {
        assert!(!is_url_safe(""));
        assert!(!is_url_safe("a/b"));
        assert!(!is_url_safe("two words"));
        assert!(!is_url_safe("../up"));
    }
}
