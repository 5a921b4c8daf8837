//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The user file sits
//! in the content root and is layered over stock defaults, so it only needs
//! the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Blog"            # Site name in the header and page titles
//! description = ""          # Fallback meta description
//! footer = ""               # Footer text (omitted when empty)
//!
//! [[site.nav]]              # Header links, repeatable
//! label = "Home"
//! href = "/"
//!
//! [blog]
//! dir = "blog"              # Content subdirectory holding articles
//! base_path = "/blog"       # URL prefix for article routes
//! date_format = "%d %b %Y"  # strftime format, e.g. "04 Jun 2025"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page shell settings: site title, nav links, footer.
    pub site: SiteSection,
    /// Article discovery and routing.
    pub blog: BlogConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blog.dir.trim().is_empty() {
            return Err(ConfigError::Validation("blog.dir must not be empty".into()));
        }
        let base = &self.blog.base_path;
        if !base.starts_with('/') {
            return Err(ConfigError::Validation(
                "blog.base_path must start with '/'".into(),
            ));
        }
        if base.len() > 1 && base.ends_with('/') {
            return Err(ConfigError::Validation(
                "blog.base_path must not end with '/'".into(),
            ));
        }
        if !is_valid_date_format(&self.blog.date_format) {
            return Err(ConfigError::Validation(format!(
                "blog.date_format '{}' is not a valid strftime format",
                self.blog.date_format
            )));
        }
        for link in &self.site.nav {
            if link.label.trim().is_empty() || link.href.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "site.nav entries need both label and href".into(),
                ));
            }
        }
        Ok(())
    }
}

/// A format is usable only if a bare calendar date can render it: time and
/// zone specifiers (`%H`, `%z`, ...) parse fine but fail at format time.
fn is_valid_date_format(format: &str) -> bool {
    if format.trim().is_empty() || StrftimeItems::new(format).any(|item| item == Item::Error) {
        return false;
    }
    let sample = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap_or_default();
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).is_ok()
}

/// Shared page-shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    /// Used as the meta description when an article has none.
    pub description: String,
    pub footer: String,
    pub nav: Vec<NavLink>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            footer: String::new(),
            nav: Vec::new(),
        }
    }
}

/// A header navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Article discovery and routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Directory under the content root that holds articles.
    pub dir: String,
    /// URL prefix every article route is served under.
    pub base_path: String,
    /// strftime format for the date line of a rendered article.
    pub date_format: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            dir: "blog".to_string(),
            base_path: "/blog".to_string(),
            date_format: "%d %b %Y".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel validation/render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Blog Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root (next to the blog directory).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page shell
# ---------------------------------------------------------------------------
[site]
# Site name, shown in the header and appended to every page title.
title = "Blog"

# Meta description for articles that don't set their own.
description = ""

# Footer text. Leave empty to omit the footer line.
footer = ""

# Header links. Repeat the block for each link.
# [[site.nav]]
# label = "Home"
# href = "/"

# ---------------------------------------------------------------------------
# Articles
# ---------------------------------------------------------------------------
[blog]
# Directory under the content root holding markdown articles.
dir = "blog"

# URL prefix for article routes: /blog/{slug}
base_path = "/blog"

# strftime format for article dates ("%d %b %Y" -> "04 Jun 2025").
date_format = "%d %b %Y"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for validation and rendering.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
