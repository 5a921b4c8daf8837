//! CLI output formatting for every command.
//!
//! Each command has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper writing to stdout. Format functions are pure, so the
//! diagnostics are unit-tested without capturing stdout.
//!
//! # Output Format
//!
//! ## Check / Routes
//!
//! ```text
//! Routes
//! 001 /blog/hello
//!     Source: blog/hello.md
//! 002 /blog/launch-notes
//!     Source: blog/2025/launch-notes.md
//!
//! Excluded
//!     blog/broken.md
//!         author (missing)
//!
//! 2 routes, 1 excluded
//! ```
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 Hello → blog/hello/index.html
//! 002 Launch Notes → blog/launch-notes/index.html
//!
//! Generated 2 pages, 1 excluded
//! ```

use crate::generate::{BuildReport, Plan};
use crate::metadata::ValidationError;
use crate::render::RenderError;
use crate::routes::RouteTable;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Validation exclusions, one record per entry with its field problems.
pub fn format_excluded(excluded: &[ValidationError]) -> Vec<String> {
    let mut lines = Vec::new();
    if excluded.is_empty() {
        return lines;
    }
    lines.push("Excluded".to_string());
    for err in excluded {
        lines.push(format!("{}{}", indent(1), err.record));
        for field in &err.fields {
            lines.push(format!("{}{}", indent(2), field));
        }
    }
    lines
}

/// The route table in publish order.
pub fn format_routes(routes: &RouteTable) -> Vec<String> {
    let mut lines = vec!["Routes".to_string()];
    for route in routes {
        lines.push(format!("{} {}", format_index(route.order + 1), route.path));
        lines.push(format!("{}Source: {}", indent(1), route.source));
    }
    lines
}

/// `check` / `routes`: route table, exclusions, summary.
pub fn format_check_output(plan: &Plan) -> Vec<String> {
    let mut lines = format_routes(&plan.routes);

    let excluded = format_excluded(&plan.excluded);
    if !excluded.is_empty() {
        lines.push(String::new());
        lines.extend(excluded);
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {} excluded",
        plural(plan.routes.len(), "route"),
        plan.excluded.len()
    ));
    lines
}

pub fn print_check_output(plan: &Plan) {
    for line in format_check_output(plan) {
        println!("{}", line);
    }
}

/// `build`: generated pages, exclusions, summary.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            page.title,
            page.output_path
        ));
    }

    let excluded = format_excluded(&report.excluded);
    if !excluded.is_empty() {
        lines.push(String::new());
        lines.extend(excluded);
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {} excluded",
        plural(report.pages.len(), "page"),
        report.excluded.len()
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Per-route render failures.
pub fn format_render_errors(errors: &[RenderError]) -> Vec<String> {
    let mut lines = vec!["Render failures".to_string()];
    for err in errors {
        lines.push(format!("{}{}", indent(1), err));
    }
    lines
}

pub fn print_render_errors(errors: &[RenderError]) {
    for line in format_render_errors(errors) {
        eprintln!("{}", line);
    }
}
