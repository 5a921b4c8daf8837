//! Front-matter schema and per-document validation.
//!
//! Turns a [`RawRecord`] into a fully populated [`Document`] or a
//! [`ValidationError`] listing every offending field. Validation is isolated
//! per record: one malformed article is excluded and reported, the rest of
//! the build carries on.
//!
//! ## Schema
//!
//! ```yaml
//! ---
//! title: Hello            # required, non-empty
//! date: 2025-06-04        # required, calendar date (RFC 3339 timestamps accepted)
//! author: Jane            # required, non-empty
//! tags: [release, rust]   # optional, default empty; a single string is one tag
//! draft: false            # optional, default false
//! thumbnail: /img/a.png   # optional
//! description: Summary    # optional
//! slug: custom-slug       # optional, used verbatim; otherwise derived from the file name
//! ---
//! ```
//!
//! Keys outside the schema are ignored.

use crate::naming;
use crate::store::RawRecord;
use crate::types::Document;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// What is wrong with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    Empty,
    Invalid(String),
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "missing"),
            FieldProblem::Empty => write!(f, "empty"),
            FieldProblem::Invalid(reason) => write!(f, "invalid: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field, self.problem)
    }
}

/// A record rejected by the schema. Never fatal to the build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{record}: {}", join_fields(.fields))]
pub struct ValidationError {
    /// Identity of the offending record
    pub record: String,
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.field).collect()
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of validating a whole listing: survivors and rejects, each in
/// input order.
#[derive(Debug, Default)]
pub struct Validation {
    pub documents: Vec<Document>,
    pub excluded: Vec<ValidationError>,
}

/// Validate every record in parallel.
pub fn validate_all(records: &[RawRecord]) -> Validation {
    let results: Vec<Result<Document, ValidationError>> =
        records.par_iter().map(validate).collect();

    let mut validation = Validation::default();
    for result in results {
        match result {
            Ok(doc) => validation.documents.push(doc),
            Err(err) => validation.excluded.push(err),
        }
    }
    validation
}

/// Validate one record against the schema.
pub fn validate(raw: &RawRecord) -> Result<Document, ValidationError> {
    let mut errors = Vec::new();

    let map = match parse_front_matter(raw.front_matter.as_deref()) {
        Ok(map) => map,
        Err(reason) => {
            return Err(ValidationError {
                record: raw.source.clone(),
                fields: vec![FieldError {
                    field: "front-matter",
                    problem: FieldProblem::Invalid(reason),
                }],
            });
        }
    };

    let mut fields = Fields {
        map: &map,
        errors: &mut errors,
    };

    let title = fields.required_string("title");
    let date = fields.date("date");
    let author = fields.required_string("author");
    let tags = fields.tags("tags");
    let draft = fields.flag("draft");
    let thumbnail = fields.optional_string("thumbnail");
    let description = fields.optional_string("description");
    let slug = fields.slug("slug", raw);

    match (title, date, author, slug) {
        (Some(title), Some(date), Some(author), Some(slug)) if errors.is_empty() => Ok(Document {
            slug,
            source: raw.source.clone(),
            title,
            date,
            author,
            tags,
            draft,
            thumbnail,
            description,
            body: raw.body.clone(),
        }),
        _ => Err(ValidationError {
            record: raw.source.clone(),
            fields: errors,
        }),
    }
}

fn parse_front_matter(text: Option<&str>) -> Result<Mapping, String> {
    let Some(text) = text else {
        return Ok(Mapping::new());
    };
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err("expected a key/value mapping".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Field accessors that record problems instead of returning early, so one
/// pass reports everything wrong with a record.
struct Fields<'a> {
    map: &'a Mapping,
    errors: &'a mut Vec<FieldError>,
}

impl Fields<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    fn fail(&mut self, field: &'static str, problem: FieldProblem) {
        self.errors.push(FieldError { field, problem });
    }

    fn required_string(&mut self, field: &'static str) -> Option<String> {
        match self.get(field) {
            None => {
                self.fail(field, FieldProblem::Missing);
                None
            }
            Some(Value::Null) => {
                self.fail(field, FieldProblem::Empty);
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.fail(field, FieldProblem::Empty);
                None
            }
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(_) => {
                self.fail(field, FieldProblem::Invalid("expected a string".into()));
                None
            }
        }
    }

    fn optional_string(&mut self, field: &'static str) -> Option<String> {
        match self.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Some(_) => {
                self.fail(field, FieldProblem::Invalid("expected a string".into()));
                None
            }
        }
    }

    fn date(&mut self, field: &'static str) -> Option<NaiveDate> {
        let raw = self.required_string(field)?;
        match parse_date(&raw) {
            Some(date) => Some(date),
            None => {
                self.fail(
                    field,
                    FieldProblem::Invalid(format!("'{raw}' is not a calendar date")),
                );
                None
            }
        }
    }

    fn tags(&mut self, field: &'static str) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        match self.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => {
                tags.insert(s.trim().to_string());
            }
            Some(Value::Sequence(items)) => {
                for item in items {
                    match item {
                        Value::String(s) => {
                            tags.insert(s.trim().to_string());
                        }
                        _ => {
                            self.fail(field, FieldProblem::Invalid("tags must be strings".into()));
                            return BTreeSet::new();
                        }
                    }
                }
            }
            Some(_) => {
                self.fail(
                    field,
                    FieldProblem::Invalid("expected a list of strings".into()),
                );
            }
        }
        tags.retain(|t| !t.is_empty());
        tags
    }

    fn flag(&mut self, field: &'static str) -> bool {
        match self.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.fail(field, FieldProblem::Invalid("expected true or false".into()));
                false
            }
        }
    }

    fn slug(&mut self, field: &'static str, raw: &RawRecord) -> Option<String> {
        let blank = matches!(self.get(field), Some(Value::String(s)) if s.trim().is_empty());
        if blank {
            self.fail(field, FieldProblem::Empty);
            return None;
        }
        if let Some(explicit) = self.optional_string(field) {
            if naming::is_url_safe(&explicit) {
                return Some(explicit);
            }
            self.fail(
                field,
                FieldProblem::Invalid(format!("'{explicit}' is not URL-safe")),
            );
            return None;
        }
        if self.get(field).is_some_and(|v| !v.is_string() && !v.is_null()) {
            // already reported by optional_string
            return None;
        }

        let derived = naming::slug_from_location(&raw.location);
        if derived.is_empty() {
            self.fail(
                field,
                FieldProblem::Invalid(format!(
                    "cannot derive a slug from '{}'",
                    raw.location.display()
                )),
            );
            return None;
        }
        Some(derived)
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DD[T ]HH:MM:SS`
/// timestamp; only the calendar date is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn complete_record_validates() {
        let raw = record(
            "hello.md",
            "title: Hello\ndate: 2025-06-04\nauthor: Jane\n",
            "Body",
        );
        let doc = validate(&raw).unwrap();

        assert_eq!(doc.slug, "hello");
        assert_eq!(doc.source, "blog/hello.md");
        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
        assert_eq!(doc.author, "Jane");
        assert!(doc.tags.is_empty());
        assert!(!doc.draft);
        assert_eq!(doc.thumbnail, None);
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn optional_fields_resolved() {
        let raw = record(
            "post.md",
            "title: T\ndate: 2025-01-01\nauthor: A\ntags: [rust, release, rust]\ndraft: true\nthumbnail: /img/t.png\ndescription: Short\n",
            "",
        );
        let doc = validate(&raw).unwrap();

        let tags: Vec<&str> = doc.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["release", "rust"]);
        assert!(doc.draft);
        assert_eq!(doc.thumbnail.as_deref(), Some("/img/t.png"));
        assert_eq!(doc.description.as_deref(), Some("Short"));
    }

    #[test]
    fn single_string_tag() {
        let raw = record("p.md", "title: T\ndate: 2025-01-01\nauthor: A\ntags: news\n", "");
        let doc = validate(&raw).unwrap();
        assert!(doc.tags.contains("news"));
        assert_eq!(doc.tags.len(), 1);
    }

    #[test]
    fn missing_author_named() {
        let raw = record("p.md", "title: T\ndate: 2025-01-01\n", "");
        let err = validate(&raw).unwrap_err();

        assert_eq!(err.record, "blog/p.md");
        assert_eq!(err.field_names(), vec!["author"]);
        assert_eq!(err.fields[0].problem, FieldProblem::Missing);
    }

    #[test]
    fn all_missing_fields_reported_together() {
        let raw = record("p.md", "tags: [a]\n", "");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field_names(), vec!["title", "date", "author"]);
    }

    #[test]
    fn no_front_matter_reports_required_fields() {
        let raw = RawRecord::from_text("blog/bare.md", "bare.md", "# Just text");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field_names(), vec!["title", "date", "author"]);
    }

    #[test]
    fn blank_values_are_empty() {
        let raw = record("p.md", "title: '  '\ndate: 2025-01-01\nauthor:\n", "");
        let err = validate(&raw).unwrap_err();

        assert_eq!(err.field_names(), vec!["title", "author"]);
        assert!(err.fields.iter().all(|f| f.problem == FieldProblem::Empty));
    }

    #[test]
    fn unparseable_date_is_invalid() {
        let raw = record("p.md", "title: T\ndate: June 4th\nauthor: A\n", "");
        let err = validate(&raw).unwrap_err();

        assert_eq!(err.field_names(), vec!["date"]);
        assert!(matches!(err.fields[0].problem, FieldProblem::Invalid(_)));
    }

    #[test]
    fn impossible_calendar_date_is_invalid() {
        let raw = record("p.md", "title: T\ndate: 2025-02-30\nauthor: A\n", "");
        assert!(validate(&raw).is_err());
    }

    #[test]
    fn wrong_types_are_invalid() {
        let raw = record(
            "p.md",
            "title: T\ndate: 2025-01-01\nauthor: A\ndraft: maybe\ntags: [1, 2]\n",
            "",
        );
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field_names(), vec!["tags", "draft"]);
    }

    #[test]
    fn malformed_yaml_is_front_matter_error() {
        let raw = record("p.md", "title: [unclosed\n", "");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field_names(), vec!["front-matter"]);
    }

    #[test]
    fn non_mapping_front_matter_is_error() {
        let raw = record("p.md", "- just\n- a list\n", "");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field_names(), vec!["front-matter"]);
    }

    #[test]
    fn explicit_slug_used_verbatim() {
        let raw = record(
            "Some File.md",
            "title: T\ndate: 2025-01-01\nauthor: A\nslug: Custom_Slug\n",
            "",
        );
        assert_eq!(validate(&raw).unwrap().slug, "Custom_Slug");
    }

    #[test]
    fn unsafe_explicit_slug_rejected() {
        let raw = record(
            "p.md",
            "title: T\ndate: 2025-01-01\nauthor: A\nslug: ../escape\n",
            "",
        );
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field_names(), vec!["slug"]);
    }

    #[test]
    fn blank_explicit_slug_is_empty() {
        for value in ["\"\"", "'   '"] {
            let fm = format!("title: T\ndate: 2025-01-01\nauthor: A\nslug: {value}\n");
            let err = validate(&record("p.md", &fm, "")).unwrap_err();
            assert_eq!(err.field_names(), vec!["slug"]);
            assert_eq!(err.fields[0].problem, FieldProblem::Empty);
        }
    }

    #[test]
    fn null_slug_falls_back_to_file_name() {
        let raw = record("p.md", "title: T\ndate: 2025-01-01\nauthor: A\nslug:\n", "");
        assert_eq!(validate(&raw).unwrap().slug, "p");
    }

    #[test]
    fn underivable_slug_rejected() {
        let raw = record("---.md", "title: T\ndate: 2025-01-01\nauthor: A\n", "");
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.field_names(), vec!["slug"]);
    }

    #[test]
    fn unknown_keys_ignored() {
        let raw = record(
            "p.md",
            "title: T\ndate: 2025-01-01\nauthor: A\nlayout: post\n",
            "",
        );
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn error_display_lists_fields() {
        let raw = record("p.md", "date: nope\n", "");
        let msg = validate(&raw).unwrap_err().to_string();
        assert!(msg.starts_with("blog/p.md: "));
        assert!(msg.contains("title (missing)"));
        assert!(msg.contains("date (invalid: 'nope' is not a calendar date)"));
        assert!(msg.contains("author (missing)"));
    }

    // =========================================================================
    // Date parsing
    // =========================================================================

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 4);
        assert_eq!(parse_date("2025-06-04"), expected);
        assert_eq!(parse_date("2025-06-04T10:30:00Z"), expected);
        assert_eq!(parse_date("2025-06-04T23:30:00-02:00"), expected);
        assert_eq!(parse_date("2025-06-04T10:30:00"), expected);
        assert_eq!(parse_date("2025-06-04 10:30:00"), expected);
        assert_eq!(parse_date("04/06/2025"), None);
    }

    // =========================================================================
    // Batch validation
    // =========================================================================

    #[test]
    fn validate_all_isolates_failures_and_keeps_order() {
        let records = vec![
            record("a.md", "title: A\ndate: 2025-01-01\nauthor: X\n", ""),
            record("b.md", "title: B\ndate: 2025-01-02\n", ""),
            record("c.md", "title: C\ndate: 2025-01-03\nauthor: Z\n", ""),
        ];
        let validation = validate_all(&records);

        let slugs: Vec<&str> = validation.documents.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);
        assert_eq!(validation.excluded.len(), 1);
        assert_eq!(validation.excluded[0].record, "blog/b.md");
    }
}
