//! Named-placeholder templates checked against the parameter record when loaded
//!
//! Placeholders use the `{{ .FieldName }}` form. Every placeholder is resolved
//! against a known field list at compile time, so a template that references a
//! missing field is rejected before anything is rendered or written.

use super::error::ManifestError;
use super::params::ManifestParams;
use regex::Regex;
use std::sync::OnceLock;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

static FIELD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn field_pattern() -> &'static Regex {
    FIELD_PATTERN.get_or_init(|| {
        Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)$").expect("placeholder pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A parsed template whose placeholders are all known fields
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source` and check every placeholder against `known_fields`
    pub fn compile(source: &str, known_fields: &[&str]) -> Result<Self, ManifestError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut consumed = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let line = line_of(source, consumed + start);
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| ManifestError::TemplateParse {
                line,
                reason: "unclosed placeholder".to_string(),
            })?;

            let body = after_open[..end].trim();
            if body.contains(OPEN) {
                return Err(ManifestError::TemplateParse {
                    line,
                    reason: "nested placeholder".to_string(),
                });
            }

            let name = field_pattern()
                .captures(body)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .ok_or_else(|| ManifestError::TemplateParse {
                    line,
                    reason: format!("expected '.FieldName' inside braces, found '{}'", body),
                })?;

            if !known_fields.contains(&name) {
                return Err(ManifestError::UnknownPlaceholder {
                    name: name.to_string(),
                    line,
                });
            }

            segments.push(Segment::Field(name.to_string()));

            let advance = start + OPEN.len() + end + CLOSE.len();
            consumed += advance;
            rest = &rest[advance..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        crate::log_debug!("Compiled template with {} segments", segments.len());

        Ok(Self { segments })
    }

    /// Compile against the fields of [`ManifestParams`]
    pub fn for_manifest(source: &str) -> Result<Self, ManifestError> {
        Self::compile(source, ManifestParams::FIELDS)
    }

    /// Distinct field names referenced, in order of first use
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Field(name) = segment
                && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    pub fn render(&self, params: &ManifestParams) -> Result<String, ManifestError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = params.lookup(name).ok_or_else(|| ManifestError::Render {
                        field: name.clone(),
                    })?;
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

/// 1-based line number of a byte offset
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
