//! Index synchronizer with the bill full-text transform discipline

use super::traits::{IndexDocument, IndexResult, SearchIndex};
use crate::model::Entity;
use quick_xml::escape::escape;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

/// Strips format-specific line prefixes from raw bill text before indexing.
///
/// Bill deliveries prefix every text line with a token like `T00001:`
/// (page/line marker, optionally followed by a line-number column) or
/// `R00001:` (resolution lines). The raw form must stay on the stored bill —
/// later deliveries are parsed against those prefixes — so the stripped form
/// exists only for the duration of an index submission.
#[derive(Debug, Clone)]
pub struct BillTextFormatter {
    numbered_text: Regex,
    resolution: Regex,
}

impl BillTextFormatter {
    pub fn new() -> Self {
        Self {
            numbered_text: Regex::new(r"^ ?T\d{5}:(\s{3,4}\d{1,2}\s{0,2})?")
                .expect("valid pattern"),
            resolution: Regex::new(r"^ ?R\d{5}:").expect("valid pattern"),
        }
    }

    /// Remove the prefix token (and line-number column, when present) from
    /// every line; lines without a recognized prefix pass through unchanged.
    pub fn strip_line_prefixes(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for line in text.lines() {
            let stripped = if let Some(m) = self.numbered_text.find(line) {
                &line[m.end()..]
            } else if let Some(m) = self.resolution.find(line) {
                &line[m.end()..]
            } else {
                line
            };
            out.push_str(stripped);
            out.push('\n');
        }
        out
    }
}

impl Default for BillTextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes entities into the representations the search engine consumes
/// and submits them.
pub struct IndexSynchronizer {
    engine: Arc<dyn SearchIndex>,
    formatter: BillTextFormatter,
}

impl IndexSynchronizer {
    pub fn new(engine: Arc<dyn SearchIndex>) -> Self {
        Self {
            engine,
            formatter: BillTextFormatter::new(),
        }
    }

    /// Submit an entity to the search index.
    ///
    /// For a bill with non-empty full text, the raw text is saved aside, the
    /// prefix-stripped form is substituted for the submission, and the raw
    /// text is restored afterward whether or not the submission succeeded.
    /// Long ingest runs keep bills in memory across batches; nothing after
    /// this call may observe the transformed text.
    pub fn index(&self, entity: &mut Entity) -> IndexResult<()> {
        let saved = self.substitute_indexable_text(entity);
        let result = self.submit(entity);
        if let (Some(raw), Entity::Bill(bill)) = (saved, &mut *entity) {
            bill.full_text = Some(raw);
        }
        result
    }

    fn substitute_indexable_text(&self, entity: &mut Entity) -> Option<String> {
        let Entity::Bill(bill) = entity else {
            return None;
        };
        match bill.full_text.take() {
            Some(raw) if !raw.is_empty() => {
                bill.full_text = Some(self.formatter.strip_line_prefixes(&raw));
                Some(raw)
            }
            other => {
                bill.full_text = other;
                None
            }
        }
    }

    fn submit(&self, entity: &Entity) -> IndexResult<()> {
        let identity = entity.identity();
        let structured = serde_json::to_value(entity)?;
        let document = IndexDocument {
            key: format!("{}-{}", identity.id, identity.year),
            kind: identity.kind,
            year: identity.year,
            markup: markup_representation(identity.kind.as_str(), &structured),
            structured,
        };
        self.engine.submit(&[document])
    }
}

/// Render the structured form as the flat markup representation the engine's
/// markup channel expects: one element per field, arrays repeated.
fn markup_representation(root: &str, value: &Value) -> String {
    let mut out = String::new();
    write_element(root, value, &mut out);
    out
}

fn write_element(name: &str, value: &Value, out: &mut String) {
    match value {
        Value::Null => {
            out.push('<');
            out.push_str(name);
            out.push_str("/>");
        }
        Value::Object(map) => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            for (key, child) in map {
                if key == "kind" {
                    continue;
                }
                match child {
                    Value::Array(items) => {
                        for item in items {
                            write_element(key, item, out);
                        }
                    }
                    other => write_element(key, other, out),
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Value::Array(items) => {
            for item in items {
                write_element(name, item, out);
            }
        }
        Value::String(s) => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(&escape(s));
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        other => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(&other.to_string());
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}
