//! Parser seam definitions
//!
//! The format-specific token parsers are external collaborators: the
//! dispatcher and recovery logic depend only on these traits. Reference
//! implementations for the standard delivery formats live in
//! [`super::sources`].

use crate::model::{Bill, Calendar, Entity, Transcript};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while parsing a source file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed source: {0}")]
    Malformed(String),
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a bill batch delivery into zero or more bill updates.
pub trait BillBatchParser {
    fn parse_batch(&self, path: &Path) -> ParseResult<Vec<Bill>>;
}

/// Parses calendar markup into zero or more calendar documents.
pub trait CalendarParser {
    fn parse_calendar(&self, path: &Path) -> ParseResult<Vec<Calendar>>;
}

/// Parses committee/agenda markup. The result is mixed: agenda documents
/// plus any incidental bill vote updates the markup carried.
pub trait AgendaParser {
    fn parse_agenda(&self, path: &Path) -> ParseResult<Vec<Entity>>;
}

/// Parses raw transcript text into a transcript document.
pub trait TranscriptParser {
    fn parse_transcript(&self, text: &str) -> ParseResult<Transcript>;
}
