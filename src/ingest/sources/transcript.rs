//! Numbered-line session transcript parser
//!
//! Stenographic transcripts carry a line-number column on every line:
//!
//! ```text
//!     1  NEW YORK STATE SENATE
//!     2  THE STENOGRAPHIC RECORD
//!     3  ALBANY, NEW YORK
//!     4  January 8, 2020
//!     5  REGULAR SESSION
//! ```
//!
//! A line without the number column fails the parse, which is what the
//! recovery cycle repairs. The session date is required; location and
//! session kind are taken from the header when present.

use crate::ingest::traits::{ParseError, ParseResult, TranscriptParser};
use crate::model::Transcript;
use chrono::{Datelike, NaiveDate};
use regex::Regex;

pub struct SessionTranscriptParser {
    numbered_line: Regex,
}

impl SessionTranscriptParser {
    pub fn new() -> Self {
        Self {
            numbered_line: Regex::new(r"^\s*(\d{1,4})(?:\s{2}(.*))?$").expect("valid pattern"),
        }
    }
}

impl Default for SessionTranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptParser for SessionTranscriptParser {
    fn parse_transcript(&self, text: &str) -> ParseResult<Transcript> {
        let mut session_date: Option<NaiveDate> = None;
        let mut session_kind: Option<String> = None;
        let mut location: Option<String> = None;

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let captures = self.numbered_line.captures(line).ok_or_else(|| {
                ParseError::Malformed(format!("line {}: missing line-number column", line_no + 1))
            })?;
            let Some(content) = captures.get(2).map(|m| m.as_str().trim()) else {
                continue;
            };

            if session_date.is_none() {
                if let Ok(date) = NaiveDate::parse_from_str(content, "%B %e, %Y") {
                    session_date = Some(date);
                }
            }
            if session_kind.is_none() && content.ends_with("SESSION") {
                session_kind = Some(content.to_string());
            }
            if location.is_none() && content.contains(", NEW YORK") {
                location = Some(content.to_string());
            }
        }

        let session_date = session_date
            .ok_or_else(|| ParseError::Malformed("no session date in header".to_string()))?;

        let mut transcript = Transcript::new(
            transcript_id(session_date, session_kind.as_deref()),
            session_date.year(),
            session_date,
        );
        transcript.session_kind = session_kind;
        transcript.location = location;
        transcript.full_text = text.to_string();
        Ok(transcript)
    }
}

/// `<date>` for regular sessions, `<date>-<kind-slug>` otherwise, so two
/// sessions on the same day store separately.
fn transcript_id(date: NaiveDate, kind: Option<&str>) -> String {
    let date = date.format("%Y-%m-%d");
    match kind {
        Some(kind) if kind != "REGULAR SESSION" => format!("{}-{}", date, slug(kind)),
        _ => date.to_string(),
    }
}

fn slug(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "\
    1  NEW YORK STATE SENATE
    2  THE STENOGRAPHIC RECORD
    3  ALBANY, NEW YORK
    4  January 8, 2020
    5  REGULAR SESSION
    6  THE PRESIDENT: The Senate will come to order.
";

    #[test]
    fn parses_header_fields() {
        let parser = SessionTranscriptParser::new();
        let transcript = parser.parse_transcript(TRANSCRIPT).unwrap();
        assert_eq!(transcript.id, "2020-01-08");
        assert_eq!(transcript.year, 2020);
        assert_eq!(transcript.location.as_deref(), Some("ALBANY, NEW YORK"));
        assert_eq!(transcript.session_kind.as_deref(), Some("REGULAR SESSION"));
        assert_eq!(transcript.full_text, TRANSCRIPT);
    }

    #[test]
    fn extraordinary_sessions_get_a_distinct_id() {
        let parser = SessionTranscriptParser::new();
        let text = TRANSCRIPT.replace("REGULAR SESSION", "EXTRAORDINARY SESSION");
        let transcript = parser.parse_transcript(&text).unwrap();
        assert_eq!(transcript.id, "2020-01-08-extraordinary-session");
    }

    #[test]
    fn unnumbered_line_is_malformed() {
        let parser = SessionTranscriptParser::new();
        let err = parser
            .parse_transcript("NEW YORK STATE SENATE\nJanuary 8, 2020\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn missing_date_is_malformed() {
        let parser = SessionTranscriptParser::new();
        let err = parser
            .parse_transcript("    1  NEW YORK STATE SENATE\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }
}
