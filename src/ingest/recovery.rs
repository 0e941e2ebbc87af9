//! Transcript recovery: one fix-and-retry cycle for malformed raw text
//!
//! Transcripts often arrive incorrectly formatted. The recovery cycle is
//! Attempt -> Fix -> Retry: parse the raw text, and on failure normalize the
//! lines, write the corrected text back to the source file, and parse exactly
//! once more. A second failure ends the cycle; persistently malformed input
//! is never looped on.

use super::traits::{ParseError, TranscriptParser};
use crate::model::Transcript;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Terminal result of one recovery cycle
#[derive(Debug)]
pub enum RecoveryOutcome {
    /// Parsed, at the first attempt or after the fix-and-retry cycle.
    Parsed {
        transcript: Transcript,
        /// Whether the source file was rewritten with normalized lines
        repaired: bool,
    },
    /// Both the attempt and the retry failed; no entity was produced.
    Failed {
        attempt: ParseError,
        retry: ParseError,
    },
}

enum State {
    Attempt,
    Fix(ParseError),
    Retry(ParseError),
}

/// Runs the recovery state machine over one raw transcript file.
pub struct TranscriptRecovery {
    parser: Box<dyn TranscriptParser>,
}

impl TranscriptRecovery {
    pub fn new(parser: Box<dyn TranscriptParser>) -> Self {
        Self { parser }
    }

    /// Parse the file at `path`, repairing it in place if the first attempt
    /// fails. Only I/O errors propagate; parse failures end in
    /// [`RecoveryOutcome::Failed`].
    pub fn recover(&self, path: &Path) -> std::io::Result<RecoveryOutcome> {
        let mut state = State::Attempt;
        loop {
            state = match state {
                State::Attempt => match self.parser.parse_transcript(&fs::read_to_string(path)?) {
                    Ok(transcript) => {
                        return Ok(RecoveryOutcome::Parsed {
                            transcript,
                            repaired: false,
                        })
                    }
                    Err(err) => State::Fix(err),
                },
                State::Fix(attempt) => {
                    info!(file = %path.display(), error = %attempt, "transcript parse failed, normalizing source");
                    let fixed = normalize_lines(&fs::read_to_string(path)?);
                    fs::write(path, &fixed)?;
                    State::Retry(attempt)
                }
                State::Retry(attempt) => {
                    match self.parser.parse_transcript(&fs::read_to_string(path)?) {
                        Ok(transcript) => {
                            return Ok(RecoveryOutcome::Parsed {
                                transcript,
                                repaired: true,
                            })
                        }
                        Err(retry) => {
                            warn!(file = %path.display(), error = %retry, "transcript parse failed after repair, discarding");
                            return Ok(RecoveryOutcome::Failed { attempt, retry });
                        }
                    }
                }
            };
        }
    }
}

/// Line-level format repair: strip carriage returns and control characters,
/// then restore the numbered-line layout by renumbering every non-blank line
/// sequentially, keeping whatever text followed an existing number column.
pub fn normalize_lines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut line_no = 0u32;
    for line in raw.lines() {
        let cleaned: String = line
            .chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .collect();
        if cleaned.trim().is_empty() {
            out.push('\n');
            continue;
        }
        line_no += 1;
        out.push_str(&format!("{:>5}  {}", line_no, line_text(&cleaned)));
        out.push('\n');
    }
    out
}

/// The text of a line with any leading line-number column removed.
fn line_text(line: &str) -> &str {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 4 {
        return trimmed;
    }
    trimmed[digits..].trim_start()
}
