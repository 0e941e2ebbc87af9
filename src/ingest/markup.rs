//! Markup normalization and extraction
//!
//! Calendar markup arrives embedded in batch deliveries and is frequently
//! malformed: bare ampersands, stray control characters, carriage returns.
//! `fix_calendar_markup` repairs a file in place before structural parsing;
//! `extract_markup` pulls embedded markup blocks out of batch files without
//! ingesting anything.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Repair malformed markup in place. Returns whether the file changed.
pub fn fix_calendar_markup(path: &Path) -> io::Result<bool> {
    let raw = fs::read_to_string(path)?;
    let fixed = fix_markup_text(&raw);
    if fixed == raw {
        return Ok(false);
    }
    fs::write(path, fixed)?;
    Ok(true)
}

/// Line-level markup repair: strip control characters and carriage returns,
/// escape ampersands that do not begin a character reference.
pub fn fix_markup_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        let cleaned: String = line
            .chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .collect();
        out.push_str(&escape_bare_ampersands(&cleaned));
        out.push('\n');
    }
    out
}

fn escape_bare_ampersands(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let bytes = line.as_bytes();
    for (i, c) in line.char_indices() {
        if c != '&' {
            out.push(c);
            continue;
        }
        if is_character_reference(&bytes[i + 1..]) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
    }
    out
}

/// An ampersand starts a character reference when followed by an entity name
/// or `#` digits and a semicolon within a short window.
fn is_character_reference(rest: &[u8]) -> bool {
    let window = &rest[..rest.len().min(10)];
    let Some(semi) = window.iter().position(|b| *b == b';') else {
        return false;
    };
    if semi == 0 {
        return false;
    }
    let name = &window[..semi];
    if name[0] == b'#' {
        name.len() > 1 && name[1..].iter().all(u8::is_ascii_digit)
    } else {
        name.iter().all(u8::is_ascii_alphanumeric)
    }
}

/// Extract embedded markup blocks (`<SENATEDATA>` .. `</SENATEDATA>`) from
/// every batch file under `root` into sibling `<stem>.markup.xml` files.
/// Returns the number of files that yielded a block. A file that cannot be
/// read or written is logged and skipped; the walk continues.
pub fn extract_markup(root: &Path) -> usize {
    let mut extracted = 0;
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "xml") {
            continue;
        }
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "unreadable file, skipping");
                continue;
            }
        };
        if let Some(block) = embedded_markup_block(&raw) {
            let target = path.with_extension("markup.xml");
            if let Err(err) = fs::write(&target, block) {
                warn!(file = %path.display(), error = %err, "cannot write markup file, skipping");
                continue;
            }
            info!(source = %path.display(), target = %target.display(), "extracted embedded markup");
            extracted += 1;
        }
    }
    extracted
}

fn embedded_markup_block(raw: &str) -> Option<String> {
    let mut block = String::new();
    let mut inside = false;
    for line in raw.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("<SENATEDATA") {
            inside = true;
        }
        if inside {
            block.push_str(line);
            block.push('\n');
        }
        if trimmed.starts_with("</SENATEDATA") {
            inside = false;
        }
    }
    if block.is_empty() {
        None
    } else {
        Some(block)
    }
}
