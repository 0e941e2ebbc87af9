//! Keyed-line bill batch parser
//!
//! Batch deliveries are plain text, one field per line, multiple bills per
//! file:
//!
//! ```text
//! BILL S100 2020
//! TITLE An act to amend the highway law
//! SPONSOR SMITH
//! COSPONSORS JONES,DOE
//! STATUS IN_SENATE_COMM
//! ACTION 2020-01-08 REFERRED TO TRANSPORTATION
//! VOTE 2020-03-01 FLOOR AYES=SMITH,JONES NAYS=DOE
//! TEXT T00001:   1  SECTION 1.
//! END
//! ```
//!
//! `TEXT` lines accumulate verbatim into the bill's raw full text, prefix
//! tokens included.

use crate::ingest::traits::{BillBatchParser, ParseError, ParseResult};
use crate::model::{Bill, Vote, VoteKind};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub struct BatchFileParser;

impl BillBatchParser for BatchFileParser {
    fn parse_batch(&self, path: &Path) -> ParseResult<Vec<Bill>> {
        let raw = fs::read_to_string(path)?;
        parse_batch_text(&raw)
    }
}

fn parse_batch_text(raw: &str) -> ParseResult<Vec<Bill>> {
    let mut bills = Vec::new();
    let mut current: Option<Bill> = None;
    let mut text_lines: Vec<String> = Vec::new();

    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, rest) = match line.split_once(' ') {
            Some((key, rest)) => (key, rest),
            None => (line, ""),
        };

        if key == "BILL" {
            if let Some(bill) = current.take() {
                bills.push(finish(bill, &mut text_lines));
            }
            current = Some(parse_header(rest, line_no)?);
            continue;
        }
        if key == "END" {
            if let Some(bill) = current.take() {
                bills.push(finish(bill, &mut text_lines));
            }
            continue;
        }

        let bill = current.as_mut().ok_or_else(|| {
            ParseError::Malformed(format!("line {}: field before BILL header", line_no + 1))
        })?;
        match key {
            "TITLE" => bill.title = Some(rest.to_string()),
            "SPONSOR" => bill.sponsor = Some(rest.to_string()),
            "COSPONSORS" => bill.co_sponsors = name_list(rest),
            "SUMMARY" => bill.summary = Some(rest.to_string()),
            "STATUS" => bill.status = Some(rest.to_string()),
            "SAMEAS" => bill.same_as = Some(rest.to_string()),
            "MEMO" => bill.memo = Some(rest.to_string()),
            "ACTION" => bill.actions.push(rest.to_string()),
            "VOTE" => bill.votes.push(parse_vote(rest, line_no)?),
            "TEXT" => text_lines.push(rest.to_string()),
            other => {
                return Err(ParseError::Malformed(format!(
                    "line {}: unknown field '{}'",
                    line_no + 1,
                    other
                )))
            }
        }
    }

    if let Some(bill) = current.take() {
        bills.push(finish(bill, &mut text_lines));
    }
    Ok(bills)
}

fn parse_header(rest: &str, line_no: usize) -> ParseResult<Bill> {
    let mut tokens = rest.split_whitespace();
    let (Some(bill_no), Some(year)) = (tokens.next(), tokens.next()) else {
        return Err(ParseError::Malformed(format!(
            "line {}: BILL header needs a bill number and a year",
            line_no + 1
        )));
    };
    let year: i32 = year.parse().map_err(|_| {
        ParseError::Malformed(format!("line {}: bad year '{}'", line_no + 1, year))
    })?;
    Ok(Bill::new(bill_no, year))
}

fn parse_vote(rest: &str, line_no: usize) -> ParseResult<Vote> {
    let mut tokens = rest.split_whitespace();
    let (Some(date), Some(kind)) = (tokens.next(), tokens.next()) else {
        return Err(ParseError::Malformed(format!(
            "line {}: VOTE needs a date and a kind",
            line_no + 1
        )));
    };
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ParseError::Malformed(format!("line {}: bad vote date '{}'", line_no + 1, date))
    })?;
    let kind = match kind {
        "FLOOR" => VoteKind::Floor,
        "COMMITTEE" => VoteKind::Committee,
        other => {
            return Err(ParseError::Malformed(format!(
                "line {}: unknown vote kind '{}'",
                line_no + 1,
                other
            )))
        }
    };

    let mut vote = Vote::new(date, kind);
    for token in tokens {
        match token.split_once('=') {
            Some(("AYES", names)) => vote.ayes = name_list(names),
            Some(("NAYS", names)) => vote.nays = name_list(names),
            Some(("ABSTAINS", names)) => vote.abstains = name_list(names),
            Some(("EXCUSED", names)) => vote.excused = name_list(names),
            _ => {
                return Err(ParseError::Malformed(format!(
                    "line {}: bad vote roster '{}'",
                    line_no + 1,
                    token
                )))
            }
        }
    }
    Ok(vote)
}

fn name_list(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

fn finish(mut bill: Bill, text_lines: &mut Vec<String>) -> Bill {
    if !text_lines.is_empty() {
        bill.full_text = Some(text_lines.join("\n"));
        text_lines.clear();
    }
    bill
}
