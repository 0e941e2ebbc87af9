//! Bill documents and their partial-update merge semantics
//!
//! Bills receive incremental deliveries over a session: a later delivery may
//! carry only a vote, a memo, or a status line. Merge is per-field
//! last-write-wins where the update carries a value, so re-ingesting the same
//! delivery is a no-op and unrelated fields are never discarded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a vote was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Floor,
    Committee,
}

/// A recorded vote on a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub date: NaiveDate,
    pub kind: VoteKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ayes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nays: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abstains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excused: Vec<String>,
}

impl Vote {
    pub fn new(date: NaiveDate, kind: VoteKind) -> Self {
        Self {
            date,
            kind,
            ayes: Vec::new(),
            nays: Vec::new(),
            abstains: Vec::new(),
            excused: Vec::new(),
        }
    }

    /// Votes with the same (date, kind) describe the same roll call; a
    /// re-delivery replaces the earlier record rather than duplicating it.
    fn same_roll_call(&self, other: &Vote) -> bool {
        self.date == other.date && self.kind == other.kind
    }
}

/// A bill document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub bill_no: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub co_sponsors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_as: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<Vote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

impl Bill {
    pub fn new(bill_no: impl Into<String>, year: i32) -> Self {
        Self {
            bill_no: bill_no.into(),
            year,
            title: None,
            sponsor: None,
            co_sponsors: Vec::new(),
            summary: None,
            status: None,
            same_as: None,
            actions: Vec::new(),
            votes: Vec::new(),
            memo: None,
            full_text: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_full_text(mut self, text: impl Into<String>) -> Self {
        self.full_text = Some(text.into());
        self
    }

    pub fn with_vote(mut self, vote: Vote) -> Self {
        self.votes.push(vote);
        self
    }

    /// Merge a partial update into this bill.
    ///
    /// Scalar fields are replaced only when the update carries a value.
    /// Votes are keyed by (date, kind): a vote for an already-recorded roll
    /// call replaces it, anything else is appended. Actions are unioned with
    /// exact duplicates suppressed.
    pub fn merge(&mut self, update: Bill) {
        replace_if_some(&mut self.title, update.title);
        replace_if_some(&mut self.sponsor, update.sponsor);
        replace_if_some(&mut self.summary, update.summary);
        replace_if_some(&mut self.status, update.status);
        replace_if_some(&mut self.same_as, update.same_as);
        replace_if_some(&mut self.memo, update.memo);
        replace_if_some(&mut self.full_text, update.full_text);

        if !update.co_sponsors.is_empty() {
            self.co_sponsors = update.co_sponsors;
        }

        for action in update.actions {
            if !self.actions.contains(&action) {
                self.actions.push(action);
            }
        }

        for vote in update.votes {
            match self.votes.iter_mut().find(|v| v.same_roll_call(&vote)) {
                Some(existing) => *existing = vote,
                None => self.votes.push(vote),
            }
        }
    }
}

fn replace_if_some<T>(field: &mut Option<T>, update: Option<T>) {
    if update.is_some() {
        *field = update;
    }
}
