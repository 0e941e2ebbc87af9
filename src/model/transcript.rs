//! Session transcript documents

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A floor-session transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Identifier within (transcript, year): the session date, suffixed for
    /// non-regular sessions (e.g. "2020-01-08-extraordinary-session").
    pub id: String,
    pub year: i32,
    pub session_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_text: String,
}

impl Transcript {
    pub fn new(id: impl Into<String>, year: i32, session_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            year,
            session_date,
            session_kind: None,
            location: None,
            full_text: String::new(),
        }
    }

    /// Replace fields the update actually carries; a re-delivery of the same
    /// transcript is a no-op.
    pub fn merge(&mut self, update: Transcript) {
        self.session_date = update.session_date;
        if update.session_kind.is_some() {
            self.session_kind = update.session_kind;
        }
        if update.location.is_some() {
            self.location = update.location;
        }
        if !update.full_text.is_empty() {
            self.full_text = update.full_text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_text_when_update_is_empty() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 8).unwrap();
        let mut transcript = Transcript::new("2020-01-08", 2020, date);
        transcript.full_text = "THE PRESIDENT: The Senate will come to order.".to_string();

        let mut update = Transcript::new("2020-01-08", 2020, date);
        update.location = Some("ALBANY, NEW YORK".to_string());
        transcript.merge(update);

        assert!(!transcript.full_text.is_empty());
        assert_eq!(transcript.location.as_deref(), Some("ALBANY, NEW YORK"));
    }

    #[test]
    fn merge_is_idempotent() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 8).unwrap();
        let mut update = Transcript::new("2020-01-08", 2020, date);
        update.full_text = "line".to_string();

        let mut once = Transcript::new("2020-01-08", 2020, date);
        once.merge(update.clone());
        let mut twice = once.clone();
        twice.merge(update);
        assert_eq!(once, twice);
    }
}
