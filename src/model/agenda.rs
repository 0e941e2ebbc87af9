//! Committee agenda documents
//!
//! Meetings embed bill snapshots the same way calendar entries do, and the
//! same staleness caveat applies.

use super::Bill;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One committee meeting on an agenda addendum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub committee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bills: Vec<Bill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addendum {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meetings: Vec<Meeting>,
}

/// An agenda document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agenda {
    pub agenda_no: u32,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addendums: Vec<Addendum>,
}

impl Agenda {
    pub fn new(agenda_no: u32, year: i32) -> Self {
        Self {
            agenda_no,
            year,
            addendums: Vec::new(),
        }
    }

    /// Agenda deliveries carry the whole document; merge is a top-level
    /// replace, like calendars.
    pub fn merge(&mut self, update: Agenda) {
        *self = update;
    }

    /// Every embedded bill snapshot across all addendums and meetings.
    pub fn bills_mut(&mut self) -> impl Iterator<Item = &mut Bill> {
        self.addendums
            .iter_mut()
            .flat_map(|a| a.meetings.iter_mut())
            .flat_map(|m| m.bills.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_full_replace() {
        let mut existing = Agenda::new(3, 2020);
        existing.addendums.push(Addendum {
            id: String::new(),
            week_of: None,
            meetings: vec![Meeting {
                committee: "FINANCE".to_string(),
                chair: None,
                meeting_date: None,
                location: None,
                notes: None,
                bills: vec![Bill::new("S100", 2020)],
            }],
        });

        let update = Agenda::new(3, 2020);
        existing.merge(update.clone());
        assert_eq!(existing, update);
    }
}
