//! Calendar documents: supplementals, sections, sequences, and entries
//!
//! A calendar entry embeds a snapshot of the referenced bill taken when the
//! calendar markup was parsed. Snapshots go stale as bills keep receiving
//! independent updates; the repair pass refreshes them from the store.

use super::Bill;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One numbered entry on a calendar section or sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill: Option<Bill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_bill_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<String>,
}

/// A named section of a supplemental (e.g. "BILLS ON THIRD READING")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<CalendarEntry>,
}

/// The active-list sequence of a supplemental
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub no: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplemental {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
}

/// A calendar document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub calendar_no: u32,
    pub year: i32,
    pub session_year: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplementals: Vec<Supplemental>,
}

impl Calendar {
    pub fn new(calendar_no: u32, year: i32) -> Self {
        Self {
            calendar_no,
            year,
            session_year: year,
            supplementals: Vec::new(),
        }
    }

    /// Calendar deliveries carry the whole document, so merge is a top-level
    /// replace. Snapshot consistency is handled by the repair pass, not here.
    pub fn merge(&mut self, update: Calendar) {
        *self = update;
    }

    /// Every entry across all supplementals, sections and sequences.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut CalendarEntry> {
        self.supplementals.iter_mut().flat_map(|sup| {
            let section_entries = sup
                .sections
                .iter_mut()
                .flat_map(|section| section.entries.iter_mut());
            let sequence_entries = sup
                .sequence
                .iter_mut()
                .flat_map(|sequence| sequence.entries.iter_mut());
            section_entries.chain(sequence_entries)
        })
    }
}
