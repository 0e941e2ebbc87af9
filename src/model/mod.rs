//! Entity model for legislative documents
//!
//! Every persisted unit of data is one of a closed set of variants (bill,
//! calendar, agenda, transcript), addressed by the (kind, year, id) triple.
//! Variant dispatch is always an enum match on `Entity`.

mod agenda;
mod bill;
mod calendar;
mod transcript;

pub use agenda::{Addendum, Agenda, Meeting};
pub use bill::{Bill, Vote, VoteKind};
pub use calendar::{Calendar, CalendarEntry, Section, Sequence, Supplemental};
pub use transcript::Transcript;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The closed set of entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Bill,
    Calendar,
    Agenda,
    Transcript,
}

impl EntityKind {
    /// Store subdirectory name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Bill => "bill",
            EntityKind::Calendar => "calendar",
            EntityKind::Agenda => "agenda",
            EntityKind::Transcript => "transcript",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bill" => Ok(EntityKind::Bill),
            "calendar" => Ok(EntityKind::Calendar),
            "agenda" => Ok(EntityKind::Agenda),
            "transcript" => Ok(EntityKind::Transcript),
            other => Err(format!("unknown entity kind '{}'", other)),
        }
    }
}

/// The (kind, year, id) triple that uniquely addresses an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub kind: EntityKind,
    pub year: i32,
    pub id: String,
}

impl Identity {
    pub fn new(kind: EntityKind, year: i32, id: impl Into<String>) -> Self {
        Self {
            kind,
            year,
            id: id.into(),
        }
    }

    /// Store location for this identity: `<root>/<year>/<kind>/<id>.json`
    pub fn store_path(&self, root: &Path) -> PathBuf {
        root.join(self.year.to_string())
            .join(self.kind.as_str())
            .join(format!("{}.json", self.id))
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.year, self.id)
    }
}

/// One persisted unit of legislative data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Bill(Bill),
    Calendar(Calendar),
    Agenda(Agenda),
    Transcript(Transcript),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Bill(_) => EntityKind::Bill,
            Entity::Calendar(_) => EntityKind::Calendar,
            Entity::Agenda(_) => EntityKind::Agenda,
            Entity::Transcript(_) => EntityKind::Transcript,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            Entity::Bill(b) => b.year,
            Entity::Calendar(c) => c.year,
            Entity::Agenda(a) => a.year,
            Entity::Transcript(t) => t.year,
        }
    }

    pub fn id(&self) -> String {
        match self {
            Entity::Bill(b) => b.bill_no.clone(),
            Entity::Calendar(c) => format!("calendar-{}", c.calendar_no),
            Entity::Agenda(a) => format!("agenda-{}", a.agenda_no),
            Entity::Transcript(t) => t.id.clone(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.kind(), self.year(), self.id())
    }

    /// Merge an incoming update into this entity, variant-specifically.
    ///
    /// Merging an update twice yields the same result as merging it once.
    /// A kind mismatch cannot occur for documents stored under the same
    /// identity; if it does, the update is taken as authoritative.
    pub fn merge(mut self, update: Entity) -> Entity {
        match (&mut self, update) {
            (Entity::Bill(existing), Entity::Bill(update)) => {
                existing.merge(update);
                self
            }
            (Entity::Calendar(existing), Entity::Calendar(update)) => {
                existing.merge(update);
                self
            }
            (Entity::Agenda(existing), Entity::Agenda(update)) => {
                existing.merge(update);
                self
            }
            (Entity::Transcript(existing), Entity::Transcript(update)) => {
                existing.merge(update);
                self
            }
            (_, update) => update,
        }
    }
}
