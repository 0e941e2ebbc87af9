//! Directory walk, file classification, and routing

use super::markup;
use super::traits::{AgendaParser, BillBatchParser, CalendarParser, ParseError};
use crate::index::IndexSynchronizer;
use crate::model::Entity;
use crate::store::DocumentStore;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// How a delivery file is routed, decided on the file name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Bill batch delivery (`*.TXT`)
    BillBatch,
    /// Calendar markup (name contains `-calendar-`)
    Calendar,
    /// Committee/agenda markup (name contains `-agenda-`)
    Agenda,
    /// Not a delivery file; skipped without error
    Ignored,
}

/// Classify a file by name. Suffix check first, then marker tokens.
pub fn classify(name: &str) -> FileClass {
    if name.ends_with(".TXT") {
        FileClass::BillBatch
    } else if name.contains("-calendar-") {
        FileClass::Calendar
    } else if name.contains("-agenda-") {
        FileClass::Agenda
    } else {
        FileClass::Ignored
    }
}

/// Counters for one ingest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Delivery files successfully parsed (including empty results)
    pub files: usize,
    /// Entities persisted and handed to the index synchronizer
    pub entities: usize,
    /// Files whose parse failed plus entities whose store write failed
    pub failures: usize,
}

/// Routes delivery files to parsers and their output into the store.
pub struct Dispatcher {
    store: DocumentStore,
    synchronizer: IndexSynchronizer,
    bill_parser: Box<dyn BillBatchParser>,
    calendar_parser: Box<dyn CalendarParser>,
    agenda_parser: Box<dyn AgendaParser>,
}

impl Dispatcher {
    pub fn new(
        store: DocumentStore,
        synchronizer: IndexSynchronizer,
        bill_parser: Box<dyn BillBatchParser>,
        calendar_parser: Box<dyn CalendarParser>,
        agenda_parser: Box<dyn AgendaParser>,
    ) -> Self {
        Self {
            store,
            synchronizer,
            bill_parser,
            calendar_parser,
            agenda_parser,
        }
    }

    /// Recursively visit every regular file under `root` in listing order.
    ///
    /// Listing order is filesystem-dependent; correctness relies on merge
    /// convergence, not on cross-file ordering. A failed file is logged and
    /// the walk continues.
    pub fn ingest_tree(&self, root: &Path) -> IngestReport {
        let mut report = IngestReport::default();
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "cannot read directory entry");
                    report.failures += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match self.ingest_file(entry.path(), &mut report) {
                Ok(true) => report.files += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!(file = %entry.path().display(), error = %err, "delivery file failed, skipping");
                    report.failures += 1;
                }
            }
        }
        report
    }

    /// Classify and ingest one file, updating the run counters. Returns
    /// whether the file was a delivery file.
    pub fn ingest_file(&self, path: &Path, report: &mut IngestReport) -> Result<bool, ParseError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match classify(&name) {
            FileClass::BillBatch => {
                let bills = self.bill_parser.parse_batch(path)?;
                for bill in bills {
                    self.write(Entity::Bill(bill), true, report);
                }
                Ok(true)
            }
            FileClass::Calendar => {
                // embedded markup is frequently malformed; repair before parsing
                markup::fix_calendar_markup(path)?;
                let calendars = self.calendar_parser.parse_calendar(path)?;
                for calendar in calendars {
                    self.write(Entity::Calendar(calendar), true, report);
                }
                Ok(true)
            }
            FileClass::Agenda => {
                // mixed output: agenda documents plus incidental bill vote
                // updates; both merge so a vote-only update never clobbers
                // an existing bill record
                let entities = self.agenda_parser.parse_agenda(path)?;
                for entity in entities {
                    self.write(entity, true, report);
                }
                Ok(true)
            }
            FileClass::Ignored => {
                debug!(file = %path.display(), "not a delivery file, ignoring");
                Ok(false)
            }
        }
    }

    /// Persist one entity and hand the final state to the index. Write and
    /// index failures are logged and isolated to this entity; a failed write
    /// counts against the run.
    fn write(&self, entity: Entity, merge: bool, report: &mut IngestReport) {
        let identity = entity.identity();
        match self.store.persist(entity, merge) {
            Ok(mut persisted) => {
                if let Err(err) = self.synchronizer.index(&mut persisted) {
                    warn!(identity = %identity, error = %err, "index submission failed, store write stands");
                }
                report.entities += 1;
            }
            Err(err) => {
                warn!(identity = %identity, error = %err, "write failed, entity skipped");
                report.failures += 1;
            }
        }
    }
}
