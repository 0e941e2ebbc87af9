//! Cross-reference repair passes
//!
//! Calendars and agendas embed bill snapshots taken at parse time, while the
//! referenced bills keep receiving independent updates. These maintenance
//! passes reload every snapshot from the authoritative bill record and
//! rewrite the containing document, without re-parsing its original source.
//! Each pass is idempotent and best-effort: a bill that cannot be loaded
//! leaves its snapshot as-is.

use crate::index::IndexSynchronizer;
use crate::model::{Bill, Entity, EntityKind, Identity};
use crate::store::DocumentStore;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Counters for one repair run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Documents rewritten
    pub repaired: usize,
    /// Embedded snapshots refreshed from the store
    pub refreshed: usize,
    /// Snapshots left untouched because the bill was missing or unloadable
    pub unresolved: usize,
}

/// Maintenance pass over stored calendar/agenda documents.
pub struct RepairPass {
    store: DocumentStore,
    synchronizer: IndexSynchronizer,
}

impl RepairPass {
    pub fn new(store: DocumentStore, synchronizer: IndexSynchronizer) -> Self {
        Self {
            store,
            synchronizer,
        }
    }

    /// Refresh bill snapshots in every stored calendar under `path`.
    pub fn repair_calendar_refs(&self, year: i32, path: &Path) -> RepairReport {
        let mut report = RepairReport::default();
        for file in stored_documents(path) {
            match self.store.load_at(&file) {
                Ok(Some(Entity::Calendar(mut calendar))) => {
                    for entry in calendar.entries_mut() {
                        if let Some(snapshot) = entry.bill.as_mut() {
                            self.refresh(year, snapshot, &mut report);
                        }
                    }
                    // the in-memory document is now the latest state;
                    // replace outright rather than merging with itself
                    self.rewrite(Entity::Calendar(calendar), &mut report);
                }
                other => skip_non_target(&file, EntityKind::Calendar, other, &mut report),
            }
        }
        report
    }

    /// Refresh bill snapshots in every stored agenda under `path`.
    pub fn repair_agenda_refs(&self, year: i32, path: &Path) -> RepairReport {
        let mut report = RepairReport::default();
        for file in stored_documents(path) {
            match self.store.load_at(&file) {
                Ok(Some(Entity::Agenda(mut agenda))) => {
                    for snapshot in agenda.bills_mut() {
                        self.refresh(year, snapshot, &mut report);
                    }
                    self.rewrite(Entity::Agenda(agenda), &mut report);
                }
                other => skip_non_target(&file, EntityKind::Agenda, other, &mut report),
            }
        }
        report
    }

    /// Replace one snapshot with the authoritative bill record, if it loads.
    fn refresh(&self, year: i32, snapshot: &mut Bill, report: &mut RepairReport) {
        let identity = Identity::new(EntityKind::Bill, year, snapshot.bill_no.clone());
        match self.store.load(&identity) {
            Ok(Some(Entity::Bill(authoritative))) => {
                *snapshot = authoritative;
                report.refreshed += 1;
            }
            Ok(_) => {
                warn!(identity = %identity, "referenced bill not in store, snapshot left stale");
                report.unresolved += 1;
            }
            Err(err) => {
                warn!(identity = %identity, error = %err, "referenced bill unloadable, snapshot left stale");
                report.unresolved += 1;
            }
        }
    }

    fn rewrite(&self, entity: Entity, report: &mut RepairReport) {
        let identity = entity.identity();
        match self.store.persist(entity, false) {
            Ok(mut persisted) => {
                report.repaired += 1;
                if let Err(err) = self.synchronizer.index(&mut persisted) {
                    warn!(identity = %identity, error = %err, "index submission failed, store write stands");
                }
            }
            Err(err) => {
                warn!(identity = %identity, error = %err, "rewrite failed, document unchanged on disk");
            }
        }
    }
}

fn stored_documents(path: &Path) -> impl Iterator<Item = std::path::PathBuf> {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
}

fn skip_non_target(
    file: &Path,
    expected: EntityKind,
    loaded: crate::store::StoreResult<Option<Entity>>,
    _report: &mut RepairReport,
) {
    match loaded {
        Ok(Some(entity)) => {
            debug!(file = %file.display(), kind = %entity.kind(), expected = %expected, "not a repair target, skipping")
        }
        Ok(None) => {}
        Err(err) => warn!(file = %file.display(), error = %err, "unreadable document, skipping"),
    }
}
