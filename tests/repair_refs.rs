//! Repair passes over stored calendars and agendas: reload embedded bill
//! snapshots from the authoritative records and resubmit to the index.

mod common;

use common::RecordingIndex;
use legisync::model::{
    Addendum, Agenda, Bill, Calendar, CalendarEntry, Meeting, Section, Supplemental,
};
use legisync::{DocumentStore, Entity, EntityKind, Identity, IndexSynchronizer, RepairPass};
use std::sync::Arc;
use tempfile::TempDir;

fn calendar_referencing(bill_no: &str, status: &str) -> Calendar {
    let mut calendar = Calendar::new(5, 2020);
    calendar.supplementals.push(Supplemental {
        id: "A".to_string(),
        calendar_date: None,
        sections: vec![Section {
            name: "BILLS ON THIRD READING".to_string(),
            entries: vec![CalendarEntry {
                no: Some(101),
                bill: Some(Bill::new(bill_no, 2020).with_status(status)),
                sub_bill_no: None,
                motion: None,
            }],
        }],
        sequence: None,
    });
    calendar
}

fn agenda_referencing(bill_no: &str, status: &str) -> Agenda {
    let mut agenda = Agenda::new(3, 2020);
    agenda.addendums.push(Addendum {
        id: String::new(),
        week_of: None,
        meetings: vec![Meeting {
            committee: "TRANSPORTATION".to_string(),
            chair: None,
            meeting_date: None,
            location: None,
            notes: None,
            bills: vec![Bill::new(bill_no, 2020).with_status(status)],
        }],
    });
    agenda
}

#[test]
fn calendar_repair_refreshes_stale_snapshots_and_reindexes() {
    let dir = TempDir::new().unwrap();
    let store = DocumentStore::new(dir.path());
    store
        .persist(
            Entity::Bill(Bill::new("S100", 2020).with_status("PASSED_SENATE")),
            false,
        )
        .unwrap();
    store
        .persist(
            Entity::Calendar(calendar_referencing("S100", "IN_SENATE_COMM")),
            false,
        )
        .unwrap();

    let index = Arc::new(RecordingIndex::new());
    let pass = RepairPass::new(store.clone(), IndexSynchronizer::new(index.clone()));
    let report = pass.repair_calendar_refs(2020, &dir.path().join("2020").join("calendar"));

    assert_eq!(report.repaired, 1);
    assert_eq!(report.refreshed, 1);
    assert_eq!(report.unresolved, 0);

    let identity = Identity::new(EntityKind::Calendar, 2020, "calendar-5");
    let Some(Entity::Calendar(mut calendar)) = store.load(&identity).unwrap() else {
        panic!("expected the calendar back")
    };
    let snapshot = calendar.entries_mut().next().unwrap().bill.clone().unwrap();
    assert_eq!(snapshot.status.as_deref(), Some("PASSED_SENATE"));

    // the rewritten calendar went back to the index
    assert_eq!(index.submitted_keys(), vec!["calendar-5-2020".to_string()]);
}

#[test]
fn agenda_repair_refreshes_meeting_bills() {
    let dir = TempDir::new().unwrap();
    let store = DocumentStore::new(dir.path());
    store
        .persist(
            Entity::Bill(Bill::new("S100", 2020).with_title("An act")),
            false,
        )
        .unwrap();
    store
        .persist(Entity::Agenda(agenda_referencing("S100", "REPORTED")), false)
        .unwrap();

    let index = Arc::new(RecordingIndex::new());
    let pass = RepairPass::new(store.clone(), IndexSynchronizer::new(index.clone()));
    let report = pass.repair_agenda_refs(2020, &dir.path().join("2020").join("agenda"));

    assert_eq!(report.repaired, 1);
    assert_eq!(report.refreshed, 1);

    let identity = Identity::new(EntityKind::Agenda, 2020, "agenda-3");
    let Some(Entity::Agenda(mut agenda)) = store.load(&identity).unwrap() else {
        panic!("expected the agenda back")
    };
    let snapshot = agenda.bills_mut().next().unwrap().clone();
    // the authoritative record replaces the snapshot wholesale
    assert_eq!(snapshot.title.as_deref(), Some("An act"));
    assert_eq!(snapshot.status, None);
    assert_eq!(index.submitted_keys(), vec!["agenda-3-2020".to_string()]);
}

#[test]
fn repair_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = DocumentStore::new(dir.path());
    store
        .persist(
            Entity::Bill(Bill::new("S100", 2020).with_status("PASSED_SENATE")),
            false,
        )
        .unwrap();
    store
        .persist(
            Entity::Calendar(calendar_referencing("S100", "IN_SENATE_COMM")),
            false,
        )
        .unwrap();

    let index = Arc::new(RecordingIndex::new());
    let pass = RepairPass::new(store.clone(), IndexSynchronizer::new(index));
    let target = dir.path().join("2020").join("calendar");

    pass.repair_calendar_refs(2020, &target);
    let identity = Identity::new(EntityKind::Calendar, 2020, "calendar-5");
    let first = store.load(&identity).unwrap();

    let report = pass.repair_calendar_refs(2020, &target);
    assert_eq!(report.refreshed, 1);
    assert_eq!(store.load(&identity).unwrap(), first);
}

#[test]
fn unresolved_bills_leave_the_snapshot_and_count() {
    let dir = TempDir::new().unwrap();
    let store = DocumentStore::new(dir.path());
    store
        .persist(
            Entity::Calendar(calendar_referencing("S999", "IN_SENATE_COMM")),
            false,
        )
        .unwrap();

    let index = Arc::new(RecordingIndex::new());
    let pass = RepairPass::new(store.clone(), IndexSynchronizer::new(index));
    let report = pass.repair_calendar_refs(2020, &dir.path().join("2020").join("calendar"));

    // document still rewritten, snapshot untouched
    assert_eq!(report.repaired, 1);
    assert_eq!(report.unresolved, 1);

    let identity = Identity::new(EntityKind::Calendar, 2020, "calendar-5");
    let Some(Entity::Calendar(mut calendar)) = store.load(&identity).unwrap() else {
        panic!("expected the calendar back")
    };
    let snapshot = calendar.entries_mut().next().unwrap().bill.clone().unwrap();
    assert_eq!(snapshot.status.as_deref(), Some("IN_SENATE_COMM"));
}
