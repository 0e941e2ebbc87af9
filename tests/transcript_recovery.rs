//! Recovery cycle over raw transcript files: attempt, fix in place, retry.

mod common;

use common::{RecordingIndex, TRANSCRIPT};
use legisync::ingest::sources::SessionTranscriptParser;
use legisync::{
    DocumentStore, Entity, EntityKind, Identity, IndexSynchronizer, RecoveryOutcome,
    TranscriptRecovery,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn recovery() -> TranscriptRecovery {
    TranscriptRecovery::new(Box::new(SessionTranscriptParser::new()))
}

#[test]
fn well_formed_source_parses_without_repair() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("011820.v1");
    fs::write(&source, TRANSCRIPT).unwrap();

    let outcome = recovery().recover(&source).unwrap();
    let RecoveryOutcome::Parsed {
        transcript,
        repaired,
    } = outcome
    else {
        panic!("expected a parse")
    };
    assert!(!repaired);
    assert_eq!(transcript.id, "2020-01-08");
    assert_eq!(fs::read_to_string(&source).unwrap(), TRANSCRIPT);
}

#[test]
fn malformed_source_is_fixed_in_place_and_retried() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("011820.v1");
    // no line-number column anywhere; the first attempt must fail
    fs::write(
        &source,
        "NEW YORK STATE SENATE\r\nALBANY, NEW YORK\r\nJanuary 8, 2020\r\nREGULAR SESSION\r\n",
    )
    .unwrap();

    let outcome = recovery().recover(&source).unwrap();
    let RecoveryOutcome::Parsed {
        transcript,
        repaired,
    } = outcome
    else {
        panic!("expected a parse after repair")
    };
    assert!(repaired);
    assert_eq!(transcript.id, "2020-01-08");
    assert_eq!(transcript.location.as_deref(), Some("ALBANY, NEW YORK"));

    // the corrected text replaced the raw source
    let rewritten = fs::read_to_string(&source).unwrap();
    assert!(rewritten.starts_with("    1  NEW YORK STATE SENATE\n"));
    assert!(rewritten.contains("    3  January 8, 2020\n"));
    assert!(!rewritten.contains('\r'));
}

#[test]
fn recovered_transcript_persists_and_indexes() {
    let store_dir = TempDir::new().unwrap();
    let source_dir = TempDir::new().unwrap();
    let source = source_dir.path().join("011820.v1");
    fs::write(&source, "NEW YORK STATE SENATE\nJanuary 8, 2020\n").unwrap();

    let RecoveryOutcome::Parsed { transcript, .. } = recovery().recover(&source).unwrap() else {
        panic!("expected a parse after repair")
    };

    let store = DocumentStore::new(store_dir.path());
    let index = Arc::new(RecordingIndex::new());
    let synchronizer = IndexSynchronizer::new(index.clone());

    let mut persisted = store.persist(Entity::Transcript(transcript), true).unwrap();
    synchronizer.index(&mut persisted).unwrap();

    let identity = Identity::new(EntityKind::Transcript, 2020, "2020-01-08");
    assert!(store.load(&identity).unwrap().is_some());
    assert_eq!(index.submitted_keys(), vec!["2020-01-08-2020".to_string()]);
}

#[test]
fn second_failure_ends_the_cycle() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("garbled.v1");
    // normalizing adds number columns but never a session date, so the
    // retry fails too
    fs::write(&source, "no date anywhere\nstill nothing\n").unwrap();

    let outcome = recovery().recover(&source).unwrap();
    let RecoveryOutcome::Failed { attempt, retry } = outcome else {
        panic!("expected both attempts to fail")
    };
    assert!(attempt.to_string().contains("line-number column"));
    assert!(retry.to_string().contains("session date"));

    // the fix still ran; exactly one rewrite, no endless looping
    assert_eq!(
        fs::read_to_string(&source).unwrap(),
        "    1  no date anywhere\n    2  still nothing\n"
    );
}
