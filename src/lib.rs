//! Legisync: legislative source ingest pipeline
//!
//! Converts periodic incremental deliveries of semi-structured legislative
//! source files (bill batches, calendar and committee markup, transcripts)
//! into canonical per-entity documents, persists them in a file-backed store,
//! and keeps a full-text search index feed synchronized with that store.
//!
//! # Core concepts
//!
//! - **Entity**: one persisted unit (bill, calendar, agenda, transcript),
//!   addressed by its (kind, year, id) identity
//! - **Merge-write**: a delivery is a partial update, folded into the
//!   previously stored document rather than replacing it
//! - **Repair pass**: refreshes the bill snapshots embedded in calendars and
//!   agendas against the authoritative bill records
//!
//! # Example
//!
//! ```
//! use legisync::{Bill, DocumentStore, Entity};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = DocumentStore::new(dir.path());
//! let bill = Entity::Bill(Bill::new("S100", 2020).with_title("An act"));
//! let persisted = store.persist(bill, true).unwrap();
//! assert_eq!(store.load(&persisted.identity()).unwrap(), Some(persisted));
//! ```

pub mod index;
pub mod ingest;
pub mod model;
pub mod repair;
pub mod store;

pub use index::{FeedIndex, IndexDocument, IndexError, IndexSynchronizer, SearchIndex};
pub use ingest::{Dispatcher, IngestReport, ParseError, RecoveryOutcome, TranscriptRecovery};
pub use model::{Agenda, Bill, Calendar, Entity, EntityKind, Identity, Transcript, Vote, VoteKind};
pub use repair::{RepairPass, RepairReport};
pub use store::{DocumentStore, StoreError, StoreResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
