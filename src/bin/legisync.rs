//! Legisync CLI — batch ingest, maintenance, and reindex operations.
//!
//! Usage:
//!   legisync ingest <store-root> <source-root> [--index-feed DIR]
//!   legisync repair-calendar-refs <store-root> <year> <path>
//!   legisync reindex-bill <store-root> <document-path>

use clap::{Parser, Subcommand};
use legisync::ingest::sources::{
    AgendaMarkupParser, BatchFileParser, CalendarMarkupParser, SessionTranscriptParser,
};
use legisync::ingest::{markup, TranscriptRecovery};
use legisync::{
    Dispatcher, DocumentStore, Entity, EntityKind, FeedIndex, Identity, IndexSynchronizer,
    RecoveryOutcome, RepairPass,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "legisync",
    version,
    about = "Legislative source ingest pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a source tree and ingest every recognized delivery file
    Ingest {
        /// Root of the document store
        store_root: PathBuf,
        /// Root of the delivery tree to walk
        source_root: PathBuf,
        /// Search index feed directory (defaults to <store-root>/_index)
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Extract embedded calendar/agenda markup from batch files without ingesting
    GenerateMarkup {
        /// Root of the delivery tree to scan
        source_root: PathBuf,
    },
    /// Re-submit one stored bill document to the index
    ReindexBill {
        store_root: PathBuf,
        document_path: PathBuf,
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Re-submit one stored calendar document to the index
    ReindexCalendar {
        store_root: PathBuf,
        document_path: PathBuf,
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Re-submit one stored agenda document to the index
    ReindexAgenda {
        store_root: PathBuf,
        document_path: PathBuf,
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Re-submit one stored transcript document to the index
    ReindexTranscript {
        store_root: PathBuf,
        document_path: PathBuf,
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Run transcript recovery on one raw source file, then persist and index
    ReindexTranscriptSource {
        store_root: PathBuf,
        /// Raw transcript file; rewritten in place if repair is needed
        source_path: PathBuf,
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Refresh the bill snapshots embedded in stored calendars
    RepairCalendarRefs {
        store_root: PathBuf,
        /// Session year the referenced bills belong to
        year: i32,
        /// Directory (or file) of stored calendar documents
        path: PathBuf,
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Refresh the bill snapshots embedded in stored agendas
    RepairAgendaRefs {
        store_root: PathBuf,
        year: i32,
        path: PathBuf,
        #[arg(long)]
        index_feed: Option<PathBuf>,
    },
    /// Remove one document from the store
    Delete {
        store_root: PathBuf,
        /// Entity kind: bill, calendar, agenda or transcript
        kind: EntityKind,
        year: i32,
        id: String,
    },
}

fn open_components(
    store_root: &PathBuf,
    index_feed: Option<PathBuf>,
) -> (DocumentStore, IndexSynchronizer) {
    let feed = index_feed.unwrap_or_else(|| store_root.join("_index"));
    let store = DocumentStore::new(store_root);
    let synchronizer = IndexSynchronizer::new(Arc::new(FeedIndex::new(feed)));
    (store, synchronizer)
}

fn cmd_ingest(store: DocumentStore, synchronizer: IndexSynchronizer, source_root: &PathBuf) -> i32 {
    let dispatcher = Dispatcher::new(
        store,
        synchronizer,
        Box::new(BatchFileParser),
        Box::new(CalendarMarkupParser),
        Box::new(AgendaMarkupParser),
    );
    let report = dispatcher.ingest_tree(source_root);
    println!(
        "{} files ingested, {} entities written, {} failures",
        report.files, report.entities, report.failures
    );
    if report.failures > 0 {
        1
    } else {
        0
    }
}

fn cmd_generate_markup(source_root: &PathBuf) -> i32 {
    let extracted = markup::extract_markup(source_root);
    println!("extracted markup from {} files", extracted);
    0
}

fn cmd_reindex(
    store: DocumentStore,
    synchronizer: IndexSynchronizer,
    document_path: &PathBuf,
    expected: EntityKind,
) -> i32 {
    let mut entity = match store.load_at(document_path) {
        Ok(Some(entity)) => entity,
        Ok(None) => {
            eprintln!("Error: no document at '{}'", document_path.display());
            return 1;
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            return 1;
        }
    };
    if entity.kind() != expected {
        eprintln!(
            "Error: document at '{}' is a {}, expected a {}",
            document_path.display(),
            entity.kind(),
            expected
        );
        return 1;
    }
    match synchronizer.index(&mut entity) {
        Ok(()) => {
            println!("reindexed {}", entity.identity());
            0
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    }
}

fn cmd_reindex_transcript_source(
    store: DocumentStore,
    synchronizer: IndexSynchronizer,
    source_path: &PathBuf,
) -> i32 {
    let recovery = TranscriptRecovery::new(Box::new(SessionTranscriptParser::new()));
    let outcome = match recovery.recover(source_path) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("Error: {}", err);
            return 1;
        }
    };
    match outcome {
        RecoveryOutcome::Parsed {
            transcript,
            repaired,
        } => {
            if repaired {
                println!("source repaired and rewritten in place");
            }
            match store.persist(Entity::Transcript(transcript), true) {
                Ok(mut persisted) => {
                    if let Err(err) = synchronizer.index(&mut persisted) {
                        eprintln!("Warning: index submission failed: {}", err);
                    }
                    println!("ingested {}", persisted.identity());
                    0
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    1
                }
            }
        }
        RecoveryOutcome::Failed { attempt, retry } => {
            eprintln!(
                "Error: transcript unparseable (attempt: {}; after repair: {})",
                attempt, retry
            );
            1
        }
    }
}

fn cmd_delete(store: DocumentStore, kind: EntityKind, year: i32, id: String) -> i32 {
    let identity = Identity::new(kind, year, id);
    match store.delete(&identity) {
        Ok(true) => {
            println!("deleted {}", identity);
            0
        }
        Ok(false) => {
            eprintln!("Error: no document stored for {}", identity);
            1
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Ingest {
            store_root,
            source_root,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            cmd_ingest(store, synchronizer, &source_root)
        }
        Commands::GenerateMarkup { source_root } => cmd_generate_markup(&source_root),
        Commands::ReindexBill {
            store_root,
            document_path,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            cmd_reindex(store, synchronizer, &document_path, EntityKind::Bill)
        }
        Commands::ReindexCalendar {
            store_root,
            document_path,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            cmd_reindex(store, synchronizer, &document_path, EntityKind::Calendar)
        }
        Commands::ReindexAgenda {
            store_root,
            document_path,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            cmd_reindex(store, synchronizer, &document_path, EntityKind::Agenda)
        }
        Commands::ReindexTranscript {
            store_root,
            document_path,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            cmd_reindex(store, synchronizer, &document_path, EntityKind::Transcript)
        }
        Commands::ReindexTranscriptSource {
            store_root,
            source_path,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            cmd_reindex_transcript_source(store, synchronizer, &source_path)
        }
        Commands::RepairCalendarRefs {
            store_root,
            year,
            path,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            let report = RepairPass::new(store, synchronizer).repair_calendar_refs(year, &path);
            println!(
                "{} calendars rewritten, {} snapshots refreshed, {} unresolved",
                report.repaired, report.refreshed, report.unresolved
            );
            0
        }
        Commands::RepairAgendaRefs {
            store_root,
            year,
            path,
            index_feed,
        } => {
            let (store, synchronizer) = open_components(&store_root, index_feed);
            let report = RepairPass::new(store, synchronizer).repair_agenda_refs(year, &path);
            println!(
                "{} agendas rewritten, {} snapshots refreshed, {} unresolved",
                report.repaired, report.refreshed, report.unresolved
            );
            0
        }
        Commands::Delete {
            store_root,
            kind,
            year,
            id,
        } => cmd_delete(DocumentStore::new(store_root), kind, year, id),
    };
    std::process::exit(code);
}
