//! Ingest dispatch: classification, routing, and write flags
//!
//! The dispatcher walks a delivery tree, classifies each file by name,
//! routes it to the matching parser seam, and feeds everything produced into
//! the merge-write store and the index synchronizer. Failures are isolated
//! per file; nothing aborts the walk.

mod dispatcher;
pub mod markup;
mod recovery;
pub mod sources;
mod traits;

pub use dispatcher::{Dispatcher, FileClass, IngestReport};
pub use recovery::{RecoveryOutcome, TranscriptRecovery};
pub use traits::{
    AgendaParser, BillBatchParser, CalendarParser, ParseError, ParseResult, TranscriptParser,
};
