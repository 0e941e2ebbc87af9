//! Reference parsers for the standard delivery formats
//!
//! These implement the parser seams for the formats the pipeline normally
//! receives: keyed-line bill batches, `sencalendar`/`senagenda` markup, and
//! numbered-line session transcripts. The dispatcher and recovery logic only
//! ever see the traits, so deployments with other formats swap these out.

mod agenda;
mod batch;
mod calendar;
mod transcript;
mod xml;

pub use agenda::AgendaMarkupParser;
pub use batch::BatchFileParser;
pub use calendar::CalendarMarkupParser;
pub use transcript::SessionTranscriptParser;
