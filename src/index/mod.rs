//! Search index synchronization
//!
//! The external search engine is behind the `SearchIndex` trait so the test
//! suite can inject a double. The store is the source of truth: submission
//! failures are logged by callers and never roll back a committed write.

mod feed;
mod synchronizer;
mod traits;

pub use feed::FeedIndex;
pub use synchronizer::{BillTextFormatter, IndexSynchronizer};
pub use traits::{IndexDocument, IndexError, IndexResult, SearchIndex};
