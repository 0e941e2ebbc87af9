//! File-backed document store
//!
//! One pretty-printed JSON file per entity, laid out as
//! `<root>/<year>/<kind>/<id>.json`. Persisting with the merge flag folds an
//! incoming partial update into the previously stored document.

mod document;

pub use document::{DocumentStore, StoreError, StoreResult};
