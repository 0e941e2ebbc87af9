//! Filesystem feed implementation of the search index seam
//!
//! Writes each submission into a spool directory
//! (`<feed-root>/<kind>/<key>.xml` + `.json`) for the external engine to
//! pick up. The binary wires this in; tests inject a recording double.

use super::traits::{IndexDocument, IndexResult, SearchIndex};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FeedIndex {
    root: PathBuf,
}

impl FeedIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SearchIndex for FeedIndex {
    fn submit(&self, documents: &[IndexDocument]) -> IndexResult<()> {
        for document in documents {
            let dir = self.root.join(document.kind.as_str());
            fs::create_dir_all(&dir)?;
            fs::write(
                dir.join(format!("{}.xml", document.key)),
                &document.markup,
            )?;
            fs::write(
                dir.join(format!("{}.json", document.key)),
                serde_json::to_string_pretty(&document.structured)?,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexSynchronizer;
    use crate::model::{Bill, Entity};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn writes_both_representations_into_the_feed() {
        let dir = TempDir::new().unwrap();
        let synchronizer = IndexSynchronizer::new(Arc::new(FeedIndex::new(dir.path())));

        let mut entity = Entity::Bill(Bill::new("S100", 2020).with_title("An act"));
        synchronizer.index(&mut entity).unwrap();

        let markup = fs::read_to_string(dir.path().join("bill/S100-2020.xml")).unwrap();
        assert!(markup.contains("<title>An act</title>"));

        let structured = fs::read_to_string(dir.path().join("bill/S100-2020.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&structured).unwrap();
        assert_eq!(value["bill_no"], "S100");
    }
}
