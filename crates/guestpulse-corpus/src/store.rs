use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;
use uuid::Uuid;

use crate::review::Review;

/// Errors emitted by the corpus storage subsystem.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Filesystem I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// CSV parsing failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Lookup for an id that is not in the store.
    #[error("review {0} not found")]
    NotFound(Uuid),
}

/// File-system backed review store, one JSON record per line.
///
/// Record order in the file is insertion order and is preserved by `load`.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    path: PathBuf,
}

impl ReviewStore {
    /// Creates a store handle for the given JSONL file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every review in file order. A missing file is an empty corpus.
    pub fn load(&self) -> Result<Vec<Review>, CorpusError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut reviews = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let review: Review = serde_json::from_str(&line)?;
            reviews.push(review);
        }
        Ok(reviews)
    }

    /// Appends a single review.
    pub fn append(&self, review: &Review) -> Result<(), CorpusError> {
        self.append_all(std::slice::from_ref(review))
    }

    /// Appends a batch of reviews, opening the file once.
    pub fn append_all(&self, reviews: &[Review]) -> Result<(), CorpusError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        for review in reviews {
            serde_json::to_writer(&mut file, review)?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Replaces the entire store content, keeping the given order.
    pub fn rewrite(&self, reviews: &[Review]) -> Result<(), CorpusError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&self.path)?;
        for review in reviews {
            serde_json::to_writer(&mut file, review)?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Removes one review by id and returns it.
    pub fn remove(&self, id: Uuid) -> Result<Review, CorpusError> {
        let mut reviews = self.load()?;
        let position = reviews
            .iter()
            .position(|r| r.id == id)
            .ok_or(CorpusError::NotFound(id))?;
        let removed = reviews.remove(position);
        self.rewrite(&reviews)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(product: &str, text: &str) -> Review {
        Review::new(product, "guest-1").with_text(text)
    }

    #[test]
    fn appends_and_loads_in_order() {
        let dir = tempdir().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.jsonl"));
        store.append(&sample("hotel-a", "first")).unwrap();
        store.append(&sample("hotel-b", "second")).unwrap();

        let reviews = store.load().unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text.as_deref(), Some("first"));
        assert_eq!(reviews[1].text.as_deref(), Some("second"));
    }

    #[test]
    fn missing_file_is_empty_corpus() {
        let dir = tempdir().unwrap();
        let store = ReviewStore::new(dir.path().join("absent.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn remove_deletes_only_the_target() {
        let dir = tempdir().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.jsonl"));
        let keep = sample("hotel-a", "keep me");
        let doomed = sample("hotel-b", "drop me");
        store.append_all(&[keep.clone(), doomed.clone()]).unwrap();

        let removed = store.remove(doomed.id).unwrap();
        assert_eq!(removed.id, doomed.id);

        let reviews = store.load().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, keep.id);
    }

    #[test]
    fn remove_unknown_id_is_an_error() {
        let dir = tempdir().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.jsonl"));
        store.append(&sample("hotel-a", "only")).unwrap();

        let missing = Uuid::new_v4();
        match store.remove(missing) {
            Err(CorpusError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn rewrite_replaces_content() {
        let dir = tempdir().unwrap();
        let store = ReviewStore::new(dir.path().join("reviews.jsonl"));
        store.append(&sample("hotel-a", "old")).unwrap();

        let replacement = sample("hotel-c", "new");
        store.rewrite(std::slice::from_ref(&replacement)).unwrap();

        let reviews = store.load().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].text.as_deref(), Some("new"));
    }
}
