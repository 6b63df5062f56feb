//! Saved-animation library: named snapshots kept in a key-value store.
//!
//! DESIGN
//! ======
//! The whole collection lives under one key as a JSON array of
//! `{id, name, data}` records. Every operation reads the collection and
//! every mutation writes all of it back; there is no incremental patching
//! and no concurrency check. Collections are expected to stay small.
//!
//! Import dispatches on the top-level shape of the file: an array replaces
//! the collection, an object replaces the active document.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::consts::STORAGE_KEY;
use crate::doc::{Animation, DocError};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::DocStore;

/// One saved snapshot. Never mutated after it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAnimation {
    pub id: String,
    pub name: String,
    pub data: Animation,
}

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("saved animation not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("saved collection is unreadable: {0}")]
    Corrupt(String),
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("import file is neither an animation nor a list of saved animations: {0}")]
    Malformed(String),
    #[error("import file repeats id {0}")]
    DuplicateId(String),
    #[error("imported animation is invalid: {0}")]
    Document(#[from] DocError),
    #[error(transparent)]
    Library(#[from] LibraryError),
}

/// What an import file turned out to be.
#[derive(Debug)]
pub enum ImportKind {
    Records(Vec<SavedAnimation>),
    Document(Value),
    Malformed(String),
}

/// What an import changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The saved collection was replaced with this many records.
    Library(usize),
    /// The active document was replaced.
    Document,
}

// =============================================================================
// EXPORT / CLASSIFY
// =============================================================================

/// Pretty-printed JSON of a single animation, for download.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_one(doc: &Animation) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(doc)
}

/// Pretty-printed JSON array of saved records, for download.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_all(records: &[SavedAnimation]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(records)
}

/// Sort raw import bytes into records, a single document, or neither.
#[must_use]
pub fn classify(raw: &[u8]) -> ImportKind {
    let value: Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(e) => return ImportKind::Malformed(e.to_string()),
    };
    match value {
        Value::Array(_) => match serde_json::from_value::<Vec<SavedAnimation>>(value) {
            Ok(records) => ImportKind::Records(records),
            Err(e) => ImportKind::Malformed(e.to_string()),
        },
        Value::Object(_) => ImportKind::Document(value),
        other => ImportKind::Malformed(format!("unexpected top-level {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// LIBRARY
// =============================================================================

pub struct Library<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Library<S> {
    /// Library under the default storage key.
    pub fn new(store: S) -> Self {
        Self { store, key: STORAGE_KEY.to_string() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every saved record in save order; empty when nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds something other
    /// than a record list.
    pub fn list(&self) -> Result<Vec<SavedAnimation>, LibraryError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| LibraryError::Corrupt(e.to_string()))
    }

    /// Snapshot `doc` under `name` and append it.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or written.
    pub fn save(&mut self, name: &str, doc: &Animation) -> Result<SavedAnimation, LibraryError> {
        let mut records = self.list()?;
        let id = mint_id(&records);
        let record = SavedAnimation { id, name: name.to_string(), data: doc.clone() };
        records.push(record.clone());
        self.write(&records)?;
        info!(id = %record.id, count = records.len(), "library: saved");
        Ok(record)
    }

    /// The snapshot saved under `id`. The record stays in the library.
    ///
    /// # Errors
    ///
    /// [`LibraryError::NotFound`] when no record has that id.
    pub fn load(&self, id: &str) -> Result<Animation, LibraryError> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.data)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))
    }

    /// Remove the record with `id`; absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or written.
    pub fn delete(&mut self, id: &str) -> Result<(), LibraryError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            debug!(id, "library: delete of unknown id");
            return Ok(());
        }
        self.write(&records)?;
        info!(id, count = records.len(), "library: deleted");
        Ok(())
    }

    /// Every record as a downloadable file.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read.
    pub fn export_all(&self) -> Result<Vec<u8>, LibraryError> {
        Ok(export_all(&self.list()?)?)
    }

    /// Apply an import file. A record list replaces the whole collection; a
    /// single object is validated and loaded into `doc_store`. Nothing changes
    /// unless the whole import succeeds.
    ///
    /// # Errors
    ///
    /// [`ImportError`] describing why the file was rejected.
    pub fn import_file(&mut self, doc_store: &mut DocStore, raw: &[u8]) -> Result<ImportOutcome, ImportError> {
        match classify(raw) {
            ImportKind::Records(records) => {
                let mut seen = HashSet::new();
                if let Some(dup) = records.iter().find(|r| !seen.insert(r.id.as_str())) {
                    return Err(ImportError::DuplicateId(dup.id.clone()));
                }
                self.write(&records)?;
                info!(count = records.len(), "library: collection replaced by import");
                Ok(ImportOutcome::Library(records.len()))
            }
            ImportKind::Document(value) => {
                doc_store.load_value(value)?;
                info!("library: active document replaced by import");
                Ok(ImportOutcome::Document)
            }
            ImportKind::Malformed(reason) => Err(ImportError::Malformed(reason)),
        }
    }

    fn write(&mut self, records: &[SavedAnimation]) -> Result<(), LibraryError> {
        let raw = serde_json::to_string(records)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }
}

/// Random v4 id, re-drawn in the vanishing case it collides with an existing record.
fn mint_id(records: &[SavedAnimation]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if records.iter().all(|r| r.id != id) {
            return id;
        }
    }
}
