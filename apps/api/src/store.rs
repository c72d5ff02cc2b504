//! File-backed whole-document JSON store.
//!
//! One value of type `T` corresponds 1:1 with one JSON file on disk. Every
//! operation works on the entire document: reads load and parse the whole
//! file, writes serialize and overwrite the whole file. No indexes, no
//! partial updates.
//!
//! Reads tolerate a missing or unparseable file by yielding `T::default()`,
//! so callers cannot distinguish "empty" from "missing" from "corrupt" (a
//! documented fragility of the on-disk format, not a feature). Writes
//! propagate failure as [`AppError::Storage`].
//!
//! A per-store async mutex serializes every read-modify-write cycle, so two
//! concurrent updates of the same document cannot lose an append.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::AppError;

pub struct JsonStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _doc: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore {
            path: path.into(),
            lock: Mutex::new(()),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the current document. A missing or unparseable file comes back
    /// as `T::default()`.
    pub async fn read(&self) -> T {
        let _guard = self.lock.lock().await;
        self.load()
    }

    /// Runs one read-modify-write cycle under the store lock. The closure
    /// may refuse the mutation with a domain error, in which case nothing is
    /// written back.
    pub async fn update<F, R>(&self, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut T) -> Result<R, AppError>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load();
        let out = f(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }

    fn load(&self) -> T {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "document missing, starting empty");
                return T::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable document, treating as empty");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt document, treating as empty");
                T::default()
            }
        }
    }

    // Plain in-place overwrite, no atomic rename: a crash mid-write can
    // leave a truncated file, which `load` then treats as empty.
    fn save(&self, doc: &T) -> Result<(), AppError> {
        let body = serde_json::to_string_pretty(doc)
            .map_err(|e| AppError::Storage(format!("serializing {}: {e}", self.path.display())))?;
        std::fs::write(&self.path, body)
            .map_err(|e| AppError::Storage(format!("writing {}: {e}", self.path.display())))
    }
}
