// src/emails/store.rs
// =============================================================================
// Where the aggregate email set ends up.
//
// JsonFileStore writes a JSON object whose keys are the email addresses and
// whose values are all 0:
//
//   {
//       "a@b.com": 0,
//       "x@y.com": 0
//   }
//
// The whole file is replaced on every save. The new content goes to a temp
// file in the same directory first and is then renamed over the target, so
// the file on disk is always a complete snapshot.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::error::PersistError;

pub trait EmailStore: Send + Sync {
    /// Replaces whatever was stored before with `emails`
    fn save(&self, emails: &BTreeSet<String>) -> Result<(), PersistError>;
}

impl<S: EmailStore + ?Sized> EmailStore for Arc<S> {
    fn save(&self, emails: &BTreeSet<String>) -> Result<(), PersistError> {
        (**self).save(emails)
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Renders the email set as pretty JSON with 4-space indentation
pub fn render_json(emails: &BTreeSet<String>) -> Result<Vec<u8>, PersistError> {
    let object: BTreeMap<&str, u8> = emails.iter().map(|email| (email.as_str(), 0)).collect();

    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    object.serialize(&mut serializer)?;
    Ok(out)
}

impl EmailStore for JsonFileStore {
    fn save(&self, emails: &BTreeSet<String>) -> Result<(), PersistError> {
        let content = render_json(emails)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&content)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| PersistError::Io(e.error))?;
        Ok(())
    }
}

/// Keeps every saved snapshot in memory (for tests and dry runs)
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: Mutex<Vec<BTreeSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<BTreeSet<String>> {
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<BTreeSet<String>> {
        self.snapshots().pop()
    }
}

impl EmailStore for MemoryStore {
    fn save(&self, emails: &BTreeSet<String>) -> Result<(), PersistError> {
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(emails.clone());
        Ok(())
    }
}
