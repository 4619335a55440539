//! Document store: named JSON documents with defaults.

#[cfg(test)]
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::documents::{KnowledgeBase, OrgSettings, SessionBook};

/// The documents the application persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentName {
    Org,
    Knowledge,
    Sessions,
}

impl DocumentName {
    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentName::Org => "org.json",
            DocumentName::Knowledge => "knowledge.json",
            DocumentName::Sessions => "sessions.json",
        }
    }

    /// Content written when the document does not exist yet.
    pub fn default_content(&self) -> Value {
        let value = match self {
            DocumentName::Org => serde_json::to_value(OrgSettings::default()),
            DocumentName::Knowledge => serde_json::to_value(KnowledgeBase::default()),
            DocumentName::Sessions => serde_json::to_value(SessionBook::default()),
        };
        value.unwrap_or(Value::Null)
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Key-value store of JSON documents.
///
/// Writes are whole-document replacements. Callers do read-modify-write with
/// no atomicity guarantee.
pub trait DocumentStore: Send + Sync {
    /// Load a document, creating it with default content if absent.
    fn load(&self, name: DocumentName) -> Result<Value>;

    /// Replace a document.
    fn save(&self, name: DocumentName, document: &Value) -> Result<()>;
}

/// Typed helpers over any [`DocumentStore`].
pub trait DocumentStoreExt: DocumentStore {
    fn load_as<T: DeserializeOwned>(&self, name: DocumentName) -> Result<T> {
        let value = self.load(name)?;
        serde_json::from_value(value).map_err(|e| Error::DocumentCorrupted {
            name: name.to_string(),
            source: e,
        })
    }

    fn save_as<T: Serialize>(&self, name: DocumentName, document: &T) -> Result<()> {
        let value = serde_json::to_value(document).map_err(|e| Error::DocumentEncode {
            name: name.to_string(),
            source: e,
        })?;
        self.save(name, &value)
    }

    fn org(&self) -> Result<OrgSettings> {
        self.load_as(DocumentName::Org)
    }

    fn set_org(&self, org: &OrgSettings) -> Result<()> {
        self.save_as(DocumentName::Org, org)
    }

    fn knowledge(&self) -> Result<KnowledgeBase> {
        self.load_as(DocumentName::Knowledge)
    }

    fn set_knowledge(&self, knowledge: &KnowledgeBase) -> Result<()> {
        self.save_as(DocumentName::Knowledge, knowledge)
    }

    fn sessions(&self) -> Result<SessionBook> {
        self.load_as(DocumentName::Sessions)
    }

    fn set_sessions(&self, sessions: &SessionBook) -> Result<()> {
        self.save_as(DocumentName::Sessions, sessions)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

// ─────────────────────────────────────────────────────────────────
// JSON File Store
// ─────────────────────────────────────────────────────────────────

/// One pretty-printed JSON file per document under a data directory.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, name: DocumentName) -> PathBuf {
        self.data_dir.join(name.file_name())
    }

    /// Create the data directory and any missing document.
    fn ensure(&self, name: DocumentName) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(|e| Error::IoWrite {
                path: self.data_dir.clone(),
                source: e,
            })?;
            info!(path = %self.data_dir.display(), "Created data directory");
        }

        let path = self.path(name);
        if !path.exists() {
            write_pretty(&path, name, &name.default_content())?;
            debug!(document = %name, "Created document with defaults");
        }
        Ok(())
    }
}

fn write_pretty(path: &Path, name: DocumentName, value: &Value) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| Error::DocumentEncode {
        name: name.to_string(),
        source: e,
    })?;
    fs::write(path, content).map_err(|e| Error::IoWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

impl DocumentStore for JsonFileStore {
    fn load(&self, name: DocumentName) -> Result<Value> {
        self.ensure(name)?;
        let path = self.path(name);
        let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::DocumentCorrupted {
            name: name.to_string(),
            source: e,
        })
    }

    fn save(&self, name: DocumentName, document: &Value) -> Result<()> {
        self.ensure(name)?;
        write_pretty(&self.path(name), name, document)?;
        debug!(document = %name, "Document saved");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// In-Memory Store
// ─────────────────────────────────────────────────────────────────

/// Store kept entirely in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<DocumentName, Value>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl DocumentStore for MemoryStore {
    fn load(&self, name: DocumentName) -> Result<Value> {
        let mut documents = self.documents.write();
        Ok(documents
            .entry(name)
            .or_insert_with(|| name.default_content())
            .clone())
    }

    fn save(&self, name: DocumentName, document: &Value) -> Result<()> {
        self.documents.write().insert(name, document.clone());
        Ok(())
    }
}
