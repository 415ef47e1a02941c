// Publisher store: a single JSON file holding every known publisher and
// its personal access token. The whole document is read at the start of
// an operation and rewritten in full on every change.

use crate::error::{PublisherError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A publisher known locally, with the token used to talk to the gallery.
/// Extra fields written by other tools ride along in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Publisher {
    pub name: String,
    #[serde(rename = "pat")]
    pub token: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Publisher {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Publisher {
            name: name.into(),
            token: token.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// On-disk shape of the store. Fields we do not know about are kept so
/// that rewriting the file does not drop them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StoreDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub publishers: Vec<Publisher>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `"publishers": null` reads the same as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Publisher>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Publisher>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StoreDocument {
    pub fn find(&self, name: &str) -> Option<&Publisher> {
        self.publishers.iter().find(|p| p.name == name)
    }
}

/// Runs after every successful write of the store file.
pub trait SaveHook {
    fn after_save(&self, path: &Path) -> std::io::Result<()>;
}

/// Marks the store file hidden on Windows; does nothing elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct HideFile;

impl SaveHook for HideFile {
    #[cfg(windows)]
    fn after_save(&self, path: &Path) -> std::io::Result<()> {
        let status = std::process::Command::new("attrib")
            .arg("+H")
            .arg(path)
            .status()?;
        if !status.success() {
            return Err(std::io::Error::new(
                ErrorKind::Other,
                format!("attrib exited with {}", status),
            ));
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn after_save(&self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

/// Loads and saves the store document at a fixed path.
pub struct PublisherStore {
    path: PathBuf,
    hook: Box<dyn SaveHook>,
}

impl PublisherStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_hook(path, HideFile)
    }

    pub fn with_hook(path: impl Into<PathBuf>, hook: impl SaveHook + 'static) -> Self {
        PublisherStore {
            path: path.into(),
            hook: Box::new(hook),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store. A missing file is an empty store. Bytes that are
    /// not UTF-8 are reported as a parse error, like malformed JSON.
    pub fn load(&self) -> Result<StoreDocument> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => b"{}".to_vec(),
            Err(e) => return Err(PublisherError::io(&self.path, e)),
        };
        let doc: StoreDocument =
            serde_json::from_slice(&raw).map_err(|source| PublisherError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), publishers = doc.publishers.len(), "loaded publisher store");
        Ok(doc)
    }

    /// Overwrite the store file with `doc`. A failing save hook is
    /// logged and otherwise ignored.
    pub fn save<'a>(&self, doc: &'a StoreDocument) -> Result<&'a StoreDocument> {
        let json = serde_json::to_string(doc).map_err(|source| PublisherError::Parse {
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PublisherError::io(parent, e))?;
        }
        std::fs::write(&self.path, json).map_err(|e| PublisherError::io(&self.path, e))?;
        debug!(path = %self.path.display(), publishers = doc.publishers.len(), "saved publisher store");

        if let Err(e) = self.hook.after_save(&self.path) {
            warn!(path = %self.path.display(), error = %e, "could not hide publisher store file");
        }
        Ok(doc)
    }

    /// Replace any record named like `publisher` with it, then save.
    pub fn upsert_publisher(
        &self,
        doc: &mut StoreDocument,
        publisher: Publisher,
    ) -> Result<Publisher> {
        doc.publishers.retain(|p| p.name != publisher.name);
        doc.publishers.push(publisher.clone());
        self.save(doc)?;
        info!(publisher = %publisher.name, "stored publisher token");
        Ok(publisher)
    }

    /// Drop the record named `name`, then save.
    pub fn remove_publisher(&self, doc: &mut StoreDocument, name: &str) -> Result<()> {
        doc.publishers.retain(|p| p.name != name);
        self.save(doc)?;
        info!(publisher = %name, "removed publisher token");
        Ok(())
    }
}
