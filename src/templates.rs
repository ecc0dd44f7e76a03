//! Read-only store of model documents.
//!
//! A template directory holds model `.docx` files, optional preview images
//! and a `metadata.json` object mapping each template id to its
//! [`TemplateInfo`]. Adding and deleting templates is left to whatever
//! manages the directory.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the metadata file inside a template directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Errors raised while reading a template directory.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The metadata file exists but could not be read
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The metadata file is not the expected JSON object
    #[error("Malformed template metadata {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No template with this id
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

/// One entry of `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    /// Display name
    pub name: String,
    /// File name of the model document, relative to the store directory
    pub filename: String,
    /// File name of the preview image, if any
    #[serde(default)]
    pub image: Option<String>,
}

/// Templates of one directory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    dir: PathBuf,
    templates: BTreeMap<String, TemplateInfo>,
}

impl TemplateStore {
    /// Read the store in `dir`. A directory without a metadata file, or no
    /// directory at all, is an empty store.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, TemplateError> {
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(METADATA_FILE);

        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no template metadata, store is empty");
                return Ok(Self {
                    dir,
                    templates: BTreeMap::new(),
                });
            },
            Err(source) => return Err(TemplateError::Io { path, source }),
        };

        let templates: BTreeMap<String, TemplateInfo> = serde_json::from_slice(&data)
            .map_err(|source| TemplateError::Metadata {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), templates = templates.len(), "loaded template metadata");
        Ok(Self { dir, templates })
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every template, ordered by id.
    pub fn templates(&self) -> impl Iterator<Item = &TemplateInfo> {
        self.templates.values()
    }

    pub fn get(&self, id: &str) -> Option<&TemplateInfo> {
        self.templates.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Path of the model document for `id`.
    ///
    /// `None` for unknown ids and for entries whose file name is not a
    /// plain name inside the store directory.
    pub fn lookup_template_path(&self, id: &str) -> Option<PathBuf> {
        let info = self.templates.get(id)?;
        let filename = Path::new(&info.filename);
        if filename.file_name() != Some(filename.as_os_str()) {
            warn!(id, filename = %info.filename, "template file name escapes the store directory");
            return None;
        }
        Some(self.dir.join(filename))
    }

    /// Like [`lookup_template_path`](Self::lookup_template_path), with an
    /// error naming the id.
    pub fn require_template_path(&self, id: &str) -> Result<PathBuf, TemplateError> {
        self.lookup_template_path(id)
            .ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))
    }
}
