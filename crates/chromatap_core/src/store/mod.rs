//! File-backed persistence for projects and the legacy color list.
//!
//! # Responsibility
//! - Own the on-disk JSON documents and their read/write protocol.
//! - Expose project/palette CRUD with not-found reported as `None`/`false`.
//!
//! # Invariants
//! - Every call reads the full document from disk; nothing is cached.
//! - Writes go to a sibling temp file that is renamed over the target.
//! - An unparseable document is backed up byte-for-byte and read as empty.
//! - Filesystem failures propagate as `StoreError::Io`.

use crate::model::palette::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

mod json_file;
mod legacy;
pub mod palette_store;

pub use palette_store::{PaletteStore, ProjectRepository};

/// Default file name of the projects document.
pub const PROJECTS_FILE_NAME: &str = "projects.json";
/// Default file name of the legacy flat color list.
pub const LEGACY_FILE_NAME: &str = "palettes.json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store failure that callers must surface; not-found is never an error.
#[derive(Debug)]
pub enum StoreError {
    Io {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
    Validation(ModelValidationError),
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { op, path, source } => {
                write!(f, "failed to {op} `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize store document: {err}"),
            Self::Validation(err) => write!(f, "invalid project document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<ModelValidationError> for StoreError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Location of the store documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_dir: PathBuf,
    pub projects_file_name: String,
    pub legacy_file_name: String,
}

impl StoreConfig {
    /// Uses the default file names inside `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            projects_file_name: PROJECTS_FILE_NAME.to_string(),
            legacy_file_name: LEGACY_FILE_NAME.to_string(),
        }
    }

    pub fn projects_path(&self) -> PathBuf {
        self.base_dir.join(&self.projects_file_name)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.base_dir.join(&self.legacy_file_name)
    }
}
