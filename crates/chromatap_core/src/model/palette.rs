//! Project and palette documents.
//!
//! # Responsibility
//! - Define the on-disk JSON shapes (`camelCase`, unknown fields rejected).
//! - Validate id shape and uniqueness at the persistence boundary.
//!
//! # Invariants
//! - `created_at` is set once; `updated_at` only moves forward.
//! - `colors` keeps caller order and may hold duplicates.

use super::stamp::{self, generate_id, iso_millis, IdKind, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name used when a project is created without one.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";
/// Name used when a palette is created without one.
pub const DEFAULT_PALETTE_NAME: &str = "Untitled Palette";

/// Named, ordered list of hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Palette {
    pub id: String,
    pub name: String,
    pub colors: Vec<String>,
    #[serde(with = "iso_millis")]
    pub created_at: Timestamp,
    #[serde(with = "iso_millis")]
    pub updated_at: Timestamp,
}

/// Top-level grouping owning an ordered list of palettes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(with = "iso_millis")]
    pub created_at: Timestamp,
    #[serde(with = "iso_millis")]
    pub updated_at: Timestamp,
    pub palettes: Vec<Palette>,
}

/// Partial palette update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl PaletteUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            colors: None,
        }
    }

    pub fn recolor(colors: &[String]) -> Self {
        Self {
            name: None,
            colors: Some(colors.to_vec()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.colors.is_none()
    }
}

/// Schema violations found in project documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    InvalidId { kind: IdKind, id: String },
    DuplicateId(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId { kind, id } => write!(
                f,
                "id `{id}` must start with `{}_` followed by a non-empty suffix",
                kind.prefix()
            ),
            Self::DuplicateId(id) => write!(f, "duplicate id `{id}`"),
        }
    }
}

impl Error for ModelValidationError {}

impl Palette {
    /// Creates a palette with a fresh id and both timestamps set to now.
    pub fn new(name: impl Into<String>, colors: &[String]) -> Self {
        let created = stamp::now();
        Self {
            id: generate_id(IdKind::Palette),
            name: name.into(),
            colors: colors.to_vec(),
            created_at: created,
            updated_at: created,
        }
    }

    /// Applies present fields and refreshes `updated_at` to `at`.
    pub fn apply(&mut self, update: &PaletteUpdate, at: Timestamp) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(colors) = &update.colors {
            self.colors = colors.clone();
        }
        self.updated_at = at;
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if !IdKind::Palette.matches(&self.id) {
            return Err(ModelValidationError::InvalidId {
                kind: IdKind::Palette,
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

impl Project {
    /// Creates an empty project with a fresh id and both timestamps set to now.
    pub fn new(name: impl Into<String>) -> Self {
        let created = stamp::now();
        Self {
            id: generate_id(IdKind::Project),
            name: name.into(),
            created_at: created,
            updated_at: created,
            palettes: Vec::new(),
        }
    }

    pub fn palette(&self, palette_id: &str) -> Option<&Palette> {
        self.palettes.iter().find(|palette| palette.id == palette_id)
    }

    pub fn palette_mut(&mut self, palette_id: &str) -> Option<&mut Palette> {
        self.palettes
            .iter_mut()
            .find(|palette| palette.id == palette_id)
    }

    /// Moves `updated_at` strictly forward, past `floor` as well.
    pub fn touch(&mut self, floor: Timestamp) -> Timestamp {
        let at = stamp::next_after(self.updated_at.max(floor));
        self.updated_at = at;
        at
    }

    /// Validates this project and its palettes, including palette id
    /// uniqueness within the project.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if !IdKind::Project.matches(&self.id) {
            return Err(ModelValidationError::InvalidId {
                kind: IdKind::Project,
                id: self.id.clone(),
            });
        }
        let mut seen = HashSet::new();
        for palette in &self.palettes {
            palette.validate()?;
            if !seen.insert(palette.id.as_str()) {
                return Err(ModelValidationError::DuplicateId(palette.id.clone()));
            }
        }
        Ok(())
    }
}

/// Validates a full project collection, including project id uniqueness.
pub fn validate_projects(projects: &[Project]) -> Result<(), ModelValidationError> {
    let mut seen = HashSet::new();
    for project in projects {
        project.validate()?;
        if !seen.insert(project.id.as_str()) {
            return Err(ModelValidationError::DuplicateId(project.id.clone()));
        }
    }
    Ok(())
}
