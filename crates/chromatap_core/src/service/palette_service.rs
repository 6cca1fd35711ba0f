//! Palette card use-cases.
//!
//! # Responsibility
//! - Save a palette card: update it when it was saved before, otherwise
//!   append it to the first project (creating `Local` when none exists).
//! - Duplicate a saved palette inside its project.
//!
//! # Invariants
//! - Blank names fall back to `DEFAULT_PALETTE_NAME`; other names are trimmed.
//! - Empty color entries are dropped; order and duplicates are kept.

use crate::model::palette::{Palette, PaletteUpdate, DEFAULT_PALETTE_NAME};
use crate::store::{ProjectRepository, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Project created on first save when the store holds no project.
pub const LOCAL_PROJECT_NAME: &str = "Local";

/// Service error for palette use-cases.
#[derive(Debug)]
pub enum PaletteServiceError {
    ProjectNotFound(String),
    PaletteNotFound {
        project_id: String,
        palette_id: String,
    },
    Store(StoreError),
    /// Write succeeded but the read-back did not see it.
    InconsistentState(&'static str),
}

impl Display for PaletteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::PaletteNotFound {
                project_id,
                palette_id,
            } => write!(f, "palette not found: {palette_id} in project {project_id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent palette state: {details}"),
        }
    }
}

impl Error for PaletteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for PaletteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Ids of a saved palette, kept by the UI for later updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTarget {
    pub project_id: String,
    pub palette_id: String,
}

/// Palette service facade over repository implementations.
pub struct PaletteService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> PaletteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Saves a palette card and returns where it lives.
    ///
    /// With `target`, the palette's name and colors are replaced. Without it,
    /// a new palette is appended to the first project.
    pub fn save_palette(
        &self,
        target: Option<&PaletteTarget>,
        name: &str,
        colors: &[String],
    ) -> Result<PaletteTarget, PaletteServiceError> {
        let name = normalize_palette_name(name);
        let colors = normalize_colors(colors);

        if let Some(target) = target {
            let update = PaletteUpdate {
                name: Some(name),
                colors: Some(colors),
            };
            return match self.repo.update_palette_in_project(
                &target.project_id,
                &target.palette_id,
                &update,
            )? {
                Some(_) => Ok(target.clone()),
                None => Err(self.missing(&target.project_id, &target.palette_id)?),
            };
        }

        let project_id = match self.repo.list_projects()?.into_iter().next() {
            Some(project) => project.id,
            None => {
                let project = self.repo.create_project(LOCAL_PROJECT_NAME)?;
                info!(
                    "event=palette_save module=service status=ok created_project={}",
                    project.id
                );
                project.id
            }
        };

        let palette = self
            .repo
            .add_palette_to_project(&project_id, &name, &colors)?
            .ok_or(PaletteServiceError::InconsistentState(
                "target project vanished before palette insert",
            ))?;

        Ok(PaletteTarget {
            project_id,
            palette_id: palette.id,
        })
    }

    /// Appends a copy named `<name> (copy)` to the same project.
    pub fn duplicate_palette(
        &self,
        project_id: &str,
        palette_id: &str,
    ) -> Result<Palette, PaletteServiceError> {
        let Some(source) = self.repo.find_palette(project_id, palette_id)? else {
            return Err(self.missing(project_id, palette_id)?);
        };
        self.repo
            .add_palette_to_project(
                project_id,
                &format!("{} (copy)", source.name),
                &source.colors,
            )?
            .ok_or(PaletteServiceError::InconsistentState(
                "project vanished before palette copy",
            ))
    }

    /// Builds the precise not-found error for a project/palette pair.
    fn missing(
        &self,
        project_id: &str,
        palette_id: &str,
    ) -> Result<PaletteServiceError, PaletteServiceError> {
        Ok(match self.repo.find_project(project_id)? {
            None => PaletteServiceError::ProjectNotFound(project_id.to_string()),
            Some(_) => PaletteServiceError::PaletteNotFound {
                project_id: project_id.to_string(),
                palette_id: palette_id.to_string(),
            },
        })
    }
}

/// Trims `name`, falling back to the default palette name when blank.
pub fn normalize_palette_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PALETTE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

fn normalize_colors(colors: &[String]) -> Vec<String> {
    colors
        .iter()
        .filter(|color| !color.is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize_palette_name;

    #[test]
    fn blank_names_fall_back_to_default() {
        assert_eq!(normalize_palette_name("   "), "Untitled Palette");
        assert_eq!(normalize_palette_name("  Sunset "), "Sunset");
    }
}
