//! Project/palette repository contract and its JSON-file implementation.
//!
//! # Responsibility
//! - Provide CRUD over projects and their palettes.
//! - Keep file-format details behind the `ProjectRepository` contract.
//!
//! # Invariants
//! - Each mutating call is one full read-mutate-write cycle.
//! - Not-found never writes and is reported as `None`/`false`.
//! - Returned values are independent copies of persisted state.
//! - Mutating a palette refreshes both its own and its project's `updated_at`.

use super::json_file::{ensure_file, read_document, write_document};
use super::{StoreConfig, StoreResult};
use crate::model::palette::{validate_projects, Palette, PaletteUpdate, Project};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Repository interface for project and palette CRUD.
pub trait ProjectRepository {
    /// Lists all projects in persisted order.
    ///
    /// A missing document is created empty; a corrupted one is backed up and
    /// read as empty. Only filesystem failures are errors.
    fn list_projects(&self) -> StoreResult<Vec<Project>>;
    fn create_project(&self, name: &str) -> StoreResult<Project>;
    fn rename_project(&self, project_id: &str, new_name: &str) -> StoreResult<Option<Project>>;
    fn delete_project(&self, project_id: &str) -> StoreResult<bool>;
    fn add_palette_to_project(
        &self,
        project_id: &str,
        name: &str,
        colors: &[String],
    ) -> StoreResult<Option<Palette>>;
    fn update_palette_in_project(
        &self,
        project_id: &str,
        palette_id: &str,
        update: &PaletteUpdate,
    ) -> StoreResult<Option<Palette>>;
    fn delete_palette_from_project(&self, project_id: &str, palette_id: &str)
        -> StoreResult<bool>;
    /// Replaces the whole collection and returns what was written.
    fn save_all_projects(&self, projects: Vec<Project>) -> StoreResult<Vec<Project>>;

    fn find_project(&self, project_id: &str) -> StoreResult<Option<Project>> {
        Ok(self
            .list_projects()?
            .into_iter()
            .find(|project| project.id == project_id))
    }

    fn find_palette(&self, project_id: &str, palette_id: &str) -> StoreResult<Option<Palette>> {
        Ok(self
            .find_project(project_id)?
            .and_then(|project| project.palette(palette_id).cloned()))
    }
}

/// JSON-file-backed store rooted at one directory.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    config: StoreConfig,
}

impl PaletteStore {
    /// Opens the store, creating the directory and both documents if absent.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        ensure_file(&config.projects_path())?;
        ensure_file(&config.legacy_path())?;
        info!(
            "event=store_open module=store status=ok projects_file={} legacy_file={}",
            config.projects_file_name, config.legacy_file_name
        );
        Ok(Self { config })
    }

    /// Opens a store with default file names inside `base_dir`.
    pub fn open_in(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(StoreConfig::new(base_dir.as_ref()))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the projects document, recreating it when it went missing.
    pub fn projects_file_path(&self) -> StoreResult<PathBuf> {
        let path = self.config.projects_path();
        ensure_file(&path)?;
        Ok(path)
    }

    /// Full project collection as pretty-printed JSON, for backup/inspection.
    pub fn export_projects_json(&self) -> StoreResult<String> {
        let projects = self.list_projects()?;
        Ok(serde_json::to_string_pretty(&projects)?)
    }

    pub(super) fn load_projects(&self) -> StoreResult<Vec<Project>> {
        let projects = read_document(&self.config.projects_path(), |projects: &Vec<Project>| {
            validate_projects(projects).map_err(|err| err.to_string())
        })?;
        Ok(projects.unwrap_or_default())
    }

    fn write_projects(&self, projects: &[Project]) -> StoreResult<()> {
        write_document(&self.config.projects_path(), projects)
    }

    /// Runs one read-mutate-write cycle; `None` from `mutate` skips the write.
    fn mutate_projects<T>(
        &self,
        event: &'static str,
        mutate: impl FnOnce(&mut Vec<Project>) -> Option<T>,
    ) -> StoreResult<Option<T>> {
        let mut projects = self.load_projects()?;
        let Some(result) = mutate(&mut projects) else {
            debug!("event={event} module=store status=not_found");
            return Ok(None);
        };
        self.write_projects(&projects)?;
        Ok(Some(result))
    }
}

impl ProjectRepository for PaletteStore {
    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        self.load_projects()
    }

    fn create_project(&self, name: &str) -> StoreResult<Project> {
        let project = Project::new(name);
        let mut projects = self.load_projects()?;
        projects.push(project.clone());
        self.write_projects(&projects)?;
        info!(
            "event=project_create module=store status=ok project_id={} total={}",
            project.id,
            projects.len()
        );
        Ok(project)
    }

    fn rename_project(&self, project_id: &str, new_name: &str) -> StoreResult<Option<Project>> {
        let renamed = self.mutate_projects("project_rename", |projects| {
            let project = projects.iter_mut().find(|project| project.id == project_id)?;
            project.name = new_name.to_string();
            project.touch(project.updated_at);
            Some(project.clone())
        })?;
        if renamed.is_some() {
            info!("event=project_rename module=store status=ok project_id={project_id}");
        }
        Ok(renamed)
    }

    fn delete_project(&self, project_id: &str) -> StoreResult<bool> {
        let deleted = self.mutate_projects("project_delete", |projects| {
            let before = projects.len();
            projects.retain(|project| project.id != project_id);
            (projects.len() != before).then_some(())
        })?;
        if deleted.is_some() {
            info!("event=project_delete module=store status=ok project_id={project_id}");
        }
        Ok(deleted.is_some())
    }

    fn add_palette_to_project(
        &self,
        project_id: &str,
        name: &str,
        colors: &[String],
    ) -> StoreResult<Option<Palette>> {
        let added = self.mutate_projects("palette_add", |projects| {
            let project = projects.iter_mut().find(|project| project.id == project_id)?;
            let palette = Palette::new(name, colors);
            project.palettes.push(palette.clone());
            project.touch(palette.updated_at);
            Some(palette)
        })?;
        if let Some(palette) = &added {
            info!(
                "event=palette_add module=store status=ok project_id={project_id} palette_id={} colors={}",
                palette.id,
                palette.colors.len()
            );
        }
        Ok(added)
    }

    fn update_palette_in_project(
        &self,
        project_id: &str,
        palette_id: &str,
        update: &PaletteUpdate,
    ) -> StoreResult<Option<Palette>> {
        let updated = self.mutate_projects("palette_update", |projects| {
            let project = projects.iter_mut().find(|project| project.id == project_id)?;
            let floor = project.palette(palette_id)?.updated_at;
            let at = project.touch(floor);
            let palette = project.palette_mut(palette_id)?;
            palette.apply(update, at);
            Some(palette.clone())
        })?;
        if updated.is_some() {
            info!(
                "event=palette_update module=store status=ok project_id={project_id} palette_id={palette_id} name={} colors={}",
                update.name.is_some(),
                update.colors.is_some()
            );
        }
        Ok(updated)
    }

    fn delete_palette_from_project(
        &self,
        project_id: &str,
        palette_id: &str,
    ) -> StoreResult<bool> {
        let deleted = self.mutate_projects("palette_delete", |projects| {
            let project = projects.iter_mut().find(|project| project.id == project_id)?;
            let before = project.palettes.len();
            project.palettes.retain(|palette| palette.id != palette_id);
            if project.palettes.len() == before {
                return None;
            }
            project.touch(project.updated_at);
            Some(())
        })?;
        if deleted.is_some() {
            info!(
                "event=palette_delete module=store status=ok project_id={project_id} palette_id={palette_id}"
            );
        }
        Ok(deleted.is_some())
    }

    fn save_all_projects(&self, projects: Vec<Project>) -> StoreResult<Vec<Project>> {
        validate_projects(&projects)?;
        self.write_projects(&projects)?;
        info!(
            "event=projects_save_all module=store status=ok total={}",
            projects.len()
        );
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::{PaletteStore, ProjectRepository};
    use crate::model::palette::PaletteUpdate;

    #[test]
    fn open_creates_both_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PaletteStore::open_in(dir.path().join("data")).expect("open");

        assert!(store.config().projects_path().exists());
        assert!(store.config().legacy_path().exists());
        assert!(store.list_projects().expect("list").is_empty());
    }

    #[test]
    fn not_found_paths_do_not_rewrite_the_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PaletteStore::open_in(dir.path()).expect("open");
        let path = store.config().projects_path();
        std::fs::write(&path, "[]\n").expect("seed");

        assert!(store.rename_project("proj_missing", "x").unwrap().is_none());
        assert!(!store.delete_project("proj_missing").unwrap());
        assert!(store
            .add_palette_to_project("proj_missing", "P", &[])
            .unwrap()
            .is_none());
        assert!(store
            .update_palette_in_project("proj_missing", "pal_x", &PaletteUpdate::rename("y"))
            .unwrap()
            .is_none());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn projects_file_path_recreates_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PaletteStore::open_in(dir.path()).expect("open");
        std::fs::remove_file(store.config().projects_path()).expect("remove");

        let path = store.projects_file_path().expect("path");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
