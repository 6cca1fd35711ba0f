//! FFI use-case API for the palette UI.
//!
//! # Responsibility
//! - Expose the store as a flat set of named, synchronous operations.
//! - Carry structured data across the boundary as JSON text.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Not-found is a successful response with `json = "null"` or `"false"`;
//!   `ok = false` means the operation failed and nothing was applied.

use chromatap_core::{
    core_version as core_version_inner, hsv_to_rgb, init_logging as init_logging_inner,
    ping as ping_inner, PaletteService, PaletteStore, PaletteTarget, PaletteUpdate, Project,
    ProjectRepository, SwatchInfo, DEFAULT_PALETTE_NAME, DEFAULT_PROJECT_NAME,
};
use log::error;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const DATA_DIR_ENV: &str = "CHROMATAP_DATA_DIR";
const DATA_DIR_NAME: &str = "chromatap";
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
// Each store call is a read-mutate-write cycle; calls must not interleave.
static STORE_CALLS: Mutex<()> = Mutex::new(());

/// Minimal health-check API for bridge smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Response envelope for every store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    /// Whether the operation completed.
    pub ok: bool,
    /// JSON payload on success.
    pub json: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl StoreResponse {
    fn success(json: String, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            json: Some(json),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            json: None,
            message: message.into(),
        }
    }
}

/// Lists all projects.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_list() -> StoreResponse {
    respond("projects_list", |store| store.list_projects(), |_| "OK.")
}

/// Creates a project; a missing or blank name uses the default.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_create(name: Option<String>) -> StoreResponse {
    let name = non_blank(name).unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
    respond(
        "projects_create",
        |store| store.create_project(&name),
        |_| "Project created.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn projects_rename(project_id: String, new_name: String) -> StoreResponse {
    respond(
        "projects_rename",
        |store| store.rename_project(&project_id, &new_name),
        |renamed| found(renamed.is_some(), "Project renamed.", "Project not found."),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn projects_delete(project_id: String) -> StoreResponse {
    respond(
        "projects_delete",
        |store| store.delete_project(&project_id),
        |deleted| found(*deleted, "Project deleted.", "Project not found."),
    )
}

/// Adds a palette; a missing or blank name uses the default.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_palette_add(
    project_id: String,
    palette_name: Option<String>,
    colors: Vec<String>,
) -> StoreResponse {
    let name = non_blank(palette_name).unwrap_or_else(|| DEFAULT_PALETTE_NAME.to_string());
    respond(
        "projects_palette_add",
        |store| store.add_palette_to_project(&project_id, &name, &colors),
        |added| found(added.is_some(), "Palette added.", "Project not found."),
    )
}

/// Applies `{"name"?: string, "colors"?: string[]}` to one palette.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_palette_update(
    project_id: String,
    palette_id: String,
    updates_json: String,
) -> StoreResponse {
    let update = match serde_json::from_str::<PaletteUpdate>(&updates_json) {
        Ok(update) => update,
        Err(err) => {
            return StoreResponse::failure(format!(
                "projects_palette_update failed: invalid updates: {err}"
            ))
        }
    };
    respond(
        "projects_palette_update",
        |store| store.update_palette_in_project(&project_id, &palette_id, &update),
        |updated| found(updated.is_some(), "Palette updated.", "Palette not found."),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn projects_palette_delete(project_id: String, palette_id: String) -> StoreResponse {
    respond(
        "projects_palette_delete",
        |store| store.delete_palette_from_project(&project_id, &palette_id),
        |deleted| found(*deleted, "Palette deleted.", "Palette not found."),
    )
}

/// Saves a palette card; returns `{"projectId", "paletteId"}`.
///
/// Pass both ids of a previously saved card to update it in place; passing
/// only one of them is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_palette_save(
    project_id: Option<String>,
    palette_id: Option<String>,
    name: String,
    colors: Vec<String>,
) -> StoreResponse {
    let target = match (project_id, palette_id) {
        (Some(project_id), Some(palette_id)) => Some(PaletteTarget {
            project_id,
            palette_id,
        }),
        (None, None) => None,
        _ => {
            return StoreResponse::failure(
                "projects_palette_save failed: project_id and palette_id must be given together",
            )
        }
    };
    let result = with_store(|store| {
        PaletteService::new(store)
            .save_palette(target.as_ref(), &name, &colors)
            .map_err(|err| err.to_string())
    })
    .and_then(|saved| {
        to_json(&serde_json::json!({
            "projectId": saved.project_id,
            "paletteId": saved.palette_id,
        }))
    });
    match result {
        Ok(json) => StoreResponse::success(json, "Palette saved."),
        Err(err) => log_failure("projects_palette_save", err),
    }
}

/// Replaces the whole project collection with `projects_json`.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_save_all(projects_json: String) -> StoreResponse {
    let projects = match serde_json::from_str::<Vec<Project>>(&projects_json) {
        Ok(projects) => projects,
        Err(err) => {
            return StoreResponse::failure(format!(
                "projects_save_all failed: invalid projects: {err}"
            ))
        }
    };
    respond(
        "projects_save_all",
        |store| store.save_all_projects(projects),
        |_| "Projects saved.",
    )
}

/// Returns the pretty-printed project document as a JSON string value.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_export() -> StoreResponse {
    respond(
        "projects_export",
        |store| store.export_projects_json(),
        |_| "OK.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn projects_get_path() -> StoreResponse {
    respond(
        "projects_get_path",
        |store| {
            store
                .projects_file_path()
                .map(|path| path.to_string_lossy().into_owned())
        },
        |_| "OK.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn legacy_load_palettes() -> StoreResponse {
    respond("legacy_load_palettes", |store| store.load_palettes(), |_| "OK.")
}

/// Appends one opaque color record given as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn legacy_save_color(record_json: String) -> StoreResponse {
    let record = match serde_json::from_str::<serde_json::Value>(&record_json) {
        Ok(record) => record,
        Err(err) => {
            return StoreResponse::failure(format!("legacy_save_color failed: invalid record: {err}"))
        }
    };
    respond(
        "legacy_save_color",
        |store| store.save_color(record),
        |_| "Color saved.",
    )
}

/// Removes the record at `index`; negative or out-of-range is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn legacy_delete_color(index: i64) -> StoreResponse {
    let Ok(index) = usize::try_from(index) else {
        return StoreResponse::success("false".to_string(), "Index out of range.");
    };
    respond(
        "legacy_delete_color",
        |store| store.delete_color(index),
        |deleted| found(*deleted, "Color deleted.", "Index out of range."),
    )
}

/// Hex/RGB/CMYK views of a `#rrggbb` color.
#[flutter_rust_bridge::frb(sync)]
pub fn color_swatch(hex: String) -> StoreResponse {
    match SwatchInfo::from_hex(hex.trim()) {
        Ok(swatch) => match to_json(&swatch) {
            Ok(json) => StoreResponse::success(json, "OK."),
            Err(err) => StoreResponse::failure(format!("color_swatch failed: {err}")),
        },
        Err(err) => StoreResponse::failure(format!("color_swatch failed: {err}")),
    }
}

/// Canonical hex for a wheel/slider HSV position.
#[flutter_rust_bridge::frb(sync)]
pub fn color_hex_from_hsv(h: f64, s: f64, v: f64) -> String {
    hsv_to_rgb(h, s, v).to_hex()
}

fn respond<T, F, M>(op: &'static str, call: F, message: M) -> StoreResponse
where
    T: Serialize,
    F: FnOnce(&PaletteStore) -> chromatap_core::StoreResult<T>,
    M: FnOnce(&T) -> &'static str,
{
    let result = with_store(|store| call(&store).map_err(|err| err.to_string()));
    match result {
        Ok(value) => {
            let message = message(&value);
            match to_json(&value) {
                Ok(json) => StoreResponse::success(json, message),
                Err(err) => log_failure(op, err),
            }
        }
        Err(err) => log_failure(op, err),
    }
}

fn log_failure(op: &'static str, err: String) -> StoreResponse {
    error!("event=ffi_call module=ffi status=error op={op} error={err}");
    StoreResponse::failure(format!("{op} failed: {err}"))
}

fn found(hit: bool, yes: &'static str, no: &'static str) -> &'static str {
    if hit {
        yes
    } else {
        no
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| err.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn resolve_data_dir() -> PathBuf {
    DATA_DIR
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DATA_DIR_NAME)
        })
        .clone()
}

fn with_store<T>(call: impl FnOnce(PaletteStore) -> Result<T, String>) -> Result<T, String> {
    let _guard = STORE_CALLS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let store = PaletteStore::open_in(resolve_data_dir())
        .map_err(|err| format!("store open failed: {err}"))?;
    call(store)
}
