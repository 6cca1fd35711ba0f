use chromatap_core::{PaletteStore, PaletteUpdate, ProjectRepository, StoreError};
use tempfile::TempDir;

fn setup() -> (TempDir, PaletteStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = PaletteStore::open_in(dir.path()).unwrap();
    (dir, store)
}

fn colors(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn create_project_then_list_contains_it_once() {
    let (_dir, store) = setup();

    let created = store.create_project("X").unwrap();
    assert!(created.id.starts_with("proj_"));

    let projects = store.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "X");
    assert_eq!(projects[0].created_at, projects[0].updated_at);
    assert_eq!(projects[0], created);
}

#[test]
fn projects_keep_creation_order() {
    let (_dir, store) = setup();
    let first = store.create_project("First").unwrap();
    let second = store.create_project("Second").unwrap();

    let ids: Vec<String> = store
        .list_projects()
        .unwrap()
        .into_iter()
        .map(|project| project.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn rename_updates_name_and_timestamp() {
    let (_dir, store) = setup();
    let project = store.create_project("Draft").unwrap();

    let renamed = store.rename_project(&project.id, "Final").unwrap().unwrap();
    assert_eq!(renamed.name, "Final");
    assert_eq!(renamed.created_at, project.created_at);
    assert!(renamed.updated_at > project.updated_at);

    assert!(store.rename_project("proj_missing", "x").unwrap().is_none());
    assert_eq!(store.find_project(&project.id).unwrap().unwrap().name, "Final");
}

#[test]
fn palette_colors_are_copied_and_replaced_wholesale() {
    let (_dir, store) = setup();
    let project = store.create_project("P").unwrap();

    let mut input = colors(&["#ff0000", "#00ff00"]);
    let palette = store
        .add_palette_to_project(&project.id, "P", &input)
        .unwrap()
        .unwrap();
    input.push("#123456".to_string());
    assert_eq!(palette.colors, colors(&["#ff0000", "#00ff00"]));
    assert!(palette.id.starts_with("pal_"));

    let before = store.find_project(&project.id).unwrap().unwrap();
    let updated = store
        .update_palette_in_project(
            &project.id,
            &palette.id,
            &PaletteUpdate::recolor(&colors(&["#0000ff"])),
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.colors, colors(&["#0000ff"]));
    assert_eq!(updated.name, "P");
    assert!(updated.updated_at > updated.created_at);

    let after = store.find_project(&project.id).unwrap().unwrap();
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.palettes[0], updated);
}

#[test]
fn rename_only_update_keeps_colors() {
    let (_dir, store) = setup();
    let project = store.create_project("P").unwrap();
    let palette = store
        .add_palette_to_project(&project.id, "Warm", &colors(&["#ff0000", "#ff0000"]))
        .unwrap()
        .unwrap();

    let updated = store
        .update_palette_in_project(&project.id, &palette.id, &PaletteUpdate::rename("Renamed"))
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.colors, colors(&["#ff0000", "#ff0000"]));
}

#[test]
fn update_with_unknown_ids_returns_none() {
    let (_dir, store) = setup();
    let project = store.create_project("P").unwrap();

    let update = PaletteUpdate::rename("x");
    assert!(store
        .update_palette_in_project(&project.id, "pal_missing", &update)
        .unwrap()
        .is_none());
    assert!(store
        .update_palette_in_project("proj_missing", "pal_missing", &update)
        .unwrap()
        .is_none());
    assert_eq!(store.find_project(&project.id).unwrap().unwrap(), project);
}

#[test]
fn delete_project_cascades_and_is_not_repeatable() {
    let (_dir, store) = setup();
    let keep = store.create_project("Keep").unwrap();
    let doomed = store.create_project("Doomed").unwrap();
    store
        .add_palette_to_project(&doomed.id, "P", &colors(&["#000000"]))
        .unwrap()
        .unwrap();

    assert!(store.delete_project(&doomed.id).unwrap());
    let remaining = store.list_projects().unwrap();
    assert_eq!(remaining, vec![keep.clone()]);

    assert!(!store.delete_project(&doomed.id).unwrap());
    assert_eq!(store.list_projects().unwrap(), vec![keep]);
}

#[test]
fn delete_palette_bumps_project_and_reports_missing() {
    let (_dir, store) = setup();
    let project = store.create_project("P").unwrap();
    let palette = store
        .add_palette_to_project(&project.id, "A", &[])
        .unwrap()
        .unwrap();
    let before = store.find_project(&project.id).unwrap().unwrap();

    assert!(store
        .delete_palette_from_project(&project.id, &palette.id)
        .unwrap());
    let after = store.find_project(&project.id).unwrap().unwrap();
    assert!(after.palettes.is_empty());
    assert!(after.updated_at > before.updated_at);

    assert!(!store
        .delete_palette_from_project(&project.id, &palette.id)
        .unwrap());
    assert!(!store
        .delete_palette_from_project("proj_missing", &palette.id)
        .unwrap());
}

#[test]
fn save_all_replaces_collection_and_rejects_invalid_ids() {
    let (_dir, store) = setup();
    let project = store.create_project("Old").unwrap();

    let mut edited = store.list_projects().unwrap();
    edited[0].name = "Edited".to_string();
    let written = store.save_all_projects(edited.clone()).unwrap();
    assert_eq!(written, edited);
    assert_eq!(store.list_projects().unwrap(), edited);

    let mut invalid = edited.clone();
    invalid[0].id = "bogus".to_string();
    let err = store.save_all_projects(invalid).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.find_project(&project.id).unwrap().unwrap().name, "Edited");
}

#[test]
fn export_is_pretty_printed_camel_case_json() {
    let (_dir, store) = setup();
    let project = store.create_project("X").unwrap();
    store
        .add_palette_to_project(&project.id, "P", &colors(&["#abcdef"]))
        .unwrap();

    let exported = store.export_projects_json().unwrap();
    assert!(exported.contains("\n  {"));
    assert!(exported.contains("\"createdAt\""));
    assert!(exported.contains("\"palettes\""));

    let on_disk = std::fs::read_to_string(store.projects_file_path().unwrap()).unwrap();
    assert_eq!(exported, on_disk);
}

#[test]
fn external_edits_between_calls_are_observed() {
    let (_dir, store) = setup();
    store.create_project("A").unwrap();

    let other = PaletteStore::open_in(&store.config().base_dir).unwrap();
    other.create_project("B").unwrap();

    let names: Vec<String> = store
        .list_projects()
        .unwrap()
        .into_iter()
        .map(|project| project.name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}
