use chromatap_core::{
    PaletteService, PaletteServiceError, PaletteStore, PaletteTarget, ProjectRepository,
    LOCAL_PROJECT_NAME,
};
use tempfile::TempDir;

fn setup() -> (TempDir, PaletteService<PaletteStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = PaletteStore::open_in(dir.path()).unwrap();
    (dir, PaletteService::new(store))
}

fn colors(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn first_save_creates_local_project() {
    let (_dir, service) = setup();

    let target = service
        .save_palette(None, "  Sunset ", &colors(&["#ff8800", "", "#ff8800"]))
        .unwrap();

    let projects = service.repo().list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, LOCAL_PROJECT_NAME);
    assert_eq!(projects[0].id, target.project_id);

    let palette = &projects[0].palettes[0];
    assert_eq!(palette.id, target.palette_id);
    assert_eq!(palette.name, "Sunset");
    assert_eq!(palette.colors, colors(&["#ff8800", "#ff8800"]));
}

#[test]
fn later_saves_use_first_project() {
    let (_dir, service) = setup();
    let first = service.repo().create_project("Brand").unwrap();
    service.repo().create_project("Other").unwrap();

    let target = service.save_palette(None, "", &[]).unwrap();
    assert_eq!(target.project_id, first.id);

    let saved = service
        .repo()
        .find_palette(&target.project_id, &target.palette_id)
        .unwrap()
        .unwrap();
    assert_eq!(saved.name, "Untitled Palette");
}

#[test]
fn save_with_target_updates_in_place() {
    let (_dir, service) = setup();
    let target = service
        .save_palette(None, "Draft", &colors(&["#111111"]))
        .unwrap();

    let again = service
        .save_palette(Some(&target), "Final", &colors(&["#222222", "#333333"]))
        .unwrap();
    assert_eq!(again, target);

    let project = service
        .repo()
        .find_project(&target.project_id)
        .unwrap()
        .unwrap();
    assert_eq!(project.palettes.len(), 1);
    assert_eq!(project.palettes[0].name, "Final");
    assert_eq!(project.palettes[0].colors, colors(&["#222222", "#333333"]));
}

#[test]
fn save_with_stale_target_reports_what_is_missing() {
    let (_dir, service) = setup();
    let project = service.repo().create_project("P").unwrap();

    let stale_palette = PaletteTarget {
        project_id: project.id.clone(),
        palette_id: "pal_gone".to_string(),
    };
    let err = service.save_palette(Some(&stale_palette), "x", &[]).unwrap_err();
    assert!(matches!(err, PaletteServiceError::PaletteNotFound { .. }));

    let stale_project = PaletteTarget {
        project_id: "proj_gone".to_string(),
        palette_id: "pal_gone".to_string(),
    };
    let err = service.save_palette(Some(&stale_project), "x", &[]).unwrap_err();
    assert!(matches!(err, PaletteServiceError::ProjectNotFound(id) if id == "proj_gone"));
}

#[test]
fn duplicate_appends_copy_with_same_colors() {
    let (_dir, service) = setup();
    let target = service
        .save_palette(None, "Warm", &colors(&["#ff0000", "#ffaa00"]))
        .unwrap();

    let copy = service
        .duplicate_palette(&target.project_id, &target.palette_id)
        .unwrap();
    assert_eq!(copy.name, "Warm (copy)");
    assert_eq!(copy.colors, colors(&["#ff0000", "#ffaa00"]));
    assert_ne!(copy.id, target.palette_id);

    let project = service
        .repo()
        .find_project(&target.project_id)
        .unwrap()
        .unwrap();
    assert_eq!(project.palettes.len(), 2);
    assert_eq!(project.palettes[1].id, copy.id);
}
