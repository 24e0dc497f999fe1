//! Session lifecycle: open, edit, save, and all-or-nothing replacement.

mod common;

use marga::core::{RasterPoint, WorldPoint};
use marga::overlay::{DirectionMode, GraphSettings};
use marga::{EditorSession, Error, map::MapLoadError};
use tempfile::TempDir;

use common::{overlay_yaml, write_map, write_overlay};

#[test]
fn test_open_edit_save() {
    let dir = TempDir::new().unwrap();
    write_map(dir.path(), "office");
    let overlay = write_overlay(
        dir.path(),
        "route.yaml",
        &overlay_yaml("office.yaml", &[(0.0, 0.0, "head"), (0.5, 0.0, "head")]),
    );

    let mut session = EditorSession::default();
    session.open_overlay(&overlay).unwrap();
    assert_eq!(session.graph().unwrap().len(), 2);
    assert_eq!(session.overlay_path(), Some(overlay.as_path()));
    assert!(!session.has_unsaved_changes());

    assert_eq!(session.toggle_direction(1).unwrap(), DirectionMode::Keep);
    session.add_node(WorldPoint::new(-0.5, 0.5)).unwrap();
    assert!(session.has_unsaved_changes());

    session.save().unwrap();
    assert!(!session.has_unsaved_changes());

    let mut reopened = EditorSession::default();
    reopened.open_overlay(&overlay).unwrap();
    let graph = reopened.graph().unwrap();
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.nodes()[1].direction(), DirectionMode::Keep);
}

#[test]
fn test_failed_open_keeps_previous_state() {
    let dir = TempDir::new().unwrap();
    write_map(dir.path(), "office");
    let good = write_overlay(
        dir.path(),
        "good.yaml",
        &overlay_yaml("office.yaml", &[(0.0, 0.0, "head")]),
    );
    let invalid = write_overlay(dir.path(), "invalid.yaml", "OCC_MAP_NAME: office.yaml\n");
    let no_map = write_overlay(
        dir.path(),
        "no_map.yaml",
        &overlay_yaml("elsewhere.yaml", &[(0.0, 0.0, "head")]),
    );

    let mut session = EditorSession::default();
    session.open_overlay(&good).unwrap();
    session.add_node(WorldPoint::new(0.2, 0.2)).unwrap();

    match session.open_overlay(&invalid) {
        Err(Error::InvalidOverlay(reason)) => assert_eq!(reason, "NODE not found"),
        other => panic!("expected InvalidOverlay, got {:?}", other),
    }
    assert!(matches!(
        session.open_overlay(&no_map),
        Err(Error::Map(MapLoadError::FileNotFound(_)))
    ));

    assert_eq!(session.overlay_path(), Some(good.as_path()));
    assert_eq!(session.graph().unwrap().len(), 2);
    assert!(session.has_unsaved_changes());
}

#[test]
fn test_map_reference_falls_back_to_working_dir() {
    let dir = TempDir::new().unwrap();
    let maps = dir.path().join("maps");
    let routes = dir.path().join("routes");
    std::fs::create_dir_all(&maps).unwrap();
    std::fs::create_dir_all(&routes).unwrap();
    write_map(&maps, "office");
    let overlay = write_overlay(&routes, "route.yaml", &overlay_yaml("maps/office.yaml", &[]));

    let mut session = EditorSession::default();
    assert!(session.open_overlay(&overlay).is_err());

    let mut session = EditorSession::default().with_working_dir(dir.path());
    session.open_overlay(&overlay).unwrap();
    assert!(session.graph().unwrap().is_empty());
}

#[test]
fn test_open_moves_working_dir() {
    let dir = TempDir::new().unwrap();
    let maps = dir.path().join("maps");
    let routes = dir.path().join("routes");
    std::fs::create_dir_all(&maps).unwrap();
    std::fs::create_dir_all(&routes).unwrap();
    write_map(&maps, "office");
    let overlay = write_overlay(&routes, "route.yaml", &overlay_yaml("../maps/office.yaml", &[]));
    let missing = write_overlay(&routes, "missing.yaml", &overlay_yaml("gone.yaml", &[]));

    let mut session = EditorSession::default();
    assert!(session.open_overlay(&missing).is_err());
    assert_eq!(session.working_dir(), std::path::Path::new("."));

    session.open_overlay(&overlay).unwrap();
    assert_eq!(session.working_dir(), dir.path());

    // A second overlay under the same root now finds maps/ via the working directory
    let nested = routes.join("night");
    std::fs::create_dir_all(&nested).unwrap();
    let second = write_overlay(&nested, "route.yaml", &overlay_yaml("maps/office.yaml", &[]));
    let mut session = EditorSession::default();
    session.open_overlay(&overlay).unwrap();
    session.open_overlay(&second).unwrap();
    assert_eq!(session.overlay_path(), Some(second.as_path()));
    assert_eq!(session.working_dir(), routes);
}

#[test]
fn test_open_overlay_with_substitute_map() {
    let dir = TempDir::new().unwrap();
    let routes = dir.path().join("routes");
    std::fs::create_dir_all(&routes).unwrap();
    let map_path = write_map(dir.path(), "office");
    let overlay = write_overlay(
        &routes,
        "route.yaml",
        &overlay_yaml("moved/office.yaml", &[(0.0, 0.0, "head"), (0.5, 0.0, "keep")]),
    );

    let mut session = EditorSession::default();
    assert!(matches!(
        session.open_overlay(&overlay),
        Err(Error::Map(MapLoadError::FileNotFound(_)))
    ));

    session.open_overlay_with_map(&overlay, &map_path).unwrap();
    let info = session.overlay_info().unwrap();
    assert_eq!(info.map_reference, map_path.to_string_lossy());
    assert_eq!(session.overlay_path(), Some(overlay.as_path()));
    assert_eq!(session.working_dir(), dir.path());
    assert_eq!(session.graph().unwrap().len(), 2);
    assert_eq!(session.graph().unwrap().nodes()[1].direction(), DirectionMode::Keep);
    assert!(session.has_unsaved_changes());

    session.save().unwrap();
    assert!(!session.has_unsaved_changes());
    let mut reopened = EditorSession::default();
    reopened.open_overlay(&overlay).unwrap();
    assert_eq!(reopened.overlay_info().unwrap().map_reference, map_path.to_string_lossy());
    assert_eq!(reopened.graph().unwrap().len(), 2);
}

#[test]
fn test_failed_open_with_map_keeps_previous_state() {
    let dir = TempDir::new().unwrap();
    let map_path = write_map(dir.path(), "office");
    let good = write_overlay(
        dir.path(),
        "good.yaml",
        &overlay_yaml("office.yaml", &[(0.0, 0.0, "head")]),
    );
    let unmapped = write_overlay(
        dir.path(),
        "unmapped.yaml",
        &overlay_yaml("gone.yaml", &[(0.0, 0.0, "head"), (0.5, 0.5, "head")]),
    );
    let invalid = write_overlay(dir.path(), "invalid.yaml", "NODE: []\n");

    let mut session = EditorSession::default().with_working_dir(dir.path());
    session.open_overlay(&good).unwrap();
    session.add_node(WorldPoint::new(0.2, 0.2)).unwrap();
    let working_dir = session.working_dir().to_path_buf();

    assert!(matches!(
        session.open_overlay_with_map(&unmapped, &dir.path().join("absent.yaml")),
        Err(Error::Map(MapLoadError::FileNotFound(_)))
    ));
    match session.open_overlay_with_map(&invalid, &map_path) {
        Err(Error::InvalidOverlay(reason)) => assert_eq!(reason, "OCC_MAP_NAME not found"),
        other => panic!("expected InvalidOverlay, got {:?}", other),
    }

    assert_eq!(session.overlay_path(), Some(good.as_path()));
    assert_eq!(session.overlay_info().unwrap().map_reference, "office.yaml");
    assert_eq!(session.graph().unwrap().len(), 2);
    assert_eq!(session.working_dir(), working_dir);
}

#[test]
fn test_new_overlay_and_save_as() {
    let dir = TempDir::new().unwrap();
    let map_path = write_map(dir.path(), "office");
    let out_dir = dir.path().join("routes").join("today");
    std::fs::create_dir_all(&out_dir).unwrap();

    let mut session = EditorSession::new(GraphSettings::default());
    session.new_overlay(&map_path).unwrap();
    assert_eq!(Some(session.working_dir()), dir.path().parent());
    assert!(matches!(session.save(), Err(Error::NoOverlayPath)));

    let id = session.add_node_at_raster(RasterPoint::new(20.0, 20.0)).unwrap();
    assert_eq!(id, 0);
    let position = session.graph().unwrap().nodes()[0].position();
    assert!(position.x.abs() < 1e-5 && position.y.abs() < 1e-5);

    session.add_node(WorldPoint::new(0.5, 0.0)).unwrap();
    session.move_node_to_raster(1, RasterPoint::new(30.0, 20.0)).unwrap();
    assert_eq!(session.hit_test(RasterPoint::new(30.0, 20.0)), Some(1));

    let written = session.save_as(&out_dir.join("office_route")).unwrap();
    assert_eq!(written, out_dir.join("office_route.yaml"));
    assert!(written.exists());
    assert_eq!(session.overlay_path(), Some(written.as_path()));
    assert_eq!(session.working_dir(), dir.path().join("routes"));
    assert!(!session.has_unsaved_changes());

    let scene = session.scene().unwrap();
    assert_eq!(scene.nodes.len(), 2);
    assert_eq!(scene.edges.len(), 1);
}

#[test]
fn test_mutation_errors() {
    let dir = TempDir::new().unwrap();
    let map_path = write_map(dir.path(), "office");
    let mut session = EditorSession::default();
    session.new_overlay(&map_path).unwrap();

    assert!(matches!(
        session.delete_node(0),
        Err(Error::Graph(marga::overlay::GraphError::NotFound(0)))
    ));
    assert!(!session.has_unsaved_changes());
}
