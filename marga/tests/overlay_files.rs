//! Overlay validation, load and save against real map transforms.

mod common;

use approx::assert_relative_eq;
use marga::core::WorldPoint;
use marga::map::MapModel;
use marga::overlay::{DirectionMode, GraphSettings, OverlayError, OverlayInfo, OverlayStore};
use tempfile::TempDir;

use common::{overlay_yaml, write_map};

fn load_map() -> (TempDir, MapModel) {
    let dir = TempDir::new().unwrap();
    let path = write_map(dir.path(), "office");
    let map = MapModel::load(&path).unwrap();
    (dir, map)
}

#[test]
fn test_head_head_keep_round_trip() {
    let (_dir, map) = load_map();
    let raw = overlay_yaml(
        "office.yaml",
        &[(0.0, 0.0, "head"), (0.5, 0.25, "head"), (-0.5, 0.75, "keep")],
    );

    let (info, mut graph) =
        OverlayStore::load(&raw, map.transform(), GraphSettings::default()).unwrap();
    let saved = OverlayStore::save(&mut graph, &info).unwrap();
    let (reloaded_info, reloaded) =
        OverlayStore::load(&saved, map.transform(), GraphSettings::default()).unwrap();

    assert_eq!(reloaded_info.map_reference, "office.yaml");
    assert_eq!(reloaded.len(), 3);
    let modes: Vec<_> = reloaded.nodes().iter().map(|n| n.direction()).collect();
    assert_eq!(
        modes,
        [DirectionMode::Head, DirectionMode::Head, DirectionMode::Keep]
    );
    for (i, (a, b)) in graph.nodes().iter().zip(reloaded.nodes()).enumerate() {
        assert_eq!(b.id(), i);
        assert_relative_eq!(a.position().x, b.position().x);
        assert_relative_eq!(a.position().y, b.position().y);
        assert_relative_eq!(a.facing_angle(), b.facing_angle());
    }
    assert_eq!(reloaded.edges().len(), 2);
}

#[test]
fn test_validate_then_load_gate() {
    let (_dir, map) = load_map();

    let missing = "OCC_MAP_NAME: office.yaml\nNODE:\n- id: 0\n  type: 1\n  pose: {x: 0.0, direction: head}\n";
    let report = OverlayStore::validate(missing);
    assert!(!report.is_valid());
    assert_eq!(report.reason(), Some("NODE[0]: pose.y not found"));
    assert!(matches!(
        OverlayStore::load(missing, map.transform(), GraphSettings::default()),
        Err(OverlayError::Invalid(_))
    ));

    let empty = overlay_yaml("office.yaml", &[]);
    assert!(OverlayStore::validate(&empty).is_valid());
    let (_, graph) = OverlayStore::load(&empty, map.transform(), GraphSettings::default()).unwrap();
    assert!(graph.is_empty());
    assert!(graph.edges().is_empty());
}

#[test]
fn test_file_ids_are_ignored() {
    let (_dir, map) = load_map();
    let raw = "OCC_MAP_NAME: office.yaml\nNODE:\n\
- {id: 40, type: 3, pose: {x: 0.1, y: 0.1, direction: keep}}\n\
- {id: 2, type: 3, pose: {x: 0.2, y: 0.1, direction: head}}\n\
EDGE:\n- {start_node_id: 40, end_node_id: 2, command: 9, skippable: true}\n";

    let (_, graph) = OverlayStore::load(raw, map.transform(), GraphSettings::default()).unwrap();
    assert_eq!(graph.nodes()[0].id(), 0);
    assert_eq!(graph.nodes()[1].id(), 1);
    assert_eq!(graph.nodes()[0].node_type(), 3);
    assert_eq!(graph.edges()[0].command, 0);
}

#[test]
fn test_save_file_marks_clean_after_write() {
    let (dir, map) = load_map();
    let mut graph = marga::ElementGraph::new(map.transform());
    graph.add_node(WorldPoint::new(0.0, 0.0));
    let info = OverlayInfo::new("office.yaml");

    let bad = dir.path().join("missing_dir").join("route.yaml");
    assert!(OverlayStore::save_file(&mut graph, &info, &bad).is_err());
    assert!(graph.is_dirty());

    let good = dir.path().join("route.yaml");
    OverlayStore::save_file(&mut graph, &info, &good).unwrap();
    assert!(!graph.is_dirty());

    let raw = OverlayStore::read_file(&good).unwrap();
    assert!(OverlayStore::validate(&raw).is_valid());
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        OverlayStore::read_file(&dir.path().join("none.yaml")),
        Err(OverlayError::FileNotFound(_))
    ));
}
