//! Test utilities: on-disk map and overlay fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use marga::grid::{BINARY_GRAY_MAGIC, RasterHeader};

/// Map resolution used by fixtures (meters per pixel)
pub const RESOLUTION: f64 = 0.05;

/// Fixture raster size (pixels)
pub const SIZE: usize = 40;

/// Encode a binary grayscale raster.
pub fn raster_bytes(width: usize, height: usize, max_val: u32, samples: &[u8]) -> Vec<u8> {
    let header = RasterHeader {
        magic: BINARY_GRAY_MAGIC.to_string(),
        width,
        height,
        max_val,
    };
    let mut bytes = Vec::new();
    header.write(&mut bytes, "test fixture").unwrap();
    bytes.extend_from_slice(samples);
    bytes
}

/// Calibration YAML referencing `image`.
pub fn calibration_yaml(image: &str) -> String {
    format!(
        "image: {}\nresolution: {}\norigin: [-1.0, -1.0, 0.0]\nnegate: 0\noccupied_thresh: 0.65\nfree_thresh: 0.196\n",
        image, RESOLUTION
    )
}

/// Write a `SIZE`x`SIZE` map with an occupied border into `dir`.
///
/// Returns the calibration file path.
pub fn write_map(dir: &Path, name: &str) -> PathBuf {
    let mut samples = vec![0u8; SIZE * SIZE];
    for y in 0..SIZE {
        for x in 0..SIZE {
            if x == 0 || y == 0 || x == SIZE - 1 || y == SIZE - 1 {
                samples[y * SIZE + x] = 255;
            }
        }
    }
    let image = format!("{}.pgm", name);
    std::fs::write(dir.join(&image), raster_bytes(SIZE, SIZE, 255, &samples)).unwrap();

    let yaml_path = dir.join(format!("{}.yaml", name));
    std::fs::write(&yaml_path, calibration_yaml(&image)).unwrap();
    yaml_path
}

/// Overlay YAML with one node per `(x, y, direction)`.
pub fn overlay_yaml(map_reference: &str, nodes: &[(f64, f64, &str)]) -> String {
    let mut yaml = format!("OCC_MAP_NAME: {}\n", map_reference);
    if nodes.is_empty() {
        yaml.push_str("NODE: []\n");
        return yaml;
    }
    yaml.push_str("NODE:\n");
    for (i, (x, y, direction)) in nodes.iter().enumerate() {
        yaml.push_str(&format!(
            "- id: {}\n  type: 1\n  pose:\n    x: {}\n    y: {}\n    direction: {}\n",
            i, x, y, direction
        ));
    }
    yaml
}

/// Write an overlay file into `dir`.
pub fn write_overlay(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
