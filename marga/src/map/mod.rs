//! Loaded map: calibration, classified grid and coordinate transform.
//!
//! A map is described by two files (ROS map_server layout):
//! - a calibration YAML (`resolution`, `origin`, `negate`, thresholds, `image`)
//! - the binary grayscale raster named by `image`, resolved relative to the
//!   calibration file's directory
//!
//! ## Example
//!
//! ```rust,ignore
//! use marga::map::MapModel;
//! use marga::core::WorldPoint;
//!
//! let map = MapModel::load(Path::new("maps/office.yaml"))?;
//! let pixel = map.to_raster(WorldPoint::new(1.0, 2.0));
//! ```

mod error;
mod metadata;

pub use error::MapLoadError;
pub use metadata::MapMetadata;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::{CellState, RasterPoint, WorldPoint};
use crate::grid::{Calibration, ClassifiedGrid, GridDecoder, RasterHeader};
use crate::transform::CoordinateTransform;

/// One loaded map.
///
/// Calibration and grid are built together and never updated separately;
/// loading another map means constructing a new `MapModel`.
#[derive(Clone, Debug)]
pub struct MapModel {
    source: Option<PathBuf>,
    image: String,
    calibration: Calibration,
    grid: ClassifiedGrid,
    transform: CoordinateTransform,
}

impl MapModel {
    /// Load a map from its calibration file.
    pub fn load(path: &Path) -> Result<Self, MapLoadError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MapLoadError::FileNotFound(path.to_path_buf()),
            _ => MapLoadError::Io(e),
        })?;
        let metadata = MapMetadata::from_yaml(&yaml)?;

        let map_dir = path.parent().unwrap_or(Path::new("."));
        let raster_path = map_dir.join(&metadata.image);
        let raster = std::fs::read(&raster_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MapLoadError::RasterNotFound(raster_path.clone()),
            _ => MapLoadError::Io(e),
        })?;

        let mut map = Self::from_metadata(metadata, &raster)?;
        map.source = Some(path.to_path_buf());

        log::info!(
            "Loaded map {} ({}x{} @ {}m/px)",
            path.display(),
            map.calibration.raster_width,
            map.calibration.raster_height,
            map.calibration.resolution
        );
        Ok(map)
    }

    /// Build a map from in-memory calibration YAML and raster bytes.
    pub fn from_bytes(calibration_yaml: &str, raster: &[u8]) -> Result<Self, MapLoadError> {
        Self::from_metadata(MapMetadata::from_yaml(calibration_yaml)?, raster)
    }

    fn from_metadata(metadata: MapMetadata, raster: &[u8]) -> Result<Self, MapLoadError> {
        let (header, samples) = RasterHeader::parse(raster)?;
        let calibration = metadata.calibration(&header)?;
        let grid = GridDecoder::decode(&header, samples, &calibration)?;
        let transform = calibration.transform();

        Ok(Self {
            source: None,
            image: metadata.image,
            calibration,
            grid,
            transform,
        })
    }

    /// Calibration file this map was loaded from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Raster path as written in the calibration file
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Map calibration
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Decoded grid
    pub fn grid(&self) -> &ClassifiedGrid {
        &self.grid
    }

    /// World ↔ raster transform of this map
    pub fn transform(&self) -> CoordinateTransform {
        self.transform
    }

    /// Grid dimensions (width, height) in pixels
    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    /// Convert a world point to raster space
    #[inline]
    pub fn to_raster(&self, point: WorldPoint) -> RasterPoint {
        self.transform.world_to_raster(point)
    }

    /// Convert a raster point to world space
    #[inline]
    pub fn to_world(&self, point: RasterPoint) -> WorldPoint {
        self.transform.raster_to_world(point)
    }

    /// Cell state under a world point, `None` outside the raster
    pub fn cell_at_world(&self, point: WorldPoint) -> Option<CellState> {
        let (x, y) = self
            .to_raster(point)
            .cell(self.grid.width(), self.grid.height())?;
        self.grid.get(x, y)
    }

    /// World bounds of the raster: (min_point, max_point)
    pub fn world_bounds(&self) -> (WorldPoint, WorldPoint) {
        let (w, h) = (self.grid.width() as f32, self.grid.height() as f32);
        let a = self.to_world(RasterPoint::new(0.0, 0.0));
        let b = self.to_world(RasterPoint::new(w, h));
        (
            WorldPoint::new(a.x.min(b.x), a.y.min(b.y)),
            WorldPoint::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }
}
