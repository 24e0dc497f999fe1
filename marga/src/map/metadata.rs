//! Calibration file (ROS map_server style YAML).
//!
//! ```yaml
//! image: office.pgm
//! resolution: 0.05
//! origin: [-10.0, -10.0, 0.0]
//! negate: 0
//! occupied_thresh: 0.65
//! free_thresh: 0.196
//! ```

use serde::Deserialize;

use crate::core::WorldPoint;
use crate::grid::{Calibration, GridDecoder, RasterHeader};

use super::error::MapLoadError;

/// `negate` is written as a bool by some tools and as 0/1 by map_saver.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn as_bool(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Int(i) => *i != 0,
        }
    }
}

/// Raw file contents; every key optional so a missing one can be named.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    image: Option<String>,
    resolution: Option<f64>,
    origin: Option<Vec<f64>>,
    negate: Option<Flag>,
    occupied_thresh: Option<f64>,
    free_thresh: Option<f64>,
}

/// Parsed and range-checked calibration file.
#[derive(Clone, Debug, PartialEq)]
pub struct MapMetadata {
    /// Raster path, relative to the calibration file's directory
    pub image: String,
    /// Meters per pixel
    pub resolution: f64,
    /// World coordinates of the raster's bottom-left corner
    pub origin: WorldPoint,
    /// Yaw of the origin, 0 when not given
    pub origin_yaw: f64,
    /// Invert sample interpretation
    pub negate: bool,
    /// Occupied threshold in [0, 1]
    pub occupied_thresh: f64,
    /// Free threshold in [0, 1]
    pub free_thresh: f64,
}

impl MapMetadata {
    /// Parse a calibration file.
    ///
    /// Required keys are checked in file-format order; the first absent one is
    /// reported as [`MapLoadError::MissingField`].
    pub fn from_yaml(yaml: &str) -> Result<Self, MapLoadError> {
        let raw: RawMetadata = serde_yaml::from_str(yaml)?;

        let resolution = raw
            .resolution
            .ok_or(MapLoadError::MissingField("resolution"))?;
        let origin = raw.origin.ok_or(MapLoadError::MissingField("origin"))?;
        let negate = raw.negate.ok_or(MapLoadError::MissingField("negate"))?;
        let occupied_thresh = raw
            .occupied_thresh
            .ok_or(MapLoadError::MissingField("occupied_thresh"))?;
        let free_thresh = raw
            .free_thresh
            .ok_or(MapLoadError::MissingField("free_thresh"))?;
        let image = raw.image.ok_or(MapLoadError::MissingField("image"))?;

        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(MapLoadError::InvalidCalibration(format!(
                "resolution must be positive, found {}",
                resolution
            )));
        }

        if origin.len() < 2 || origin.len() > 3 || origin.iter().any(|v| !v.is_finite()) {
            return Err(MapLoadError::InvalidCalibration(format!(
                "origin must be [x, y] or [x, y, yaw] of finite numbers, found {:?}",
                origin
            )));
        }

        for (name, value) in [
            ("occupied_thresh", occupied_thresh),
            ("free_thresh", free_thresh),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MapLoadError::InvalidCalibration(format!(
                    "{} must be within [0, 1], found {}",
                    name, value
                )));
            }
        }

        if free_thresh > occupied_thresh {
            log::warn!(
                "free_thresh {} exceeds occupied_thresh {}; no cell will classify as unknown",
                free_thresh,
                occupied_thresh
            );
        }

        if image.trim().is_empty() {
            return Err(MapLoadError::InvalidCalibration(
                "image path is empty".to_string(),
            ));
        }

        Ok(Self {
            image,
            resolution,
            origin: WorldPoint::new(origin[0], origin[1]),
            origin_yaw: origin.get(2).copied().unwrap_or(0.0),
            negate: negate.as_bool(),
            occupied_thresh,
            free_thresh,
        })
    }

    /// Combine with a raster header into the map's calibration.
    pub fn calibration(&self, header: &RasterHeader) -> Result<Calibration, MapLoadError> {
        let max_sample_value = GridDecoder::check_max_val(header.max_val)?;
        Ok(Calibration {
            resolution: self.resolution,
            origin: self.origin,
            origin_yaw: self.origin_yaw,
            negate: self.negate,
            occupied_thresh: self.occupied_thresh,
            free_thresh: self.free_thresh,
            raster_width: header.width,
            raster_height: header.height,
            max_sample_value,
        })
    }
}
