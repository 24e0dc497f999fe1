//! # Marga: Waypoint Overlays for Occupancy-Grid Maps
//!
//! The headless core of a navigation-graph editor. It loads a ROS-style map
//! (calibration YAML plus binary grayscale raster), classifies every cell,
//! and maintains an ordered sequence of waypoint nodes drawn on top of it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use marga::{EditorSession, core::WorldPoint};
//!
//! let mut session = EditorSession::default();
//! session.new_overlay(Path::new("maps/office.yaml"))?;
//! session.add_node(WorldPoint::new(1.0, 2.0))?;
//! session.add_node(WorldPoint::new(3.0, 2.0))?;
//! session.save_as(Path::new("routes/office_route"))?;
//! # Ok::<(), marga::Error>(())
//! ```
//!
//! ## Coordinate Frames
//!
//! - **World**: meters, Y up, as in the map calibration
//! - **Raster**: pixels, origin at the top-left, Y down
//!
//! [`CoordinateTransform`] converts between the two using the map's
//! resolution and origin. Node facing angles live in the raster frame:
//! 0 points up on screen and angles grow clockwise.
//!
//! ## Architecture
//!
//! - [`core`]: Point and cell types
//! - [`grid`]: Raster header parsing and cell classification
//! - [`map`]: Map loading (calibration + raster)
//! - [`overlay`]: Element graph, hit-testing, render snapshot, overlay files
//! - [`config`]: Editor settings
//! - [`session`]: Map + overlay lifecycle with atomic replacement

#![warn(missing_docs)]

pub mod config;
pub mod core;
mod error;
pub mod grid;
pub mod map;
pub mod overlay;
pub mod session;
pub mod transform;

pub use config::EditorConfig;
pub use error::{Error, Result};
pub use map::MapModel;
pub use overlay::{DirectionMode, ElementGraph, OverlayStore};
pub use session::EditorSession;
pub use transform::CoordinateTransform;
