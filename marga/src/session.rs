//! Editing session: the current map, overlay graph and file locations.
//!
//! A session holds at most one map and one overlay at a time. Opening or
//! creating an overlay builds the complete replacement first and swaps it in
//! only when every step succeeded, so a failed open leaves the previous
//! state untouched.

use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::core::{RasterPoint, WorldPoint};
use crate::error::{Error, Result};
use crate::map::MapModel;
use crate::overlay::{
    DirectionMode, ElementGraph, GraphSettings, OverlayDocument, OverlayInfo, OverlayStore, Scene,
};

const OVERLAY_EXTENSION: &str = "yaml";

/// Map and overlay loaded together.
#[derive(Debug)]
struct Workspace {
    map: MapModel,
    graph: ElementGraph,
    info: OverlayInfo,
    path: Option<PathBuf>,
}

/// Editor state without any UI.
#[derive(Debug)]
pub struct EditorSession {
    settings: GraphSettings,
    working_dir: PathBuf,
    workspace: Option<Workspace>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(GraphSettings::default())
    }
}

impl EditorSession {
    /// Empty session; the working directory starts at `.`
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            settings,
            working_dir: PathBuf::from("."),
            workspace: None,
        }
    }

    /// Empty session with graph settings from a config
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.to_graph_settings())
    }

    /// Set the directory map references are resolved against
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    // === Files ===

    /// Open an overlay file and the map it references.
    ///
    /// A relative `OCC_MAP_NAME` is looked up next to the overlay first, then
    /// in the working directory. On success the working directory moves to
    /// the overlay's grandparent directory.
    pub fn open_overlay(&mut self, path: &Path) -> Result<()> {
        let document = Self::read_document(path)?;

        let map_path = self.resolve_map(path, &document.info.map_reference);
        let map = MapModel::load(&map_path)?;
        let graph = document.build_graph(map.transform(), self.settings);

        log::info!(
            "Opened overlay {} ({} nodes on {})",
            path.display(),
            graph.len(),
            map_path.display()
        );
        self.workspace = Some(Workspace {
            map,
            graph,
            info: document.info,
            path: Some(path.to_path_buf()),
        });
        self.follow_to_grandparent(path);
        Ok(())
    }

    /// Open an overlay file on a map chosen by the caller.
    ///
    /// Used when the overlay's own map reference cannot be found. The
    /// overlay's `OCC_MAP_NAME` is replaced with `map_path`, so the opened
    /// overlay has unsaved changes.
    pub fn open_overlay_with_map(&mut self, path: &Path, map_path: &Path) -> Result<()> {
        let mut document = Self::read_document(path)?;
        let map = MapModel::load(map_path)?;
        let mut graph = document.build_graph(map.transform(), self.settings);

        log::info!(
            "Opened overlay {} ({} nodes), map {} replaced by {}",
            path.display(),
            graph.len(),
            document.info.map_reference,
            map_path.display()
        );
        document.info.map_reference = map_path.to_string_lossy().into_owned();
        graph.mark_modified();
        self.workspace = Some(Workspace {
            map,
            graph,
            info: document.info,
            path: Some(path.to_path_buf()),
        });
        self.follow_to_grandparent(path);
        Ok(())
    }

    /// Start an empty, unsaved overlay on the map at `map_path`.
    ///
    /// On success the working directory moves to the map's grandparent
    /// directory.
    pub fn new_overlay(&mut self, map_path: &Path) -> Result<()> {
        let map = MapModel::load(map_path)?;
        let graph = ElementGraph::with_settings(map.transform(), self.settings);
        let info = OverlayInfo::new(map_path.to_string_lossy());

        log::info!("New overlay on {}", map_path.display());
        self.workspace = Some(Workspace {
            map,
            graph,
            info,
            path: None,
        });
        self.follow_to_grandparent(map_path);
        Ok(())
    }

    /// Write the overlay back to the file it came from.
    pub fn save(&mut self) -> Result<()> {
        let ws = self.workspace.as_mut().ok_or(Error::NoMap)?;
        let path = ws.path.clone().ok_or(Error::NoOverlayPath)?;
        OverlayStore::save_file(&mut ws.graph, &ws.info, &path)?;
        Ok(())
    }

    /// Write the overlay to a new file and make it the current path.
    ///
    /// `.yaml` is appended when missing. On success the working directory
    /// moves to the saved file's grandparent directory. Returns the path
    /// actually written.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        let ws = self.workspace.as_mut().ok_or(Error::NoMap)?;
        let path = with_overlay_extension(path);
        OverlayStore::save_file(&mut ws.graph, &ws.info, &path)?;
        ws.path = Some(path.clone());
        self.follow_to_grandparent(&path);
        Ok(path)
    }

    /// Serialize the overlay without writing or marking it saved
    pub fn to_yaml(&self) -> Result<String> {
        let ws = self.workspace()?;
        Ok(OverlayStore::to_yaml(&ws.graph, &ws.info)?)
    }

    /// True when the overlay changed since it was opened or saved
    pub fn has_unsaved_changes(&self) -> bool {
        self.workspace.as_ref().is_some_and(|ws| ws.graph.is_dirty())
    }

    // === State ===

    /// Graph settings applied to opened overlays
    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Directory map references fall back to
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Current map, if any
    pub fn map(&self) -> Option<&MapModel> {
        self.workspace.as_ref().map(|ws| &ws.map)
    }

    /// Current overlay graph, if any
    pub fn graph(&self) -> Option<&ElementGraph> {
        self.workspace.as_ref().map(|ws| &ws.graph)
    }

    /// Map reference and metadata of the current overlay
    pub fn overlay_info(&self) -> Option<&OverlayInfo> {
        self.workspace.as_ref().map(|ws| &ws.info)
    }

    /// File the overlay was opened from or last saved to
    pub fn overlay_path(&self) -> Option<&Path> {
        self.workspace.as_ref().and_then(|ws| ws.path.as_deref())
    }

    /// Render snapshot of the current overlay
    pub fn scene(&self) -> Option<Scene> {
        self.graph().map(ElementGraph::scene)
    }

    // === Edits ===

    /// Append a node at a world position
    pub fn add_node(&mut self, position: WorldPoint) -> Result<usize> {
        Ok(self.workspace_mut()?.graph.add_node(position))
    }

    /// Append a node at a raster position
    pub fn add_node_at_raster(&mut self, point: RasterPoint) -> Result<usize> {
        let ws = self.workspace_mut()?;
        let position = ws.map.to_world(point);
        Ok(ws.graph.add_node(position))
    }

    /// Move a node to a world position
    pub fn move_node(&mut self, id: usize, position: WorldPoint) -> Result<()> {
        self.workspace_mut()?.graph.move_node(id, position)?;
        Ok(())
    }

    /// Move a node to a raster position
    pub fn move_node_to_raster(&mut self, id: usize, point: RasterPoint) -> Result<()> {
        let ws = self.workspace_mut()?;
        let position = ws.map.to_world(point);
        ws.graph.move_node(id, position)?;
        Ok(())
    }

    /// Delete a node
    pub fn delete_node(&mut self, id: usize) -> Result<()> {
        self.workspace_mut()?.graph.delete_node(id)?;
        Ok(())
    }

    /// Flip a node's direction mode
    pub fn toggle_direction(&mut self, id: usize) -> Result<DirectionMode> {
        Ok(self.workspace_mut()?.graph.toggle_direction(id)?)
    }

    /// Node under a raster point
    pub fn hit_test(&self, point: RasterPoint) -> Option<usize> {
        self.graph().and_then(|g| g.hit_test(point))
    }

    /// Edge under a raster point
    pub fn hit_test_edge(&self, point: RasterPoint) -> Option<usize> {
        self.graph().and_then(|g| g.hit_test_edge(point))
    }

    // === Internals ===

    fn workspace(&self) -> Result<&Workspace> {
        self.workspace.as_ref().ok_or(Error::NoMap)
    }

    fn workspace_mut(&mut self) -> Result<&mut Workspace> {
        self.workspace.as_mut().ok_or(Error::NoMap)
    }

    fn read_document(path: &Path) -> Result<OverlayDocument> {
        let raw = OverlayStore::read_file(path)?;
        let report = OverlayStore::validate(&raw);
        if let Some(reason) = report.reason() {
            return Err(Error::InvalidOverlay(reason.to_string()));
        }
        Ok(OverlayStore::parse(&raw)?)
    }

    /// Move the working directory to `path`'s grandparent, when it has one.
    fn follow_to_grandparent(&mut self, path: &Path) {
        if let Some(dir) = path.parent().and_then(Path::parent)
            && !dir.as_os_str().is_empty()
        {
            log::debug!("Working directory is now {}", dir.display());
            self.working_dir = dir.to_path_buf();
        }
    }

    fn resolve_map(&self, overlay_path: &Path, reference: &str) -> PathBuf {
        let reference = Path::new(reference);
        if reference.is_absolute() {
            return reference.to_path_buf();
        }

        let beside_overlay = overlay_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(reference);
        if beside_overlay.exists() {
            return beside_overlay;
        }

        let in_working_dir = self.working_dir.join(reference);
        if in_working_dir.exists() {
            log::debug!("Resolved {} against working directory", reference.display());
            return in_working_dir;
        }

        beside_overlay
    }
}

fn with_overlay_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == OVERLAY_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(OVERLAY_EXTENSION);
    PathBuf::from(name)
}
