//! Marga command-line tool.
//!
//! Validates, inspects and scripts waypoint overlays without the editor UI.
//!
//! # Usage
//!
//! ```bash
//! marga-tool validate routes/office.yaml
//! marga-tool inspect routes/office.yaml
//! marga-tool new maps/office.yaml routes/office
//! marga-tool add routes/office.yaml 1.5 -0.25
//! marga-tool toggle routes/office.yaml 3
//! ```
//!
//! Logging follows `RUST_LOG`; the default is `marga=info,marga_tool=info`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use marga::core::{CellState, WorldPoint};
use marga::{EditorConfig, EditorSession, OverlayStore};

#[derive(Parser)]
#[command(name = "marga-tool")]
#[command(about = "Validate, inspect and edit waypoint overlays on occupancy-grid maps")]
struct Args {
    /// Editor config file (built-in defaults when absent)
    #[arg(long, global = true, default_value = marga::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that an overlay file is loadable
    Validate {
        /// Overlay file
        overlay: PathBuf,
    },
    /// Print the map summary and every node of an overlay
    Inspect {
        /// Overlay file
        overlay: PathBuf,
    },
    /// Create an empty overlay on a map
    New {
        /// Map calibration file
        map: PathBuf,
        /// Output overlay file (`.yaml` appended when missing)
        output: PathBuf,
    },
    /// Append a node at a world position
    Add {
        /// Overlay file
        overlay: PathBuf,
        /// World X (meters)
        #[arg(allow_hyphen_values = true)]
        x: f64,
        /// World Y (meters)
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
    /// Move a node to a world position
    Move {
        /// Overlay file
        overlay: PathBuf,
        /// Node id
        id: usize,
        /// World X (meters)
        #[arg(allow_hyphen_values = true)]
        x: f64,
        /// World Y (meters)
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
    /// Delete a node; later ids shift down
    Delete {
        /// Overlay file
        overlay: PathBuf,
        /// Node id
        id: usize,
    },
    /// Flip a node between head and keep
    Toggle {
        /// Overlay file
        overlay: PathBuf,
        /// Node id
        id: usize,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "marga=debug,marga_tool=debug"
    } else {
        "marga=info,marga_tool=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: &Args) -> marga::Result<ExitCode> {
    let config = EditorConfig::load_or_default(&args.config)?;
    debug!("Graph settings: {:?}", config.to_graph_settings());

    match &args.command {
        Command::Validate { overlay } => validate(overlay),
        Command::Inspect { overlay } => {
            let session = open(&config, overlay)?;
            inspect(&session);
            Ok(ExitCode::SUCCESS)
        }
        Command::New { map, output } => {
            let mut session = EditorSession::from_config(&config);
            session.new_overlay(map)?;
            let written = session.save_as(output)?;
            info!("Created {}", written.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Add { overlay, x, y } => edit(&config, overlay, |s| {
            let id = s.add_node(WorldPoint::new(*x, *y))?;
            info!("Added node {} at ({:.2}, {:.2})", id, x, y);
            Ok(())
        }),
        Command::Move { overlay, id, x, y } => edit(&config, overlay, |s| {
            s.move_node(*id, WorldPoint::new(*x, *y))?;
            info!("Moved node {} to ({:.2}, {:.2})", id, x, y);
            Ok(())
        }),
        Command::Delete { overlay, id } => edit(&config, overlay, |s| {
            s.delete_node(*id)?;
            info!("Deleted node {}", id);
            Ok(())
        }),
        Command::Toggle { overlay, id } => edit(&config, overlay, |s| {
            let mode = s.toggle_direction(*id)?;
            info!("Node {} is now {}", id, mode);
            Ok(())
        }),
    }
}

fn validate(overlay: &Path) -> marga::Result<ExitCode> {
    let raw = OverlayStore::read_file(overlay)?;
    let report = OverlayStore::validate(&raw);
    match report.reason() {
        None => {
            println!("{}: ok", overlay.display());
            Ok(ExitCode::SUCCESS)
        }
        Some(reason) => {
            println!("{}: {}", overlay.display(), reason);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn open(config: &EditorConfig, overlay: &Path) -> marga::Result<EditorSession> {
    let mut session = EditorSession::from_config(config);
    session.open_overlay(overlay)?;
    Ok(session)
}

fn edit(
    config: &EditorConfig,
    overlay: &Path,
    apply: impl FnOnce(&mut EditorSession) -> marga::Result<()>,
) -> marga::Result<ExitCode> {
    let mut session = open(config, overlay)?;
    apply(&mut session)?;
    session.save()?;
    Ok(ExitCode::SUCCESS)
}

fn inspect(session: &EditorSession) {
    let Some(map) = session.map() else {
        return;
    };
    let (width, height) = map.dimensions();
    let (extent_x, extent_y) = map.calibration().extent();
    let (min, max) = map.world_bounds();
    let counts = map.grid().counts();
    println!("Map: {}", map.image());
    println!(
        "  {}x{} px @ {} m/px ({:.2} x {:.2} m)",
        width,
        height,
        map.calibration().resolution,
        extent_x,
        extent_y
    );
    println!(
        "  world ({:.2}, {:.2}) .. ({:.2}, {:.2})",
        min.x, min.y, max.x, max.y
    );
    println!(
        "  cells: {} occupied, {} free, {} unknown ({:.1}% known)",
        counts.occupied,
        counts.free,
        counts.unknown,
        map.grid().known_fraction() * 100.0
    );

    let Some(graph) = session.graph() else {
        return;
    };
    println!();
    println!("Nodes: {}", graph.len());
    for node in graph.nodes() {
        let cell = map
            .cell_at_world(node.position())
            .map_or("outside map", CellState::as_str);
        println!("{}", node.info_text());
        println!("Angle: {:.1}°", node.facing_angle().to_degrees());
        println!("Cell: {}", cell);
        println!();
    }

    println!("Edges: {}", graph.edges().len());
    for edge in graph.edges() {
        let length = graph.nodes()[edge.start_node_id]
            .position()
            .distance(&graph.nodes()[edge.end_node_id].position());
        println!(
            "  {} -> {} ({:.2} m, command {}, skippable {})",
            edge.start_node_id, edge.end_node_id, length, edge.command, edge.skippable
        );
    }
}
