//! Compose command - run one frame over a scene file.
//!
//! A scene is a JSON document holding the observer pose (or `null` when the
//! pose is unavailable), the catalogue, and optionally the viewport:
//!
//! ```json
//! {
//!   "pose": { "position": { "latitude": 0.0, "longitude": 0.0 }, "heading_degrees": 0.0 },
//!   "viewport": { "width": 1080.0, "height": 1920.0 },
//!   "catalogue": { "venues": [], "route_waypoints": [], "deals": [] }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use waylens::overlay::ComposedFrame;
use waylens::telemetry::FrameStats;
use waylens::{
    ArElement, Catalogue, OverlayComposer, PerformanceBudget, PerformanceMode, Pose, PoseReading,
    Viewport,
};

use super::common::{load_config, resolve_mode, ModeArg};
use crate::error::CliError;

const DEFAULT_VIEWPORT: Viewport = Viewport::new(1080.0, 1920.0);

/// Scene file contents.
#[derive(Debug, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub pose: Option<Pose>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub catalogue: Catalogue,
}

/// Composed output written to stdout.
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    pub mode: PerformanceMode,
    pub budget: PerformanceBudget,
    pub elements: &'a [ArElement],
    pub stats: &'a FrameStats,
}

/// Arguments for the compose command.
pub struct ComposeArgs {
    pub scene: PathBuf,
    pub mode: Option<ModeArg>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub config: Option<PathBuf>,
}

/// Run the compose command.
pub fn run(args: ComposeArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let mode = resolve_mode(args.mode, &config);
    let composer = OverlayComposer::new(config.overlay)?;
    let scene = read_scene(&args.scene)?;

    let viewport = resolve_viewport(&scene, args.width, args.height);
    let frame = compose_scene(&composer, &scene, mode, viewport);

    info!(
        scene = %args.scene.display(),
        mode = %mode,
        emitted = frame.elements.len(),
        "Composed frame"
    );

    let report = FrameReport {
        mode,
        budget: composer.settings_for(mode),
        elements: &frame.elements,
        stats: &frame.stats,
    };
    let json = serde_json::to_string_pretty(&report).map_err(CliError::Output)?;
    println!("{}", json);
    Ok(())
}

fn read_scene(path: &Path) -> Result<Scene, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::SceneRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::SceneParse {
        path: path.to_path_buf(),
        source,
    })
}

/// CLI dimensions override the scene's viewport, which overrides the default.
fn resolve_viewport(scene: &Scene, width: Option<f64>, height: Option<f64>) -> Viewport {
    let base = scene.viewport.unwrap_or(DEFAULT_VIEWPORT);
    Viewport::new(width.unwrap_or(base.width), height.unwrap_or(base.height))
}

fn compose_scene(
    composer: &OverlayComposer,
    scene: &Scene,
    mode: PerformanceMode,
    viewport: Viewport,
) -> ComposedFrame {
    composer.compose_reading(PoseReading::from(scene.pose), &scene.catalogue, mode, viewport)
}
