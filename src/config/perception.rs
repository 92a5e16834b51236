use crate::perception::PerceptionParams;
use crate::types::WorldPose;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Side length of the world map used when the config does not set one.
pub const DEFAULT_WORLD_SIZE: usize = 200;

fn default_world_size() -> usize {
    DEFAULT_WORLD_SIZE
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Vision overlay (navigable / rock / obstacle masks).
    pub overlay_png: Option<PathBuf>,
    /// Bird's-eye view of the input frame.
    pub rectified_png: Option<PathBuf>,
    /// Per-class masks of the bird's-eye view, black/white.
    pub navigable_mask_png: Option<PathBuf>,
    pub obstacle_mask_png: Option<PathBuf>,
    pub rock_mask_png: Option<PathBuf>,
    /// World-map counts rendered as RGB.
    pub worldmap_png: Option<PathBuf>,
    /// Serialized `PerceptionReport`.
    pub report_json: Option<PathBuf>,
}

impl OutputConfig {
    /// Whether any requested output needs the rectified frame itself.
    pub fn wants_bird_view(&self) -> bool {
        self.rectified_png.is_some()
            || self.navigable_mask_png.is_some()
            || self.obstacle_mask_png.is_some()
            || self.rock_mask_png.is_some()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    #[serde(rename = "input")]
    pub input_path: PathBuf,
    #[serde(default)]
    pub pose: WorldPose,
    #[serde(default = "default_world_size")]
    pub world_size: usize,
    /// Sub-cells per world cell for the visit log; `None` disables it.
    #[serde(default)]
    pub visit_precision: Option<u32>,
    #[serde(default)]
    pub perception: PerceptionParams,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, serde_json::Error> {
    let mut config: RuntimeConfig = serde_json::from_str(contents)?;
    config.pose = WorldPose::new(config.pose.x, config.pose.y, config.pose.yaw_deg);
    Ok(config)
}
