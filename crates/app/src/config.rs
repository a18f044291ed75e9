use serde::{Deserialize, Serialize};
use simcore::VehicleExtents;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup parameters for the simulator. All fields have working defaults;
/// a JSON file can override any subset of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Vehicle footprint. Components must be non-negative; the renderer does
    /// not check and a negative extent produces a mirrored rectangle.
    pub vehicle: VehicleExtents,
    /// Fixed integration timestep, seconds. One step per rendered frame.
    pub dt: f64,
    /// Linear velocity added per key press, units/s.
    pub linear_step: f64,
    /// Angular velocity while a turn key is held, deg/s.
    pub angular_step_deg: f64,
    /// Height of the camera above the ground plane.
    pub camera_height: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            vehicle: VehicleExtents::planar(0.6, 0.4),
            dt: 0.01,
            linear_step: 0.1,
            angular_step_deg: 45.0,
            camera_height: 10.0,
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load from `path` if it exists, falling back to defaults on a missing
    /// or malformed file. Config problems are not fatal to the viewer.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return SimConfig::default();
        }
        match SimConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring config {}: {}", path.display(), err);
                SimConfig::default()
            }
        }
    }
}
