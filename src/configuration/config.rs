//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – tracked center body and spawn settings
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   center_body: 3          # keep body id 3 centered; null for a fixed frame
//!   spawn:
//!     mass_min: 1.0e29      # drag-to-spawn mass range (kg)
//!     mass_max: 1.0e30
//!     density: 1400.0       # density for spawned bodies (kg/m^3)
//!
//! parameters:
//!   time_step: 5000.0       # seconds per step, (0, 1e4]
//!   time_lapse: 1.0         # step multiplier, [0, 1]
//!   G: 6.67430e-11          # gravitational constant
//!   distance_unit: 5.984e11 # metres per screen unit
//!   render_scale: 1000.0    # body enlargement for display
//!
//! bodies:
//!   - m: 1.989e30
//!     s: [0.0, 0.0]
//!     v: [0.0, 0.0]
//!     color: [255, 255, 250]
//!     density: 1408.0
//! ```
//!
//! The engine maps this configuration into its runtime representation; range
//! validation happens there, fatally, at construction.

use serde::Deserialize;

/// Engine-level configuration: frame of reference and spawn behavior.
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    /// Id of the body the camera stays centered on. Ids are assigned in body
    /// list order starting at 0, so this doubles as an index into `bodies`.
    pub center_body: Option<u64>,
    #[serde(default)]
    pub spawn: SpawnConfig,
}

/// Global numerical and physical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub time_step: f64, // seconds per step
    pub time_lapse: f64, // step multiplier
    pub G: f64, // gravitational constant
    pub distance_unit: f64, // metres per screen unit
    pub render_scale: f64, // display enlargement
}

/// Configuration for a single body's initial state.
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub m: f64, // mass (kg)
    pub s: Vec<f64>, // initial position (m)
    pub v: Vec<f64>, // initial velocity (m/s)
    pub color: [u8; 3],
    pub density: f64, // mean density (kg/m^3)
}

/// Settings for mouse-spawned bodies.
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub mass_min: f64,
    pub mass_max: f64,
    pub density: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            mass_min: 1.0e29,
            mass_max: 1.0e30,
            density: 1400.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // frame of reference and spawn settings
    pub parameters: ParametersConfig, // global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // initial state of the system
}
