//! Build a fully-initialized runtime scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! consumed by the viewer:
//! - the engine (parameters, initial bodies, tracked center body)
//! - spawn settings for the mouse input layer
//!
//! Inserted into Bevy as a `Resource` and driven by the step and input
//! systems.

use bevy::prelude::Resource;

use crate::configuration::config::{ScenarioConfig, SpawnConfig};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

/// Bevy resource holding the live engine plus viewer-side spawn settings.
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub spawn: SpawnConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from ParametersConfig; validated fatally by
        // Engine::new
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            time_step: p_cfg.time_step,
            time_lapse: p_cfg.time_lapse,
            G: p_cfg.G,
            distance_unit: p_cfg.distance_unit,
            render_scale: p_cfg.render_scale,
        };

        let mut engine = Engine::new(parameters);

        // Bodies: map `BodyConfig` -> runtime bodies; ids are handed out in
        // list order starting at 0, which is what `center_body` refers to
        for bc in &cfg.bodies {
            engine.spawn_body(
                bc.m,
                NVec2::new(bc.s[0], bc.s[1]),
                NVec2::new(bc.v[0], bc.v[1]),
                bc.color,
                bc.density,
            );
        }

        engine.tracked_id = cfg.engine.center_body;

        Self {
            engine,
            spawn: cfg.engine.spawn,
        }
    }
}
