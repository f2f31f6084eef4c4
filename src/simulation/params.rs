//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - wall step size and time-lapse multiplier (their product is `dT`),
//! - gravitational constant `G`,
//! - display scaling (`distance_unit`, `render_scale`)

#[derive(Debug, Clone)]
pub struct Parameters {
    pub time_step: f64, // seconds simulated per step before time-lapse, (0, 1e4]
    pub time_lapse: f64, // step multiplier, [0, 1]
    pub G: f64, // gravitational constant
    pub distance_unit: f64, // metres per screen unit, > 0
    pub render_scale: f64, // body enlargement factor for display, > 0
}

impl Parameters {
    /// Seconds simulated per step.
    pub fn dt(&self) -> f64 {
        self.time_step * self.time_lapse
    }

    /// Abort on any out-of-range parameter. Called once at engine
    /// construction; invalid configuration is a programming error, not a
    /// runtime condition.
    pub fn validate(&self) {
        assert!(
            self.time_step > 0.0 && self.time_step <= 1.0e4,
            "time_step must be in (0, 1e4], got {}",
            self.time_step
        );
        assert!(
            (0.0..=1.0).contains(&self.time_lapse),
            "time_lapse must be in [0, 1], got {}",
            self.time_lapse
        );
        assert!(self.G.is_finite(), "G must be finite, got {}", self.G);
        assert!(
            self.distance_unit > 0.0,
            "distance_unit must be positive, got {}",
            self.distance_unit
        );
        assert!(
            self.render_scale > 0.0,
            "render_scale must be positive, got {}",
            self.render_scale
        );
    }
}
