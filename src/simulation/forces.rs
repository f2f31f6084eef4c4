//! Force / acceleration contributors for the gravity engine
//!
//! Defines the acceleration trait and direct Newtonian gravity over the
//! per-step [`NeighborField`]

use crate::simulation::neighbors::NeighborField;
use crate::simulation::states::{NVec2, System};

/// Collection of acceleration terms (gravity today, drag etc. tomorrow)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, field: &NeighborField, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(field, sys, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on a [`System`] snapshot and the
/// neighbor geometry computed for it
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, field: &NeighborField, sys: &System, out: &mut [NVec2]);
}

/// 10^10: per-neighbor acceleration components are rounded to ten decimal
/// places. Suppresses numerical noise in the far-field tail; the exact digit
/// count is load-bearing for reproducibility and pinned by a regression test.
const ROUND_SCALE: f64 = 1.0e10;

fn round_component(x: f64) -> f64 {
    (x * ROUND_SCALE).round() / ROUND_SCALE
}

/// Direct Newtonian gravity, no softening: close encounters are resolved by
/// assimilation, not smoothing.
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, field: &NeighborField, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        if n == 0 { // No bodies, return
            return;
        }
        debug_assert_eq!(field.len(), n, "field built for a different snapshot");

        for i in 0..n {
            // Zero-neighbor bodies keep a zero contribution
            for k in 0..field.neighbors[i].len() {
                let j = field.neighbors[i][k];

                // r points from body i toward its neighbor, so the pull is
                // along +r

                // a_k = G * m_j * r / |r|^3, each component rounded to ten
                // decimal places before the sum
                let rv = field.r[i][k];
                let d = field.r_mag[i][k];
                let coef = self.G * sys.bodies[j].m / (d * d * d);

                out[i].x += round_component(coef * rv.x);
                out[i].y += round_component(coef * rv.y);
            }
        }
    }
}
