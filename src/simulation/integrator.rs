//! Fixed-step time integrator for the gravity system
//!
//! Semi-implicit Euler driven by `AccelSet` and `Parameters`: velocity first
//! from the resultant acceleration, then position from the new velocity.

use super::forces::AccelSet;
use super::neighbors::NeighborField;
use super::params::Parameters;
use super::states::{NVec2, System, SPEED_CAP};

/// Advance the system by one step.
///
/// Updates velocities, positions, each body's stored resultant acceleration,
/// and `sys.t` in place. `field` must have been built for the current
/// snapshot. Bodies with no neighbors are left untouched: no acceleration,
/// no motion.
pub fn euler_integrator(sys: &mut System, field: &NeighborField, forces: &AccelSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }
    debug_assert_eq!(field.len(), n, "field built for a different snapshot");

    let dt = params.dt(); // time step dT

    // Resultant acceleration per body at the current positions
    let mut a_res = vec![NVec2::zeros(); n];
    forces.accumulate_accels(field, sys, &mut a_res);

    for (i, b) in sys.bodies.iter_mut().enumerate() {
        // every body that went through this step carries its resultant,
        // zero included; collision detection reads it next step
        b.g_res = Some(a_res[i]);

        if field.neighbors[i].is_empty() {
            continue;
        }

        // Kick: v' = v + a * dT, one axis at a time. The cap is compared
        // against the accumulator before it is written, so it never trips
        // and velocities can legitimately exceed SPEED_CAP here; changing
        // the comparison changes trajectories (see DESIGN.md).
        let mut vx = 0.0;
        let mut vy = 0.0;
        if vx.abs() < SPEED_CAP {
            vx = b.v.x + a_res[i].x * dt;
        }
        if vy.abs() < SPEED_CAP {
            vy = b.v.y + a_res[i].y * dt;
        }
        b.v = NVec2::new(vx, vy);

        // Drift: s' = s + v' * dT
        b.x += b.v * dt;
    }

    // Advance the system clock by one full step
    sys.t += dt;
}
