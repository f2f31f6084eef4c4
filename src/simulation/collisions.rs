//! Contact detection over the neighbor field
//!
//! A body is flagged collided when any neighbor sits inside a
//! closing-velocity-aware threshold. Without the velocity term, fixed
//! stepping lets bodies tunnel through each other and pick up unphysical
//! slingshot energy from the near-singular force; the threshold grows with
//! how far the pair can close in one step.

use crate::simulation::neighbors::NeighborField;
use crate::simulation::states::System;

/// Index partition of one snapshot into collided and surviving bodies.
/// Both sides preserve system order.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub collided: Vec<usize>,
    pub surviving: Vec<usize>,
}

impl Partition {
    pub fn any_collided(&self) -> bool {
        !self.collided.is_empty()
    }
}

/// Flag every body whose distance to some neighbor has crossed the contact
/// threshold.
///
/// For body `n` against neighbor `k` at distance `d`:
///
/// ```text
/// vf      = | (|v_n| + |v_k|) + (|a_n| + |a_k|) * dT |   (per component, then magnitude)
/// LIMIT   = (0.5*D_n + 0.5*D_k) / (D_n + D_k) + vf * dT
/// collided when d <= LIMIT
/// ```
///
/// The diameter ratio collapses to 0.5 for any two positive diameters; the
/// threshold is dominated by the closing-velocity term. The
/// acceleration term uses the resultants stored by the previous step and is
/// dropped entirely for a pair where either body has none yet (a body spawned
/// since the last step).
///
/// The test is symmetric in the pair, so a nonempty collided set always has
/// at least two members.
pub fn detect_collisions(sys: &System, field: &NeighborField, dt: f64) -> Partition {
    let mut part = Partition::default();

    for (i, n) in sys.bodies.iter().enumerate() {
        let mut hit = false;

        for (k, &d) in field.r_mag[i].iter().enumerate() {
            let other = &sys.bodies[field.neighbors[i][k]];
            let total_diameter = n.real_diameter + other.real_diameter;

            let mut gx = 0.0;
            let mut gy = 0.0;
            if let (Some(gn), Some(go)) = (n.g_res, other.g_res) {
                gx = gn.x.abs() + go.x.abs();
                gy = gn.y.abs() + go.y.abs();
            }

            // v = v0 + g*t, all terms folded to magnitudes
            let vf_x = n.v.x.abs() + other.v.x.abs() + gx * dt;
            let vf_y = n.v.y.abs() + other.v.y.abs() + gy * dt;
            let vf_mag = (vf_x * vf_x + vf_y * vf_y).sqrt();

            let contact_fraction =
                (0.5 * n.real_diameter + 0.5 * other.real_diameter) / total_diameter;

            // s = s0 + v*t
            let limit = contact_fraction + vf_mag * dt;
            if d <= limit {
                hit = true;
                break;
            }
        }

        if hit {
            part.collided.push(i);
        } else {
            part.surviving.push(i);
        }
    }

    part
}
