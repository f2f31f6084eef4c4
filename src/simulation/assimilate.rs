//! Merging of collided bodies into a single replacement
//!
//! The whole collided set folds into one body that conserves mass and
//! momentum exactly, mass-weights density, takes its color from the heaviest
//! contributor, and blends position with a pairwise mass-ratio sum. The
//! blended position must land inside the bounding box of the originals or the
//! merge is abandoned for this step, a defined outcome, not an error; the
//! unmerged bodies simply evolve on and re-trigger next step.

use crate::simulation::collisions::Partition;
use crate::simulation::neighbors::NeighborField;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, IdAllocator, NVec2, System};

/// Outcome of a successful assimilation.
#[derive(Debug, Clone)]
pub struct Merge {
    /// The replacement body.
    pub body: Body,
    /// Ids of the bodies it absorbed, in system order.
    pub removed_ids: Vec<u64>,
}

/// Fold the collided set of `partition` into one replacement body.
///
/// Returns `None` when the collided set is empty or when the blended
/// position falls outside the bounding box of the collided bodies' original
/// positions (per axis: `min <= p < max`, with equality accepted on an axis
/// where every collided body shares the coordinate, since the half-open test
/// can never pass there).
///
/// When some collided body carries `tracked` its id transfers to the
/// replacement, keeping camera-follow references alive across the merge. A
/// fresh sequential id is drawn from `ids` in either case.
pub fn assimilate(
    sys: &System,
    field: &NeighborField,
    partition: &Partition,
    ids: &mut IdAllocator,
    tracked: Option<u64>,
    params: &Parameters,
) -> Option<Merge> {
    let collided = &partition.collided;
    if collided.is_empty() {
        return None;
    }

    // Color follows the most massive contributor (first on a tie)
    let mut heaviest = collided[0];
    for &i in &collided[1..] {
        if sys.bodies[i].m > sys.bodies[heaviest].m {
            heaviest = i;
        }
    }
    let color = sys.bodies[heaviest].color;

    let mut m_final = 0.0;
    let mut density_weighted = 0.0;
    let mut momentum = NVec2::zeros();
    let mut position = NVec2::zeros();

    for &i in collided {
        let n = &sys.bodies[i];
        m_final += n.m;
        density_weighted += n.density * n.m;
        momentum += n.m * n.v;

        // Pairwise mass-ratio blend over collided adjacencies. With three or
        // more simultaneous participants the same body contributes once per
        // collided neighbor, so the sum is over-counted; that over-count is
        // exactly what the bounding-box gate below filters.
        for &j in &field.neighbors[i] {
            if collided.contains(&j) {
                let mass_ratio = sys.bodies[j].m / (n.m + sys.bodies[j].m);
                position += n.x * (1.0 - mass_ratio);
            }
        }
    }

    let v_final = momentum / m_final;
    let density_final = density_weighted / m_final;

    // Gate: the blend must sit inside the originals' bounding box, each axis
    // judged independently
    let xs: Vec<f64> = collided.iter().map(|&i| sys.bodies[i].x.x).collect();
    let ys: Vec<f64> = collided.iter().map(|&i| sys.bodies[i].x.y).collect();
    if !within_axis(position.x, &xs) || !within_axis(position.y, &ys) {
        return None;
    }

    let removed_ids: Vec<u64> = collided.iter().map(|&i| sys.bodies[i].id).collect();

    let mut body = Body::new(ids, m_final, position, v_final, color, density_final, params);
    if let Some(center) = tracked {
        if removed_ids.contains(&center) {
            body.id = center;
        }
    }

    Some(Merge { body, removed_ids })
}

/// `min <= p < max` over the axis values; when they are all equal the
/// half-open interval is empty, so `p == min` passes instead.
fn within_axis(p: f64, values: &[f64]) -> bool {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > min {
        p >= min && p < max
    } else {
        p == min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::collisions::detect_collisions;
    use approx::assert_relative_eq;

    fn params() -> Parameters {
        Parameters {
            time_step: 5000.0,
            time_lapse: 1.0,
            G: 6.67430e-11,
            distance_unit: 5.984e11,
            render_scale: 1000.0,
        }
    }

    /// Two touching bodies, unequal masses, distinct positions on both axes.
    fn colliding_pair() -> (System, IdAllocator, Parameters) {
        let p = params();
        let mut ids = IdAllocator::new();
        let a = Body::new(&mut ids, 20.0, NVec2::new(0.0, 0.0), NVec2::new(1.0, 0.0), [255, 0, 0], 1000.0, &p);
        let b = Body::new(&mut ids, 10.0, NVec2::new(0.3, 0.2), NVec2::new(-1.0, 0.0), [0, 0, 255], 2000.0, &p);
        (System::new(vec![a, b]), ids, p)
    }

    #[test]
    fn merge_conserves_mass_and_momentum() {
        let (sys, mut ids, p) = colliding_pair();
        let field = NeighborField::build(&sys);
        let partition = detect_collisions(&sys, &field, p.dt());
        assert_eq!(partition.collided.len(), 2);

        let merge = assimilate(&sys, &field, &partition, &mut ids, None, &p).expect("gate passes");
        assert_relative_eq!(merge.body.m, 30.0);
        // p = m_a*v_a + m_b*v_b = 20*1 - 10*1 = 10 => v = 10/30
        assert_relative_eq!(merge.body.v.x, 10.0 / 30.0);
        assert_relative_eq!(merge.body.v.y, 0.0);
        // density mass-weighted: (1000*20 + 2000*10) / 30
        assert_relative_eq!(merge.body.density, 40000.0 / 30.0);
        // color from the heavier body
        assert_eq!(merge.body.color, [255, 0, 0]);
        assert_eq!(merge.removed_ids, vec![0, 1]);
    }

    #[test]
    fn blended_position_is_mass_weighted_for_a_pair() {
        let (sys, mut ids, p) = colliding_pair();
        let field = NeighborField::build(&sys);
        let partition = detect_collisions(&sys, &field, p.dt());

        let merge = assimilate(&sys, &field, &partition, &mut ids, None, &p).expect("gate passes");
        // for two bodies the blend reduces to (m_a*x_a + m_b*x_b)/(m_a+m_b)
        assert_relative_eq!(merge.body.x.x, (20.0 * 0.0 + 10.0 * 0.3) / 30.0);
        assert_relative_eq!(merge.body.x.y, (20.0 * 0.0 + 10.0 * 0.2) / 30.0);
    }

    #[test]
    fn empty_collided_set_is_a_no_op() {
        let (sys, mut ids, p) = colliding_pair();
        let field = NeighborField::build(&sys);
        let partition = Partition {
            collided: vec![],
            surviving: vec![0, 1],
        };
        assert!(assimilate(&sys, &field, &partition, &mut ids, None, &p).is_none());
    }

    #[test]
    fn degenerate_axis_accepts_the_shared_coordinate() {
        assert!(within_axis(0.0, &[0.0, 0.0]));
        assert!(!within_axis(0.1, &[0.0, 0.0]));
        assert!(within_axis(0.5, &[0.0, 1.0]));
        // half-open: the upper bound itself is out
        assert!(!within_axis(1.0, &[0.0, 1.0]));
    }
}
