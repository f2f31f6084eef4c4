//! Pairwise neighbor geometry for one system snapshot
//!
//! For every body the field holds three index-aligned arrays: the indices of
//! all other bodies, the relative vector to each, and its Euclidean distance.
//! Gravity is all-pairs, so the graph is fully connected and rebuilt from
//! scratch every step; O(N^2) by contract.

use crate::simulation::states::{NVec2, System};

#[derive(Debug, Clone)]
pub struct NeighborField {
    /// `neighbors[n][k]`: index of body `n`'s k-th neighbor in the system.
    pub neighbors: Vec<Vec<usize>>,
    /// `r[n][k]`: relative vector from body `n` to that neighbor.
    pub r: Vec<Vec<NVec2>>,
    /// `r_mag[n][k]`: distance to that neighbor.
    pub r_mag: Vec<Vec<f64>>,
}

impl NeighborField {
    /// Build the full pairwise field for the current snapshot.
    ///
    /// A single-body system yields empty arrays for that body; nothing
    /// downstream divides by a distance that was never computed.
    pub fn build(sys: &System) -> Self {
        let n = sys.bodies.len();
        let mut neighbors = Vec::with_capacity(n);
        let mut r = Vec::with_capacity(n);
        let mut r_mag = Vec::with_capacity(n);

        for i in 0..n {
            let mut idx = Vec::with_capacity(n.saturating_sub(1));
            let mut rel = Vec::with_capacity(n.saturating_sub(1));
            let mut dist = Vec::with_capacity(n.saturating_sub(1));

            for j in 0..n {
                if j == i {
                    continue;
                }
                let rv = sys.bodies[j].x - sys.bodies[i].x;
                idx.push(j);
                rel.push(rv);
                dist.push(rv.norm());
            }

            neighbors.push(idx);
            r.push(rel);
            r_mag.push(dist);
        }

        Self { neighbors, r, r_mag }
    }

    /// Number of bodies the field was built for.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
