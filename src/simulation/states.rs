//! Core state types for the gravity sandbox.
//!
//! Defines the body entity and the live system:
//! - `Body`: one point mass with derived size and display attributes
//! - `System`: the ordered collection of live bodies plus elapsed time
//! - `IdAllocator`: engine-owned sequential id source
//!
//! Ids are process-unique, monotonically assigned, and never reused; external
//! collaborators (camera follow) rely on them to re-locate a body after a
//! merge.

use nalgebra::Vector2;

use crate::simulation::params::Parameters;

pub type NVec2 = Vector2<f64>;

/// Display color, 8-bit RGB.
pub type Rgb = [u8; 3];

/// Hard ceiling on body mass; larger construction values are clamped, not
/// rejected.
pub const MASS_CEILING: f64 = 1.0e32;

/// Per-component velocity bound (m/s), just under the speed of light.
pub const SPEED_CAP: f64 = 2.0e8;

/// Sequential id source. One per engine; never global.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Hand out the next id. The counter only moves forward.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: u64,
    pub x: NVec2, // position (m)
    pub v: NVec2, // velocity (m/s)
    pub m: f64, // mass (kg), clamped to MASS_CEILING
    pub density: f64, // mean density (kg/m^3), only used to derive size
    pub real_diameter: f64, // physical diameter (m), fixed at creation
    pub display_diameter: f64, // screen diameter, floored at 1
    pub color: Rgb,
    /// Resultant gravitational acceleration from the most recent integration,
    /// `None` until the body has been through one. Collision detection reads
    /// it one step behind.
    pub g_res: Option<NVec2>,
}

impl Body {
    /// Construct a body with the next id from `ids`.
    ///
    /// Mass above [`MASS_CEILING`] is silently clamped. `mass <= 0`,
    /// `density <= 0`, a non-finite position, or a velocity component at or
    /// above [`SPEED_CAP`] abort construction.
    pub fn new(
        ids: &mut IdAllocator,
        mass: f64,
        x: NVec2,
        v: NVec2,
        color: Rgb,
        density: f64,
        params: &Parameters,
    ) -> Self {
        let m = mass.min(MASS_CEILING);
        assert!(m > 0.0, "body mass must be positive, got {mass}");
        assert!(density > 0.0, "body density must be positive, got {density}");
        assert!(x.x.is_finite() && x.y.is_finite(), "body position must be finite");
        assert!(
            v.x.abs() < SPEED_CAP && v.y.abs() < SPEED_CAP,
            "velocity component at or above {SPEED_CAP} m/s: {v:?}"
        );

        let (real_diameter, display_diameter) = sphere_diameters(m, density, params);

        Self {
            id: ids.next_id(),
            x,
            v,
            m,
            density,
            real_diameter,
            display_diameter,
            color,
            g_res: None,
        }
    }
}

/// Physical and display diameters from mass and density.
///
/// The physical diameter inverts the sphere volume,
/// `D = 2 * (3m / (4 pi rho))^(1/3)`; the display diameter scales it by
/// `render_scale / distance_unit` and floors at one screen unit so tiny
/// bodies stay visible.
pub fn sphere_diameters(m: f64, density: f64, params: &Parameters) -> (f64, f64) {
    let real = 2.0 * (3.0 * m / (4.0 * std::f64::consts::PI * density)).cbrt();
    let display = (params.render_scale * real / params.distance_unit).max(1.0);
    (real, display)
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // live bodies; order is part of determinism
    pub t: f64, // simulated seconds elapsed
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn find(&self, id: u64) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> Parameters {
        Parameters {
            time_step: 5000.0,
            time_lapse: 1.0,
            G: 6.67430e-11,
            distance_unit: 4.0 * 1.496e11,
            render_scale: 1000.0,
        }
    }

    #[test]
    fn diameter_inverts_sphere_volume() {
        let p = params();
        let mut ids = IdAllocator::new();
        let b = Body::new(&mut ids, 1.0e24, NVec2::zeros(), NVec2::zeros(), [255, 255, 255], 5000.0, &p);

        // volume back from the diameter should give mass / density
        let r = b.real_diameter / 2.0;
        let volume = 4.0 / 3.0 * std::f64::consts::PI * r.powi(3);
        assert_relative_eq!(volume * 5000.0, 1.0e24, max_relative = 1e-12);
    }

    #[test]
    fn display_diameter_floors_at_one() {
        let p = params();
        let mut ids = IdAllocator::new();
        let b = Body::new(&mut ids, 1.0, NVec2::zeros(), NVec2::zeros(), [0, 0, 0], 5000.0, &p);
        assert_eq!(b.display_diameter, 1.0);
    }

    #[test]
    fn mass_clamps_at_ceiling() {
        let p = params();
        let mut ids = IdAllocator::new();
        let b = Body::new(&mut ids, 1.0e40, NVec2::zeros(), NVec2::zeros(), [0, 0, 0], 1000.0, &p);
        assert_eq!(b.m, MASS_CEILING);
    }

    #[test]
    fn ids_are_sequential() {
        let p = params();
        let mut ids = IdAllocator::new();
        for expect in 0..4u64 {
            let b = Body::new(&mut ids, 1.0, NVec2::zeros(), NVec2::zeros(), [0, 0, 0], 1.0, &p);
            assert_eq!(b.id, expect);
        }
    }

    #[test]
    #[should_panic(expected = "mass must be positive")]
    fn zero_mass_rejected() {
        let p = params();
        let mut ids = IdAllocator::new();
        Body::new(&mut ids, 0.0, NVec2::zeros(), NVec2::zeros(), [0, 0, 0], 1.0, &p);
    }

    #[test]
    #[should_panic(expected = "velocity component")]
    fn light_speed_velocity_rejected() {
        let p = params();
        let mut ids = IdAllocator::new();
        Body::new(&mut ids, 1.0, NVec2::zeros(), NVec2::new(2.0e8, 0.0), [0, 0, 0], 1.0, &p);
    }
}
