//! The simulation engine: owns the system and runs the per-tick step
//!
//! Step order is fixed: neighbor field, collision detection, assimilation,
//! then force integration (with the field rebuilt first if a merge changed
//! the population). All mutation happens inside `step`; callers only ever
//! observe whole steps. Single-threaded and deterministic given the prior
//! state.

use crate::simulation::assimilate::assimilate;
use crate::simulation::collisions::detect_collisions;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::neighbors::NeighborField;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, IdAllocator, NVec2, Rgb, System};

/// What one `step` did, for the presentation layer: how much time was
/// simulated and which ids a merge consumed/produced (both empty on a
/// merge-free step).
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub dt: f64,
    pub removed_ids: Vec<u64>,
    pub new_ids: Vec<u64>,
}

pub struct Engine {
    pub params: Parameters,
    pub system: System,
    pub forces: AccelSet,
    ids: IdAllocator,
    /// Externally tracked reference/center body, if any. Survives merges via
    /// id inheritance in the assimilator.
    pub tracked_id: Option<u64>,
    last_report: StepReport,
}

impl Engine {
    /// Build an empty engine. Parameter validation is fatal here, before any
    /// body exists.
    pub fn new(params: Parameters) -> Self {
        params.validate();
        let forces = AccelSet::new().with(NewtonianGravity { G: params.G });
        Self {
            params,
            system: System::new(Vec::new()),
            forces,
            ids: IdAllocator::new(),
            tracked_id: None,
            last_report: StepReport::default(),
        }
    }

    /// Construct and append a new body; returns its id.
    ///
    /// Mass above the engine ceiling is clamped; an at-or-above-cap velocity
    /// component aborts (spawning with invalid preconditions is a programming
    /// error in the caller).
    pub fn spawn_body(&mut self, mass: f64, x: NVec2, v: NVec2, color: Rgb, density: f64) -> u64 {
        let body = Body::new(&mut self.ids, mass, x, v, color, density, &self.params);
        let id = body.id;
        log::debug!("spawned body {id} (m = {:.3e} kg)", body.m);
        self.system.bodies.push(body);
        id
    }

    /// Seconds simulated per step.
    pub fn dt(&self) -> f64 {
        self.params.dt()
    }

    /// Simulated seconds elapsed since construction.
    pub fn elapsed(&self) -> f64 {
        self.system.t
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn find_body(&self, id: u64) -> Option<&Body> {
        self.system.find(id)
    }

    /// Report from the most recent `step`, for consumers that poll instead
    /// of holding the return value.
    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    /// Advance the simulation by one tick.
    ///
    /// Runs collision resolution and (speculative) assimilation against the
    /// snapshot's neighbor field, then integrates forces over whatever
    /// population survived. A merge whose blended position misses the
    /// bounding-box gate leaves the collided bodies in place; they keep
    /// evolving and re-trigger on a later tick.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport {
            dt: self.params.dt(),
            ..Default::default()
        };

        let mut field = NeighborField::build(&self.system);
        let partition = detect_collisions(&self.system, &field, report.dt);

        if let Some(merge) = assimilate(
            &self.system,
            &field,
            &partition,
            &mut self.ids,
            self.tracked_id,
            &self.params,
        ) {
            log::info!(
                "assimilated {} bodies into id {} (m = {:.3e} kg)",
                merge.removed_ids.len(),
                merge.body.id,
                merge.body.m
            );

            let mut next: Vec<Body> = partition
                .surviving
                .iter()
                .map(|&i| self.system.bodies[i].clone())
                .collect();
            report.removed_ids = merge.removed_ids;
            report.new_ids = vec![merge.body.id];
            next.push(merge.body);
            self.system.bodies = next;

            // the snapshot's geometry refers to absorbed bodies; rebuild
            // before taking forces
            field = NeighborField::build(&self.system);
        }

        euler_integrator(&mut self.system, &field, &self.forces, &self.params);

        self.last_report = report.clone();
        report
    }
}
