//! Wall-clock timings for the O(N^2) core
//!
//! `bench_gravity` times one neighbor-field build plus force evaluation;
//! `bench_step` times the full engine step (field, collisions, assimilation,
//! integration). Output is CSV-ish, ready to paste into a spreadsheet.

use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::neighbors::NeighborField;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

fn bench_params() -> Parameters {
    Parameters {
        time_step: 5000.0,
        time_lapse: 1.0,
        G: 6.67430e-11,
        distance_unit: 5.984e11,
        render_scale: 1000.0,
    }
}

/// Deterministic engine of size `n`; no rand needed.
fn make_engine(n: usize) -> Engine {
    let mut engine = Engine::new(bench_params());
    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            (i_f * 0.37).sin() * 5.0e11,
            (i_f * 0.13).cos() * 5.0e11,
        );
        engine.spawn_body(1.0e24, x, NVec2::zeros(), [255, 255, 255], 3000.0);
    }
    engine
}

/// Time one field build + gravity evaluation for a range of N.
pub fn bench_gravity() {
    println!("N,field_and_accel_ms");

    for n in [200, 400, 800, 1600, 3200, 6400] {
        let engine = make_engine(n);
        let forces = AccelSet::new().with(NewtonianGravity {
            G: engine.params.G,
        });
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        let field = NeighborField::build(&engine.system);
        forces.accumulate_accels(&field, &engine.system, &mut out);

        let t0 = Instant::now();
        let field = NeighborField::build(&engine.system);
        forces.accumulate_accels(&field, &engine.system, &mut out);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{n},{ms:.6}");
    }
}

/// Time the full engine step for a range of N.
pub fn bench_step() {
    println!("N,step_ms");

    for n in [200, 400, 800, 1600, 3200, 6400] {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };
        let mut engine = make_engine(n);

        // Warm up
        engine.step();

        let t0 = Instant::now();
        for _ in 0..steps {
            engine.step();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{n},{ms:.6}");
    }
}
