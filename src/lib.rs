pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, IdAllocator, NVec2, Rgb, System, MASS_CEILING, SPEED_CAP};
pub use simulation::params::Parameters;
pub use simulation::neighbors::NeighborField;
pub use simulation::forces::{AccelSet, Acceleration, NewtonianGravity};
pub use simulation::integrator::euler_integrator;
pub use simulation::collisions::{detect_collisions, Partition};
pub use simulation::assimilate::{assimilate, Merge};
pub use simulation::engine::{Engine, StepReport};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, EngineConfig, ParametersConfig, ScenarioConfig, SpawnConfig};

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_gravity, bench_step};
