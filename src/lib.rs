//! Open tournament simulator: library with models, simulation logic and population reports.

pub mod logic;
pub mod models;
pub mod report;

pub use logic::{
    run_batch, run_tournament, run_tournament_with_observer, MatchFormat, Simulation,
    SimulationOutcome,
};
pub use models::{
    ConfigError, Day, Player, PlayerId, PlayerStatus, ProgressObserver, RoundProgress,
    SimulationConfig,
};
pub use report::{BatchSummary, BucketStats, SimulationReport};
