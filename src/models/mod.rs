//! Data structures for the simulation: players, configuration, round progress.

mod config;
mod player;
mod progress;

pub use config::{
    ConfigError, SimulationConfig, DEFAULT_BUCKETS, DEFAULT_ENTRY_FEE, DEFAULT_SKILL_MEAN,
    DEFAULT_SKILL_STD_DEV,
};
pub use player::{Player, PlayerId, PlayerStatus};
pub use progress::{Day, ProgressObserver, RoundProgress};
