//! Simulation configuration and its validation errors.

use serde::{Deserialize, Serialize};

/// Mean skill of the generated population.
pub const DEFAULT_SKILL_MEAN: f64 = 1678.632;

/// Skill spread of the generated population ("all limited players").
pub const DEFAULT_SKILL_STD_DEV: f64 = 83.0;

/// Gems charged for the first entry and for every re-entry.
pub const DEFAULT_ENTRY_FEE: u64 = 4000;

/// Number of skill buckets in the population report.
pub const DEFAULT_BUCKETS: usize = 100;

/// Errors raised when a configuration is rejected before any simulation state exists.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The player count must be positive.
    NoPlayers,
    /// Skill standard deviation must be finite and non-negative.
    InvalidSkillStdDev(f64),
    /// Skill mean must be finite.
    InvalidSkillMean(f64),
    /// A report needs at least one bucket.
    NoBuckets,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoPlayers => write!(f, "Need at least 1 player"),
            ConfigError::InvalidSkillStdDev(v) => {
                write!(f, "Skill standard deviation must be a non-negative number (got {})", v)
            }
            ConfigError::InvalidSkillMean(v) => write!(f, "Skill mean must be a finite number (got {})", v),
            ConfigError::NoBuckets => write!(f, "Need at least 1 report bucket"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything one simulation run needs. Unsigned fields make negative counts unrepresentable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub num_players: usize,
    /// Extra day-one runs a player may buy after hitting the loss cap.
    #[serde(default)]
    pub max_reentries: u32,
    #[serde(default = "default_skill_mean")]
    pub skill_mean: f64,
    #[serde(default = "default_skill_std_dev")]
    pub skill_std_dev: f64,
    #[serde(default = "default_entry_fee")]
    pub entry_fee: u64,
    /// Fixed seed for a reproducible run; `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_skill_mean() -> f64 {
    DEFAULT_SKILL_MEAN
}

fn default_skill_std_dev() -> f64 {
    DEFAULT_SKILL_STD_DEV
}

fn default_entry_fee() -> u64 {
    DEFAULT_ENTRY_FEE
}

impl SimulationConfig {
    /// Config with default skill distribution and entry fee.
    pub fn new(num_players: usize, max_reentries: u32) -> Self {
        Self {
            num_players,
            max_reentries,
            skill_mean: DEFAULT_SKILL_MEAN,
            skill_std_dev: DEFAULT_SKILL_STD_DEV,
            entry_fee: DEFAULT_ENTRY_FEE,
            seed: None,
        }
    }

    pub fn with_skill_std_dev(mut self, std_dev: f64) -> Self {
        self.skill_std_dev = std_dev;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if !self.skill_std_dev.is_finite() || self.skill_std_dev < 0.0 {
            return Err(ConfigError::InvalidSkillStdDev(self.skill_std_dev));
        }
        if !self.skill_mean.is_finite() {
            return Err(ConfigError::InvalidSkillMean(self.skill_mean));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_json_fields() {
        let cfg: SimulationConfig = serde_json::from_str(r#"{ "num_players": 10 }"#).unwrap();
        assert_eq!(cfg, SimulationConfig::new(10, 0));
    }

    #[test]
    fn negative_reentries_do_not_parse() {
        let res = serde_json::from_str::<SimulationConfig>(r#"{ "num_players": 10, "max_reentries": -1 }"#);
        assert!(res.is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert_eq!(SimulationConfig::new(0, 0).validate(), Err(ConfigError::NoPlayers));
        assert!(matches!(
            SimulationConfig::new(5, 0).with_skill_std_dev(-1.0).validate(),
            Err(ConfigError::InvalidSkillStdDev(_))
        ));
        assert!(matches!(
            SimulationConfig::new(5, 0).with_skill_std_dev(f64::NAN).validate(),
            Err(ConfigError::InvalidSkillStdDev(_))
        ));
        assert!(SimulationConfig::new(5, 0).with_skill_std_dev(0.0).validate().is_ok());
    }
}
