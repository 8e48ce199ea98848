//! Whole-event orchestration: seed a population, run both days, return every player.

use crate::logic::day_one::run_day_one;
use crate::logic::day_two::run_day_two;
use crate::models::{
    ConfigError, Player, PlayerId, ProgressObserver, RoundProgress, SimulationConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Everything a finished run produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// All entrants in creation order, with final counters and gem totals.
    pub players: Vec<Player>,
    /// Day-two entrants in the order they qualified.
    pub day_two_entrants: Vec<PlayerId>,
    /// Players who finished day two with seven wins.
    pub champions: Vec<PlayerId>,
    /// Players dropped because their stage ended with them alone.
    pub stranded: Vec<PlayerId>,
    /// Progress after every round of both days.
    pub rounds: Vec<RoundProgress>,
    /// Seed of the RNG that drove this run, when known.
    pub seed: Option<u64>,
}

impl SimulationOutcome {
    pub fn day_two_players(&self) -> impl Iterator<Item = &Player> {
        self.day_two_entrants.iter().map(move |&id| &self.players[id])
    }
}

/// A validated simulation setup. Each call to [`Simulation::run`] plays a fresh event.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Validate `config`; nothing is generated yet.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play one event drawing all randomness from `rng`.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationOutcome {
        self.run_with_observer(rng, &mut |_: &RoundProgress| {})
    }

    /// Like [`Simulation::run`], also reporting every round to `observer`.
    pub fn run_with_observer<R, O>(&self, rng: &mut R, observer: &mut O) -> SimulationOutcome
    where
        R: Rng + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let cfg = &self.config;
        let mut players = generate_players(cfg, rng);
        log::info!(
            "Simulating {} players, {} re-entries, skill {:.1} +/- {:.1}",
            cfg.num_players,
            cfg.max_reentries,
            cfg.skill_mean,
            cfg.skill_std_dev
        );

        let mut rounds = Vec::new();
        let mut record = |progress: &RoundProgress| {
            rounds.push(*progress);
            observer.on_round(progress);
        };

        let entrants: Vec<PlayerId> = (0..players.len()).collect();
        let day_one = run_day_one(
            &mut players,
            entrants,
            cfg.max_reentries,
            cfg.entry_fee,
            rng,
            &mut record,
        );

        prepare_day_two(&mut players, &day_one.qualifiers);
        let day_two = run_day_two(&mut players, day_one.qualifiers.clone(), rng, &mut record);

        let stranded = day_one.stranded.into_iter().chain(day_two.stranded).collect();
        SimulationOutcome {
            players,
            day_two_entrants: day_one.qualifiers,
            champions: day_two.completed,
            stranded,
            rounds,
            seed: None,
        }
    }
}

/// Draw `num_players` skills from the configured normal distribution; the entry fee is pre-charged.
pub fn generate_players<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Vec<Player> {
    (0..config.num_players)
        .map(|id| {
            let skill = sample_normal(config.skill_mean, config.skill_std_dev, rng);
            Player::new(id, skill, config.entry_fee)
        })
        .collect()
}

/// Sample N(mean, std_dev) with the Box-Muller transform.
pub fn sample_normal<R: Rng + ?Sized>(mean: f64, std_dev: f64, rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero for the log
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Day two starts every qualifier from 0-0.
fn prepare_day_two(players: &mut [Player], qualifiers: &[PlayerId]) {
    for &id in qualifiers {
        players[id].reset_run();
    }
}

/// RNG for one run: seeded when `seed` is set, otherwise from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Validate `config` and play one event with an RNG built from `config.seed`.
pub fn run_tournament(config: &SimulationConfig) -> Result<SimulationOutcome, ConfigError> {
    run_tournament_with_observer(config, &mut |_: &RoundProgress| {})
}

pub fn run_tournament_with_observer<O>(
    config: &SimulationConfig,
    observer: &mut O,
) -> Result<SimulationOutcome, ConfigError>
where
    O: ProgressObserver + ?Sized,
{
    let simulation = Simulation::new(config.clone())?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut outcome = simulation.run_with_observer(&mut rng, observer);
    outcome.seed = Some(seed);
    Ok(outcome)
}

/// Play `runs` independent events. Each run gets its own seed drawn from a seeding RNG
/// built from `config.seed`, so runs never share a random stream.
pub fn run_batch(config: &SimulationConfig, runs: usize) -> Result<Vec<SimulationOutcome>, ConfigError> {
    let simulation = Simulation::new(config.clone())?;
    let mut seeder = seeded_rng(config.seed);
    let outcomes = (0..runs)
        .map(|run| {
            let seed = seeder.gen::<u64>();
            log::info!("Batch run {} of {} (seed {})", run + 1, runs, seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut outcome = simulation.run(&mut rng);
            outcome.seed = Some(seed);
            outcome
        })
        .collect();
    Ok(outcomes)
}
