//! Simulation logic: win probabilities, pairing, both tournament days and the orchestrator.

pub mod day_one;
pub mod day_two;
pub mod pairing;
pub mod payout;
pub mod probability;
pub mod simulation;

pub use day_one::{apply_day_one_transition, day_one_transition, run_day_one, DayOneOutcome, DayOneTransition};
pub use day_two::{apply_day_two_transition, day_two_transition, run_day_two, DayTwoOutcome, DayTwoTransition};
pub use pairing::{decide, play_round, resolve_match, RoundPairing, Side};
pub use payout::{day_one_payout, day_two_payout, DAY_TWO_GRAND_PRIZE};
pub use probability::{best_of_three, match_win_probability, match_win_probability_best_of_3, MatchFormat};
pub use simulation::{
    generate_players, run_batch, run_tournament, run_tournament_with_observer, sample_normal, seeded_rng,
    Simulation, SimulationOutcome,
};
