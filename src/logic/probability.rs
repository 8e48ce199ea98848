//! Elo-based win probabilities for single games and best-of-three matches.

use serde::{Deserialize, Serialize};

/// How a pairing is decided.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    /// One game per round (day-one swiss).
    SingleGame,
    /// First to two games (day-two knockout).
    BestOfThree,
}

impl MatchFormat {
    /// Probability that a player rated `rating_a` takes the pairing against `rating_b`.
    pub fn win_probability(self, rating_a: f64, rating_b: f64) -> f64 {
        match self {
            MatchFormat::SingleGame => match_win_probability(rating_a, rating_b),
            MatchFormat::BestOfThree => match_win_probability_best_of_3(rating_a, rating_b),
        }
    }
}

/// Logistic Elo expectation that `rating_a` wins a single game against `rating_b`.
pub fn match_win_probability(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / 400.0))
}

/// Chance of winning at least two of three independent games at per-game chance `p`.
pub fn best_of_three(p: f64) -> f64 {
    p * p * (3.0 - 2.0 * p)
}

pub fn match_win_probability_best_of_3(rating_a: f64, rating_b: f64) -> f64 {
    best_of_three(match_win_probability(rating_a, rating_b))
}
