//! Tournament day and per-round progress events.

use serde::{Deserialize, Serialize};

/// Which day of the event a round or status belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    One,
    Two,
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Day::One => write!(f, "Day 1"),
            Day::Two => write!(f, "Day 2"),
        }
    }
}

/// Player counts after one round of a stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundProgress {
    pub day: Day,
    /// 1-based round number within the day.
    pub round: u32,
    /// Players still pairing after this round's eliminations.
    pub active: usize,
    /// Day one: players qualified for day two so far. Day two: players who reached 7 wins so far.
    pub qualified: usize,
}

impl std::fmt::Display for RoundProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.day {
            Day::One => write!(
                f,
                "After round {} of {} - {} remaining players, and {} day two players.",
                self.round, self.day, self.active, self.qualified
            ),
            Day::Two => write!(
                f,
                "After round {} of {} - {} remaining players.",
                self.round, self.day, self.active
            ),
        }
    }
}

/// Receives a [`RoundProgress`] after every round of either day.
pub trait ProgressObserver {
    fn on_round(&mut self, progress: &RoundProgress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&RoundProgress),
{
    fn on_round(&mut self, progress: &RoundProgress) {
        self(progress)
    }
}
