//! Player record and its tournament status.

use crate::models::progress::Day;
use serde::{Deserialize, Serialize};

/// Index of a player in the simulation's player list (the arena).
pub type PlayerId = usize;

/// Where a player currently stands in the event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Playing rounds in the current stage.
    #[default]
    Active,
    /// Hit the day-one loss cap and paid for a fresh run; plays again next round.
    ReenteringNextRound,
    /// Reached the day-one win target.
    QualifiedForDayTwo,
    /// Out of the event on the given day.
    Eliminated(Day),
    /// Reached the day-two win target.
    Completed,
    /// Left alone in a stage that needs two players to pair; receives nothing.
    Stranded(Day),
}

impl PlayerStatus {
    /// True while the player still takes part in pairing.
    pub fn is_live(self) -> bool {
        matches!(self, PlayerStatus::Active | PlayerStatus::ReenteringNextRound)
    }
}

/// One entrant. Persists across both days; only the counters and gem totals change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Fixed "true" skill on the Elo scale. Never adjusted by results.
    pub skill: f64,
    /// Wins in the current run (reset per day and per re-entry).
    pub current_wins: u32,
    /// Losses in the current run (reset per day and per re-entry).
    pub current_losses: u32,
    pub day_one_wins: u32,
    pub day_one_losses: u32,
    pub day_two_wins: u32,
    pub day_two_losses: u32,
    /// Number of paid entries, starting at 1.
    pub entry_count: u32,
    pub gems_spent: u64,
    pub gems_won: u64,
    pub status: PlayerStatus,
}

impl Player {
    /// Create a player with the first entry fee already charged.
    pub fn new(id: PlayerId, skill: f64, entry_fee: u64) -> Self {
        Self {
            id,
            skill,
            current_wins: 0,
            current_losses: 0,
            day_one_wins: 0,
            day_one_losses: 0,
            day_two_wins: 0,
            day_two_losses: 0,
            entry_count: 1,
            gems_spent: entry_fee,
            gems_won: 0,
            status: PlayerStatus::Active,
        }
    }

    /// Record a won round (day one) or match (day two).
    pub fn add_win(&mut self, day: Day) {
        self.current_wins += 1;
        match day {
            Day::One => self.day_one_wins += 1,
            Day::Two => self.day_two_wins += 1,
        }
    }

    /// Record a lost round (day one) or match (day two).
    pub fn add_loss(&mut self, day: Day) {
        self.current_losses += 1;
        match day {
            Day::One => self.day_one_losses += 1,
            Day::Two => self.day_two_losses += 1,
        }
    }

    /// Clear the current-run counters. Per-day tallies are untouched.
    pub fn reset_run(&mut self) {
        self.current_wins = 0;
        self.current_losses = 0;
    }

    /// Pay for another day-one run.
    pub fn reenter(&mut self, entry_fee: u64) {
        self.entry_count += 1;
        self.reset_run();
        self.gems_spent += entry_fee;
        self.status = PlayerStatus::ReenteringNextRound;
    }

    pub fn award(&mut self, gems: u64) {
        self.gems_won += gems;
    }

    /// Gems won minus gems spent.
    pub fn net_gems(&self) -> i64 {
        self.gems_won as i64 - self.gems_spent as i64
    }

    /// Whether the player made it into day two (regardless of how day two went).
    pub fn reached_day_two(&self) -> bool {
        matches!(
            self.status,
            PlayerStatus::QualifiedForDayTwo
                | PlayerStatus::Completed
                | PlayerStatus::Eliminated(Day::Two)
                | PlayerStatus::Stranded(Day::Two)
        )
    }
}
