//! Population report: skill buckets and summary numbers over a finished run.

use crate::logic::probability::match_win_probability;
use crate::logic::simulation::SimulationOutcome;
use crate::models::{ConfigError, Day, Player, SimulationConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;

/// Averages over one contiguous slice of the skill-sorted population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    /// 1-based, lowest skill first.
    pub bucket: usize,
    pub players: usize,
    pub min_skill: f64,
    pub max_skill: f64,
    pub avg_skill: f64,
    /// Expected single-game win % of the bucket's average skill against the population mean.
    pub game_win_percent: f64,
    pub avg_net_gems: f64,
    pub avg_day_one_wins: f64,
    pub avg_day_one_losses: f64,
    pub avg_day_two_wins: f64,
    pub avg_day_two_losses: f64,
}

impl BucketStats {
    fn from_players(bucket: usize, players: &[Player], skill_mean: f64) -> Self {
        let avg_skill = mean(players, |p| p.skill);
        Self {
            bucket,
            players: players.len(),
            min_skill: players.iter().map(|p| p.skill).fold(f64::INFINITY, f64::min),
            max_skill: players.iter().map(|p| p.skill).fold(f64::NEG_INFINITY, f64::max),
            avg_skill,
            game_win_percent: match_win_probability(avg_skill, skill_mean) * 100.0,
            avg_net_gems: mean(players, |p| p.net_gems() as f64),
            avg_day_one_wins: mean(players, |p| f64::from(p.day_one_wins)),
            avg_day_one_losses: mean(players, |p| f64::from(p.day_one_losses)),
            avg_day_two_wins: mean(players, |p| f64::from(p.day_two_wins)),
            avg_day_two_losses: mean(players, |p| f64::from(p.day_two_losses)),
        }
    }
}

impl std::fmt::Display for BucketStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}-{}) ({:5.1}% game win%, bucket #{}): {:.1} gems, {:3.1}-{:3.1} on day one, {:3.1}-{:3.1} on day two.",
            self.avg_skill as i64,
            self.min_skill as i64,
            self.max_skill as i64,
            self.game_win_percent,
            self.bucket,
            self.avg_net_gems,
            self.avg_day_one_wins,
            self.avg_day_one_losses,
            self.avg_day_two_wins,
            self.avg_day_two_losses
        )
    }
}

/// Summary of one run, as printed by the command line and served by the web API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub config: SimulationConfig,
    pub seed: Option<u64>,
    pub num_players: usize,
    pub day_two_players: usize,
    pub champions: usize,
    pub stranded: usize,
    pub day_one_rounds: usize,
    pub day_two_rounds: usize,
    pub day_one_avg_skill: f64,
    /// `None` when nobody qualified.
    pub day_two_avg_skill: Option<f64>,
    pub day_two_win_percent: Option<f64>,
    pub total_gems_spent: u64,
    pub total_gems_won: u64,
    /// Pearson correlation between skill and net gems; `None` without variance.
    pub skill_net_gems_correlation: Option<f64>,
    pub requested_buckets: usize,
    /// True when the player count is not a multiple of `requested_buckets`;
    /// the leftover top-skill players are not in any bucket.
    pub uneven_buckets: bool,
    pub buckets: Vec<BucketStats>,
}

impl SimulationReport {
    /// Build the report for `outcome`, splitting the skill-sorted players into `num_buckets` buckets.
    pub fn build(
        outcome: &SimulationOutcome,
        config: &SimulationConfig,
        num_buckets: usize,
    ) -> Result<Self, ConfigError> {
        if num_buckets == 0 {
            return Err(ConfigError::NoBuckets);
        }
        let players = &outcome.players;

        let day_two: Vec<&Player> = outcome.day_two_players().collect();
        let day_two_avg_skill = if day_two.is_empty() {
            None
        } else {
            Some(day_two.iter().map(|p| p.skill).sum::<f64>() / day_two.len() as f64)
        };

        let mut sorted = players.clone();
        sorted.sort_by(|a, b| a.skill.total_cmp(&b.skill));
        let bucket_size = (players.len() / num_buckets).max(1);
        let buckets = sorted
            .chunks_exact(bucket_size)
            .enumerate()
            .map(|(i, chunk)| BucketStats::from_players(i + 1, chunk, config.skill_mean))
            .collect();

        Ok(Self {
            generated_at: Utc::now(),
            config: config.clone(),
            seed: outcome.seed,
            num_players: players.len(),
            day_two_players: day_two.len(),
            champions: outcome.champions.len(),
            stranded: outcome.stranded.len(),
            day_one_rounds: count_rounds(outcome, Day::One),
            day_two_rounds: count_rounds(outcome, Day::Two),
            day_one_avg_skill: mean(players, |p| p.skill),
            day_two_avg_skill,
            day_two_win_percent: day_two_avg_skill
                .map(|skill| match_win_probability(skill, config.skill_mean) * 100.0),
            total_gems_spent: players.iter().map(|p| p.gems_spent).sum(),
            total_gems_won: players.iter().map(|p| p.gems_won).sum(),
            skill_net_gems_correlation: correlation(players),
            requested_buckets: num_buckets,
            uneven_buckets: players.len() % num_buckets != 0,
            buckets,
        })
    }

    /// Headline lines printed before the buckets.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Day one average Elo: {:.3}.", self.day_one_avg_skill)];
        match (self.day_two_avg_skill, self.day_two_win_percent) {
            (Some(skill), Some(pct)) => lines.push(format!(
                "Day two average Elo: {:.3} ({:5.1}% win percent).",
                skill, pct
            )),
            _ => lines.push("Day two average Elo: n/a (nobody qualified).".to_string()),
        }
        if let Some(r) = self.skill_net_gems_correlation {
            lines.push(format!("Skill vs net gems correlation: {:.3}.", r));
        }
        lines
    }

    pub fn warning(&self) -> Option<String> {
        self.uneven_buckets.then(|| {
            format!(
                "Warning - please use a multiple of {} for more accurate top end performance",
                self.requested_buckets
            )
        })
    }

    /// Write one CSV row per bucket (with a header row).
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for bucket in &self.buckets {
            wtr.serialize(bucket)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Averages across a batch of independent runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub seeds: Vec<u64>,
    pub avg_day_two_players: f64,
    pub avg_champions: f64,
    pub avg_day_two_skill: Option<f64>,
    pub avg_net_gems_per_player: f64,
    pub avg_skill_net_gems_correlation: Option<f64>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[SimulationOutcome]) -> Self {
        let day_two_skills: Vec<f64> = outcomes
            .iter()
            .filter_map(|o| {
                let n = o.day_two_entrants.len();
                (n > 0).then(|| o.day_two_players().map(|p| p.skill).sum::<f64>() / n as f64)
            })
            .collect();
        let correlations: Vec<f64> = outcomes.iter().filter_map(|o| correlation(&o.players)).collect();

        Self {
            runs: outcomes.len(),
            seeds: outcomes.iter().filter_map(|o| o.seed).collect(),
            avg_day_two_players: per_run(outcomes, |o| o.day_two_entrants.len() as f64),
            avg_champions: per_run(outcomes, |o| o.champions.len() as f64),
            avg_day_two_skill: average(&day_two_skills),
            avg_net_gems_per_player: per_run(outcomes, |o| mean(&o.players, |p| p.net_gems() as f64)),
            avg_skill_net_gems_correlation: average(&correlations),
        }
    }
}

fn per_run(outcomes: &[SimulationOutcome], f: impl Fn(&SimulationOutcome) -> f64) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    outcomes.iter().map(f).sum::<f64>() / outcomes.len() as f64
}

fn count_rounds(outcome: &SimulationOutcome, day: Day) -> usize {
    outcome.rounds.iter().filter(|r| r.day == day).count()
}

fn mean(players: &[Player], f: impl Fn(&Player) -> f64) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    players.iter().map(f).sum::<f64>() / players.len() as f64
}

fn average(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Pearson correlation of skill against net gems.
fn correlation(players: &[Player]) -> Option<f64> {
    if players.len() < 2 {
        return None;
    }
    let mean_skill = mean(players, |p| p.skill);
    let mean_gems = mean(players, |p| p.net_gems() as f64);
    let (mut cov, mut var_skill, mut var_gems) = (0.0, 0.0, 0.0);
    for p in players {
        let ds = p.skill - mean_skill;
        let dg = p.net_gems() as f64 - mean_gems;
        cov += ds * dg;
        var_skill += ds * ds;
        var_gems += dg * dg;
    }
    let denom = (var_skill * var_gems).sqrt();
    (denom > 0.0).then(|| cov / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: usize, skill: f64, gems_won: u64) -> Player {
        let mut p = Player::new(id, skill, 4000);
        p.gems_won = gems_won;
        p
    }

    #[test]
    fn correlation_is_positive_when_skill_pays() {
        let players = vec![player(0, 1500.0, 0), player(1, 1600.0, 2000), player(2, 1700.0, 8000)];
        let r = correlation(&players).unwrap();
        assert!(r > 0.9 && r <= 1.0 + 1e-12);
    }

    #[test]
    fn correlation_needs_variance() {
        let players = vec![player(0, 1500.0, 0), player(1, 1500.0, 0)];
        assert_eq!(correlation(&players), None);
        assert_eq!(correlation(&players[..1]), None);
    }
}
