//! Day two: best-of-three knockout, out at two losses, done at seven wins.

use crate::logic::pairing::{play_round, resolve_match, strand_leftover};
use crate::logic::payout::{
    day_two_payout, DAY_TWO_GRAND_PRIZE, DAY_TWO_MAX_LOSSES, DAY_TWO_WINS_TO_COMPLETE,
};
use crate::logic::probability::MatchFormat;
use crate::models::{Day, Player, PlayerId, PlayerStatus, ProgressObserver, RoundProgress};
use rand::Rng;

/// What happens to a day-two player after a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DayTwoTransition {
    Continue,
    /// Second loss: collect the tier payout for the wins so far.
    Eliminate { payout: u64 },
    /// Seventh win: collect the grand prize.
    Complete { payout: u64 },
}

/// Decide the transition for `player` from their current-run counters.
pub fn day_two_transition(player: &Player) -> DayTwoTransition {
    if player.current_losses == DAY_TWO_MAX_LOSSES {
        DayTwoTransition::Eliminate {
            payout: day_two_payout(player.current_wins),
        }
    } else if player.current_wins == DAY_TWO_WINS_TO_COMPLETE {
        DayTwoTransition::Complete {
            payout: DAY_TWO_GRAND_PRIZE,
        }
    } else {
        DayTwoTransition::Continue
    }
}

/// Apply `transition` to `player` and return their new status.
pub fn apply_day_two_transition(player: &mut Player, transition: DayTwoTransition) -> PlayerStatus {
    match transition {
        DayTwoTransition::Continue => {}
        DayTwoTransition::Eliminate { payout } => {
            player.award(payout);
            player.status = PlayerStatus::Eliminated(Day::Two);
        }
        DayTwoTransition::Complete { payout } => {
            player.award(payout);
            player.status = PlayerStatus::Completed;
        }
    }
    player.status
}

/// Result of a finished day two.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DayTwoOutcome {
    /// Players who reached seven wins, in the order they did.
    pub completed: Vec<PlayerId>,
    pub rounds: u32,
    pub stranded: Option<PlayerId>,
}

/// Run day two over `entrants` (counters already reset) until fewer than two players remain.
///
/// Entrants are marked active on entry; day-one qualification status does not carry over.
pub fn run_day_two<R, O>(
    players: &mut [Player],
    entrants: Vec<PlayerId>,
    rng: &mut R,
    observer: &mut O,
) -> DayTwoOutcome
where
    R: Rng + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let mut active = entrants;
    let mut outcome = DayTwoOutcome::default();
    for &id in &active {
        players[id].status = PlayerStatus::Active;
    }

    while active.len() > 1 {
        play_round(players, &mut active, rng, |one, two, rng| {
            resolve_match(one, two, MatchFormat::BestOfThree, Day::Two, rng);
        });

        let mut still_active = Vec::with_capacity(active.len());
        for &id in active.iter().rev() {
            let player = &mut players[id];
            let transition = day_two_transition(player);
            match apply_day_two_transition(player, transition) {
                PlayerStatus::Completed => outcome.completed.push(id),
                PlayerStatus::Active => still_active.push(id),
                _ => {}
            }
        }
        still_active.reverse();
        active = still_active;

        outcome.rounds += 1;
        let progress = RoundProgress {
            day: Day::Two,
            round: outcome.rounds,
            active: active.len(),
            qualified: outcome.completed.len(),
        };
        log::debug!("{}", progress);
        observer.on_round(&progress);
    }

    outcome.stranded = strand_leftover(players, &active, Day::Two);
    log::info!(
        "Day 2 finished after {} rounds: {} players reached {} wins",
        outcome.rounds,
        outcome.completed.len(),
        DAY_TWO_WINS_TO_COMPLETE
    );
    outcome
}
