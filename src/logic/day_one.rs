//! Day one: single-game swiss rounds with paid re-entry.

use crate::logic::pairing::{play_round, resolve_match, strand_leftover};
use crate::logic::payout::{day_one_payout, DAY_ONE_MAX_LOSSES, DAY_ONE_WINS_TO_ADVANCE};
use crate::logic::probability::MatchFormat;
use crate::models::{Day, Player, PlayerId, PlayerStatus, ProgressObserver, RoundProgress};
use rand::Rng;

/// What happens to a day-one player after a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DayOneTransition {
    /// Keeps playing.
    Continue,
    /// Run over at the loss cap, re-entry budget left: collect `payout`, pay again, start over.
    Reenter { payout: u64 },
    /// Run over at the loss cap, no re-entries left: collect `payout` and leave.
    Eliminate { payout: u64 },
    /// Reached the win target.
    Qualify,
}

/// Decide the transition for `player` from their current-run counters.
///
/// The loss cap is checked before the win target; both cannot hold at once.
pub fn day_one_transition(player: &Player, max_reentries: u32) -> DayOneTransition {
    if player.current_losses == DAY_ONE_MAX_LOSSES {
        let payout = day_one_payout(player.current_wins);
        if player.entry_count <= max_reentries {
            DayOneTransition::Reenter { payout }
        } else {
            DayOneTransition::Eliminate { payout }
        }
    } else if player.current_wins == DAY_ONE_WINS_TO_ADVANCE {
        DayOneTransition::Qualify
    } else {
        DayOneTransition::Continue
    }
}

/// Apply `transition` to `player` and return their new status.
pub fn apply_day_one_transition(
    player: &mut Player,
    transition: DayOneTransition,
    entry_fee: u64,
) -> PlayerStatus {
    match transition {
        DayOneTransition::Continue => {}
        DayOneTransition::Reenter { payout } => {
            player.award(payout);
            player.reenter(entry_fee);
        }
        DayOneTransition::Eliminate { payout } => {
            player.award(payout);
            player.status = PlayerStatus::Eliminated(Day::One);
        }
        DayOneTransition::Qualify => player.status = PlayerStatus::QualifiedForDayTwo,
    }
    player.status
}

/// Result of a finished day one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DayOneOutcome {
    /// Day-two entrants in the order they qualified.
    pub qualifiers: Vec<PlayerId>,
    pub rounds: u32,
    /// Player left alone when pairing stopped, if any.
    pub stranded: Option<PlayerId>,
}

/// Run day one over `entrants` until fewer than two players are still playing.
///
/// After each round, players are visited from the back of the live list to the front.
/// Qualifiers are handed over in that visiting order; survivors keep their relative order.
pub fn run_day_one<R, O>(
    players: &mut [Player],
    entrants: Vec<PlayerId>,
    max_reentries: u32,
    entry_fee: u64,
    rng: &mut R,
    observer: &mut O,
) -> DayOneOutcome
where
    R: Rng + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let mut active = entrants;
    let mut outcome = DayOneOutcome::default();

    while active.len() > 1 {
        for &id in &active {
            if players[id].status == PlayerStatus::ReenteringNextRound {
                players[id].status = PlayerStatus::Active;
            }
        }

        play_round(players, &mut active, rng, |one, two, rng| {
            resolve_match(one, two, MatchFormat::SingleGame, Day::One, rng);
        });

        let mut still_active = Vec::with_capacity(active.len());
        for &id in active.iter().rev() {
            let player = &mut players[id];
            let transition = day_one_transition(player, max_reentries);
            match apply_day_one_transition(player, transition, entry_fee) {
                PlayerStatus::QualifiedForDayTwo => outcome.qualifiers.push(id),
                status if status.is_live() => still_active.push(id),
                _ => {}
            }
        }
        still_active.reverse();
        active = still_active;

        outcome.rounds += 1;
        let progress = RoundProgress {
            day: Day::One,
            round: outcome.rounds,
            active: active.len(),
            qualified: outcome.qualifiers.len(),
        };
        log::debug!("{}", progress);
        observer.on_round(&progress);
    }

    outcome.stranded = strand_leftover(players, &active, Day::One);
    log::info!(
        "Day 1 finished after {} rounds: {} players qualified for day two",
        outcome.rounds,
        outcome.qualifiers.len()
    );
    outcome
}
