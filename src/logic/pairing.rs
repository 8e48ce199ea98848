//! One round of random pairing: shuffle the live players, pair neighbours, resolve each pair.

use crate::logic::probability::MatchFormat;
use crate::models::{Day, Player, PlayerId, PlayerStatus};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which side of a pairing won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

/// What a round of pairing did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoundPairing {
    /// Pairs resolved this round.
    pub matches: usize,
    /// Player left without an opponent (odd live count). Gets no result this round.
    pub unpaired: Option<PlayerId>,
}

/// Play one round over `active`.
///
/// 1. Shuffle `active` in place (uniform Fisher-Yates).
/// 2. Pair entries 0-1, 2-3, ...; call `resolve` once per pair with player one first.
/// 3. With an odd count the last shuffled entry sits out.
///
/// The live list keeps its length; only win/loss counters change.
pub fn play_round<R, F>(
    players: &mut [Player],
    active: &mut [PlayerId],
    rng: &mut R,
    mut resolve: F,
) -> RoundPairing
where
    R: Rng + ?Sized,
    F: FnMut(&mut Player, &mut Player, &mut R),
{
    active.shuffle(rng);

    let pairs = active.chunks_exact(2);
    let unpaired = pairs.remainder().first().copied();
    let mut matches = 0;
    for pair in pairs {
        let (one, two) = pair_mut(players, pair[0], pair[1]);
        resolve(one, two, rng);
        matches += 1;
    }

    RoundPairing { matches, unpaired }
}

/// Resolve one pairing with a single uniform draw and record the result for `day`.
pub fn resolve_match<R: Rng + ?Sized>(
    one: &mut Player,
    two: &mut Player,
    format: MatchFormat,
    day: Day,
    rng: &mut R,
) -> Side {
    let p = format.win_probability(one.skill, two.skill);
    let winner = decide(p, rng.gen::<f64>());
    match winner {
        Side::One => {
            one.add_win(day);
            two.add_loss(day);
        }
        Side::Two => {
            two.add_win(day);
            one.add_loss(day);
        }
    }
    winner
}

/// Player one wins when their probability is at least the roll (ties go to player one).
pub fn decide(p_one: f64, roll: f64) -> Side {
    if p_one >= roll {
        Side::One
    } else {
        Side::Two
    }
}

/// Mark the lone player left when a stage stops pairing. They keep their counters and get no payout.
pub(crate) fn strand_leftover(players: &mut [Player], active: &[PlayerId], day: Day) -> Option<PlayerId> {
    let &id = active.first()?;
    players[id].status = PlayerStatus::Stranded(day);
    log::warn!(
        "{}: player {} has no opponent left and drops out without a payout ({}-{} in the current run)",
        day,
        id,
        players[id].current_wins,
        players[id].current_losses
    );
    Some(id)
}

/// Two distinct mutable players out of the arena.
fn pair_mut(players: &mut [Player], a: PlayerId, b: PlayerId) -> (&mut Player, &mut Player) {
    assert_ne!(a, b, "a player cannot be paired with themselves");
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_favour_player_one() {
        assert_eq!(decide(0.5, 0.5), Side::One);
        assert_eq!(decide(0.5, 0.5000001), Side::Two);
        assert_eq!(decide(0.0, 0.0), Side::One);
    }

    #[test]
    fn pair_mut_handles_both_orders() {
        let mut players: Vec<Player> = (0..4).map(|i| Player::new(i, 1500.0, 0)).collect();
        let (x, y) = pair_mut(&mut players, 3, 1);
        assert_eq!((x.id, y.id), (3, 1));
        let (x, y) = pair_mut(&mut players, 0, 2);
        assert_eq!((x.id, y.id), (0, 2));
    }
}
