//! One round of shuffle-and-pair.

use open_tournament_sim::logic::{play_round, resolve_match, MatchFormat};
use open_tournament_sim::{Day, Player, PlayerId};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn players(skills: &[f64]) -> Vec<Player> {
    skills.iter().enumerate().map(|(i, &s)| Player::new(i, s, 4000)).collect()
}

fn games(p: &Player) -> u32 {
    p.current_wins + p.current_losses
}

#[test]
fn round_keeps_every_player_and_gives_each_one_result() {
    let mut ps = players(&[1500.0; 10]);
    let mut active: Vec<PlayerId> = (0..10).collect();
    let mut rng = StdRng::seed_from_u64(7);

    let round = play_round(&mut ps, &mut active, &mut rng, |one, two, rng| {
        resolve_match(one, two, MatchFormat::SingleGame, Day::One, rng);
    });

    assert_eq!(round.matches, 5);
    assert_eq!(round.unpaired, None);
    let mut sorted = active.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    assert!(ps.iter().all(|p| games(p) == 1));
    assert_eq!(ps.iter().map(|p| p.day_one_wins).sum::<u32>(), 5);
    assert_eq!(ps.iter().map(|p| p.day_one_losses).sum::<u32>(), 5);
    assert!(ps.iter().all(|p| p.day_two_wins + p.day_two_losses == 0));
}

#[test]
fn odd_player_out_sits_the_round_out() {
    let mut ps = players(&[1500.0; 7]);
    let mut active: Vec<PlayerId> = (0..7).collect();
    let mut rng = StdRng::seed_from_u64(11);

    let round = play_round(&mut ps, &mut active, &mut rng, |one, two, rng| {
        resolve_match(one, two, MatchFormat::BestOfThree, Day::Two, rng);
    });

    assert_eq!(round.matches, 3);
    let bye = round.unpaired.expect("odd count leaves one player out");
    assert_eq!(bye, active[6]);
    assert_eq!(games(&ps[bye]), 0);
    assert_eq!(ps.iter().filter(|p| games(p) == 1).count(), 6);
    assert_eq!(active.len(), 7);
}

#[test]
fn resolver_runs_once_per_pair_with_distinct_players() {
    let mut ps = players(&[1500.0; 9]);
    let mut active: Vec<PlayerId> = (0..9).collect();
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = Vec::new();

    play_round(&mut ps, &mut active, &mut rng, |one, two, _| {
        seen.push((one.id, two.id));
    });

    assert_eq!(seen.len(), 4);
    let mut ids: Vec<_> = seen.iter().flat_map(|&(a, b)| [a, b]).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[test]
fn every_position_is_equally_likely_to_get_the_bye() {
    let mut ps = players(&[1500.0; 3]);
    let mut active: Vec<PlayerId> = (0..3).collect();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut byes = [0u32; 3];

    for _ in 0..6000 {
        let round = play_round(&mut ps, &mut active, &mut rng, |_, _, _| {});
        byes[round.unpaired.unwrap()] += 1;
    }

    for count in byes {
        assert!((1750..=2250).contains(&count), "bye counts {:?}", byes);
    }
}

#[test]
fn stronger_player_wins_at_the_elo_rate() {
    // 400 points apart: 10/11 per game
    let mut ps = players(&[1900.0, 1500.0]);
    let mut active: Vec<PlayerId> = vec![0, 1];
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..4000 {
        play_round(&mut ps, &mut active, &mut rng, |one, two, rng| {
            resolve_match(one, two, MatchFormat::SingleGame, Day::One, rng);
        });
    }

    let rate = f64::from(ps[0].day_one_wins) / 4000.0;
    assert!((rate - 10.0 / 11.0).abs() < 0.03, "win rate {}", rate);
}
