//! Day two: knockout payouts and the stage loop.

use open_tournament_sim::logic::{
    apply_day_two_transition, day_two_payout, day_two_transition, run_day_two, DayTwoTransition,
    DAY_TWO_GRAND_PRIZE,
};
use open_tournament_sim::{Day, Player, PlayerId, PlayerStatus, RoundProgress};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn player_at(wins: u32, losses: u32) -> Player {
    let mut p = Player::new(0, 1700.0, 4000);
    p.current_wins = wins;
    p.current_losses = losses;
    p
}

#[test]
fn payout_table() {
    assert_eq!(day_two_payout(0), 0);
    assert_eq!(day_two_payout(1), 2_000);
    assert_eq!(day_two_payout(3), 6_000);
    assert_eq!(day_two_payout(4), 10_000);
    assert_eq!(day_two_payout(5), 20_000);
    assert_eq!(day_two_payout(6), 200_000);
    assert_eq!(day_two_payout(7), 0);
    assert_eq!(day_two_payout(12), 0);
}

#[test]
fn payout_never_drops_with_more_wins() {
    for w1 in 1..=6 {
        for w2 in 1..w1 {
            assert!(day_two_payout(w1) >= day_two_payout(w2), "{} vs {}", w1, w2);
        }
    }
}

#[test]
fn second_loss_at_four_wins_pays_ten_thousand() {
    let mut p = player_at(4, 2);
    let t = day_two_transition(&p);
    assert_eq!(t, DayTwoTransition::Eliminate { payout: 10_000 });
    assert_eq!(apply_day_two_transition(&mut p, t), PlayerStatus::Eliminated(Day::Two));
    assert_eq!(p.gems_won, 10_000);
}

#[test]
fn seven_straight_wins_pay_the_grand_prize() {
    let mut p = player_at(0, 0);
    for _ in 0..7 {
        assert_eq!(day_two_transition(&p), DayTwoTransition::Continue);
        p.add_win(Day::Two);
    }
    let t = day_two_transition(&p);
    assert_eq!(t, DayTwoTransition::Complete { payout: DAY_TWO_GRAND_PRIZE });
    assert_eq!(apply_day_two_transition(&mut p, t), PlayerStatus::Completed);
    assert_eq!(p.gems_won, 400_000);
    assert_eq!(p.current_wins, 7);
}

#[test]
fn seven_wins_with_one_loss_still_completes() {
    assert_eq!(
        day_two_transition(&player_at(7, 1)),
        DayTwoTransition::Complete { payout: 400_000 }
    );
}

#[test]
fn dominant_player_goes_seven_and_oh() {
    let mut players: Vec<Player> = (0..1024).map(|i| Player::new(i, 1600.0, 4000)).collect();
    players[500].skill = 1_000_000.0;
    let entrants: Vec<PlayerId> = (0..1024).collect();
    let mut rng = StdRng::seed_from_u64(8);

    let outcome = run_day_two(&mut players, entrants, &mut rng, &mut |_: &RoundProgress| {});

    let star = &players[500];
    assert_eq!(star.status, PlayerStatus::Completed);
    assert_eq!((star.day_two_wins, star.day_two_losses), (7, 0));
    assert_eq!(star.current_wins, 7);
    assert_eq!(star.gems_won, 400_000);
    assert!(outcome.completed.contains(&500));
}

#[test]
fn every_entrant_ends_in_a_terminal_state_with_the_matching_payout() {
    let mut players: Vec<Player> = (0..777)
        .map(|i| Player::new(i, 1600.0 + (i % 13) as f64 * 10.0, 4000))
        .collect();
    let entrants: Vec<PlayerId> = (0..777).collect();
    let mut rng = StdRng::seed_from_u64(21);
    let mut events = Vec::new();

    let outcome = run_day_two(&mut players, entrants, &mut rng, &mut |p: &RoundProgress| events.push(*p));

    assert_eq!(events.len() as u32, outcome.rounds);
    assert!(events.iter().all(|e| e.day == Day::Two));
    for p in &players {
        match p.status {
            PlayerStatus::Eliminated(Day::Two) => {
                assert_eq!(p.current_losses, 2);
                assert!(p.current_wins < 7);
                assert_eq!(p.gems_won, day_two_payout(p.current_wins));
            }
            PlayerStatus::Completed => {
                assert_eq!(p.current_wins, 7);
                assert!(p.current_losses < 2);
                assert_eq!(p.gems_won, 400_000);
            }
            PlayerStatus::Stranded(Day::Two) => {
                assert_eq!(outcome.stranded, Some(p.id));
                assert_eq!(p.gems_won, 0);
            }
            other => panic!("player {} ended day two as {:?}", p.id, other),
        }
        assert_eq!(p.day_one_wins + p.day_one_losses, 0);
    }
}
