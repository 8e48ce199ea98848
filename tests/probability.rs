//! Elo win probabilities and the best-of-three conversion.

use open_tournament_sim::logic::{
    best_of_three, match_win_probability, match_win_probability_best_of_3, MatchFormat,
};

const EPS: f64 = 1e-12;

#[test]
fn equal_ratings_are_a_coin_flip() {
    for r in [0.0, 1500.0, 1678.632, 2400.0] {
        assert!((match_win_probability(r, r) - 0.5).abs() < EPS);
    }
}

#[test]
fn higher_rating_is_favoured_and_probabilities_are_complementary() {
    let pairs = [(1600.0, 1500.0), (1700.0, 1300.0), (1501.0, 1500.0), (3000.0, 100.0)];
    for (a, b) in pairs {
        let p_ab = match_win_probability(a, b);
        let p_ba = match_win_probability(b, a);
        assert!(p_ab > 0.5, "{} vs {} gave {}", a, b, p_ab);
        assert!((p_ab + p_ba - 1.0).abs() < 1e-9);
    }
}

#[test]
fn four_hundred_points_is_ten_to_one() {
    let p = match_win_probability(1900.0, 1500.0);
    assert!((p - 10.0 / 11.0).abs() < EPS);
}

#[test]
fn best_of_three_fixed_points() {
    assert_eq!(best_of_three(0.0), 0.0);
    assert!((best_of_three(0.5) - 0.5).abs() < EPS);
    assert!((best_of_three(1.0) - 1.0).abs() < EPS);
}

#[test]
fn best_of_three_is_monotone_and_amplifies_the_favourite() {
    let mut prev = best_of_three(0.0);
    for i in 1..=1000 {
        let p = i as f64 / 1000.0;
        let f = best_of_three(p);
        assert!(f >= prev, "not monotone at p={}", p);
        if p > 0.5 && p < 1.0 {
            assert!(f > p);
        }
        prev = f;
    }
}

#[test]
fn match_formats_pick_the_right_model() {
    let (a, b) = (1750.0, 1600.0);
    assert_eq!(MatchFormat::SingleGame.win_probability(a, b), match_win_probability(a, b));
    assert_eq!(
        MatchFormat::BestOfThree.win_probability(a, b),
        match_win_probability_best_of_3(a, b)
    );
    assert!(MatchFormat::BestOfThree.win_probability(a, b) > MatchFormat::SingleGame.win_probability(a, b));
}
