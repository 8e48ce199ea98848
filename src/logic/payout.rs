//! Prize tables for both days.

/// Losses that end a day-one run.
pub const DAY_ONE_MAX_LOSSES: u32 = 3;
/// Wins that qualify a day-one run for day two.
pub const DAY_ONE_WINS_TO_ADVANCE: u32 = 7;
/// Losses that knock a player out of day two.
pub const DAY_TWO_MAX_LOSSES: u32 = 2;
/// Wins that finish day two at the top tier.
pub const DAY_TWO_WINS_TO_COMPLETE: u32 = 7;

/// Gems for finishing day two with seven wins.
pub const DAY_TWO_GRAND_PRIZE: u64 = 400_000;

const DAY_ONE_GEMS_PER_WIN: u64 = 400;

/// Gems for a day-one run that ended at the loss cap with `wins` wins: 400 per win above two.
pub fn day_one_payout(wins: u32) -> u64 {
    DAY_ONE_GEMS_PER_WIN * u64::from(wins.saturating_sub(2))
}

/// Gems for being knocked out of day two with `wins` wins.
pub fn day_two_payout(wins: u32) -> u64 {
    let wins = u64::from(wins);
    match wins {
        1..=3 => wins * 2_000,
        4 | 5 => (wins - 3) * 10_000,
        6 => 200_000,
        // 0 wins earns nothing; 7+ is paid by the grand prize instead
        _ => 0,
    }
}
