use crate::model::{Game, HOLES_PER_ROUND, Side};

/// Slope of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;
/// Course rating treated as par for the handicap formula.
pub const STANDARD_RATING: f64 = 72.0;

/// `round(index * slope / 113 + (rating - 72))`.
///
/// Inputs are not range checked, so a plus handicap or an odd rating gives an
/// unclamped result. Halves round up toward positive infinity.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn course_handicap(index: f64, slope: f64, rating: f64) -> i32 {
    let raw = index * (slope / STANDARD_SLOPE) + (rating - STANDARD_RATING);
    (raw + 0.5).floor() as i32
}

/// Fixes the course handicaps and the stroke allowance for a game and marks it
/// started. The side with the higher course handicap receives the difference,
/// capped at one stroke per hole. Level handicaps give no strokes to anyone.
pub fn start_match(game: &mut Game) {
    let ch_red = course_handicap(game.red_index, game.slope, game.rating);
    let ch_blue = course_handicap(game.blue_index, game.slope, game.rating);

    let diff = ch_red.abs_diff(ch_blue);
    let cap = u32::try_from(HOLES_PER_ROUND).unwrap_or(u32::MAX);
    let shots_given = u8::try_from(diff.min(cap)).unwrap_or(u8::MAX);

    game.ch_red = ch_red;
    game.ch_blue = ch_blue;
    game.shots_given = shots_given;
    game.shots_to = match ch_red.cmp(&ch_blue) {
        std::cmp::Ordering::Greater => Some(Side::Red),
        std::cmp::Ordering::Less => Some(Side::Blue),
        std::cmp::Ordering::Equal => None,
    };
    game.started = true;
}
