use crate::model::{Game, Hole, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleResult {
    Won(Side),
    Half,
}

impl HoleResult {
    /// Winning player's name, or "Half".
    #[must_use]
    pub fn label(self, game: &Game) -> String {
        match self {
            HoleResult::Won(side) => game.display_name(side),
            HoleResult::Half => "Half".to_string(),
        }
    }

    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            HoleResult::Won(side) => Some(side),
            HoleResult::Half => None,
        }
    }
}

/// True when the receiving side gets a stroke on this hole.
#[must_use]
pub fn receives_stroke(game: &Game, hole: &Hole) -> bool {
    game.shots_to.is_some() && hole.si >= 1 && hole.si <= i32::from(game.shots_given)
}

/// Net score for one side on one hole.
#[must_use]
pub fn net_strokes(game: &Game, hole: &Hole, side: Side) -> i64 {
    let gross = i64::from(hole.strokes(side));
    if game.shots_to == Some(side) && receives_stroke(game, hole) {
        gross - 1
    } else {
        gross
    }
}

/// Scores a single hole on net strokes. Does not look at whether the hole has
/// been played, so an empty hole that carries a stroke goes to the receiver.
#[must_use]
pub fn result_for_hole(game: &Game, hole: &Hole) -> HoleResult {
    let red = net_strokes(game, hole, Side::Red);
    let blue = net_strokes(game, hole, Side::Blue);
    match red.cmp(&blue) {
        std::cmp::Ordering::Less => HoleResult::Won(Side::Red),
        std::cmp::Ordering::Greater => HoleResult::Won(Side::Blue),
        std::cmp::Ordering::Equal => HoleResult::Half,
    }
}
