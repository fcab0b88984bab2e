use crate::engine::hole::{HoleResult, result_for_hole};
use crate::model::{Game, HOLES_PER_ROUND, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    AllSquare {
        played: u32,
    },
    /// Match still live, or finished on the last hole.
    Up {
        leader: Side,
        margin: u32,
        remaining: u32,
    },
    /// Lead exceeded the holes left to play.
    Won {
        leader: Side,
        margin: u32,
        remaining: u32,
    },
}

impl MatchStatus {
    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        match self {
            MatchStatus::AllSquare { .. } => None,
            MatchStatus::Up { leader, .. } | MatchStatus::Won { leader, .. } => Some(*leader),
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        match self {
            MatchStatus::Won { .. } => true,
            MatchStatus::Up { remaining, .. } => *remaining == 0,
            MatchStatus::AllSquare { played } => *played as usize >= HOLES_PER_ROUND,
        }
    }

    /// Leader cannot lose: up by exactly the number of holes left.
    #[must_use]
    pub fn is_dormie(&self) -> bool {
        matches!(self, MatchStatus::Up { margin, remaining, .. } if *remaining > 0 && margin == remaining)
    }

    /// "Alice 2 Up", "Bob 3&2" or "All Square".
    #[must_use]
    pub fn describe(&self, game: &Game) -> String {
        match self {
            MatchStatus::AllSquare { .. } => "All Square".to_string(),
            MatchStatus::Up { leader, margin, .. } => {
                format!("{} {margin} Up", game.display_name(*leader))
            }
            MatchStatus::Won {
                leader,
                margin,
                remaining,
            } => format!("{} {margin}&{remaining}", game.display_name(*leader)),
        }
    }
}

/// Walks the card in hole order, counting only holes with a score entered.
/// The match is closed out on the first hole where the lead exceeds the holes
/// remaining; anything entered after that does not change the result.
#[must_use]
pub fn match_status(game: &Game) -> MatchStatus {
    let total = u32::try_from(HOLES_PER_ROUND).unwrap_or(u32::MAX);
    let mut red_up: u32 = 0;
    let mut blue_up: u32 = 0;
    let mut played: u32 = 0;

    for hole in game.holes.iter().filter(|h| h.is_played()) {
        played += 1;
        match result_for_hole(game, hole) {
            HoleResult::Won(Side::Red) => red_up += 1,
            HoleResult::Won(Side::Blue) => blue_up += 1,
            HoleResult::Half => {}
        }

        let remaining = total.saturating_sub(played);
        if remaining == 0 {
            break;
        }
        if let (Some(leader), margin) = lead(red_up, blue_up) {
            if margin > remaining {
                return MatchStatus::Won {
                    leader,
                    margin,
                    remaining,
                };
            }
        }
    }

    let remaining = total.saturating_sub(played);
    match lead(red_up, blue_up) {
        (Some(leader), margin) => MatchStatus::Up {
            leader,
            margin,
            remaining,
        },
        (None, _) => MatchStatus::AllSquare { played },
    }
}

fn lead(red_up: u32, blue_up: u32) -> (Option<Side>, u32) {
    match red_up.cmp(&blue_up) {
        std::cmp::Ordering::Greater => (Some(Side::Red), red_up - blue_up),
        std::cmp::Ordering::Less => (Some(Side::Blue), blue_up - red_up),
        std::cmp::Ordering::Equal => (None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::start_match;

    fn game(red_index: f64, blue_index: f64) -> Game {
        let mut game = Game {
            red_name: "Alice".to_string(),
            blue_name: "Bob".to_string(),
            red_index,
            blue_index,
            ..Game::default()
        };
        start_match(&mut game);
        game
    }

    fn play(game: &mut Game, scores: &[(u32, u32)]) {
        for (hole, (red, blue)) in game.holes.iter_mut().zip(scores) {
            hole.red = *red;
            hole.blue = *blue;
        }
    }

    #[test]
    fn nothing_played_is_all_square() {
        let g = game(10.0, 10.0);
        let status = match_status(&g);
        assert_eq!(status, MatchStatus::AllSquare { played: 0 });
        assert_eq!(status.describe(&g), "All Square");
        assert!(!status.is_over());
    }

    #[test]
    fn running_lead() {
        let mut g = game(10.0, 10.0);
        play(&mut g, &[(4, 5), (3, 4), (5, 5)]);
        let status = match_status(&g);
        assert_eq!(status.describe(&g), "Alice 2 Up");
        assert_eq!(status.leader(), Some(Side::Red));
        assert!(!status.is_over());
    }

    #[test]
    fn eighteen_level_holes_all_square() {
        let mut g = game(10.0, 10.0);
        play(&mut g, &[(4, 4); 18]);
        let status = match_status(&g);
        assert_eq!(status.describe(&g), "All Square");
        assert!(status.is_over());
    }

    #[test]
    fn net_scores_drive_all_square() {
        // Alice gets strokes on si 1 and 2, so gross 5-4 on those is halved.
        let mut g = game(10.0, 8.0);
        let mut scores = vec![(4, 4); 18];
        scores[0] = (5, 4);
        scores[1] = (5, 4);
        play(&mut g, &scores);
        assert_eq!(match_status(&g).describe(&g), "All Square");
    }

    #[test]
    fn closed_out_early() {
        // Bob wins the first three, then halves through 16: 3 up with 2 to play.
        let mut g = game(10.0, 10.0);
        let mut scores = vec![(5, 4); 3];
        scores.extend(vec![(4, 4); 13]);
        play(&mut g, &scores);
        let status = match_status(&g);
        assert_eq!(
            status,
            MatchStatus::Won {
                leader: Side::Blue,
                margin: 3,
                remaining: 2
            }
        );
        assert_eq!(status.describe(&g), "Bob 3&2");
        assert!(status.is_over());
    }

    #[test]
    fn clinch_margin_exceeds_remaining() {
        let mut g = game(10.0, 10.0);
        play(&mut g, &[(3, 5); 10]);
        match match_status(&g) {
            MatchStatus::Won {
                margin, remaining, ..
            } => {
                assert!(margin > remaining);
                assert_eq!(margin, 10);
                assert_eq!(remaining, 8);
            }
            other => panic!("expected a closed match, got {other:?}"),
        }
    }

    #[test]
    fn holes_after_close_out_are_ignored() {
        let mut g = game(10.0, 10.0);
        let mut scores = vec![(3, 5); 10];
        scores.extend(vec![(6, 3); 8]);
        play(&mut g, &scores);
        assert_eq!(match_status(&g).describe(&g), "Alice 10&8");
    }

    #[test]
    fn dormie() {
        let mut g = game(10.0, 10.0);
        let mut scores = vec![(3, 4); 2];
        scores.extend(vec![(4, 4); 14]);
        play(&mut g, &scores);
        let status = match_status(&g);
        assert!(status.is_dormie());
        assert_eq!(status.describe(&g), "Alice 2 Up");
    }

    #[test]
    fn won_on_the_last_hole_is_one_up() {
        let mut g = game(10.0, 10.0);
        let mut scores = vec![(4, 4); 17];
        scores.push((4, 5));
        play(&mut g, &scores);
        let status = match_status(&g);
        assert_eq!(status.describe(&g), "Alice 1 Up");
        assert!(status.is_over());
    }
}
