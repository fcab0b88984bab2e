use maud::{Markup, html};

use crate::engine::match_status;
use crate::model::{Game, Side};
use crate::view::scorecard::render_scorecard;

/// Everything below the page title. Edits swap this whole block.
#[must_use]
pub fn render_app(games: &[Game], active: usize) -> Markup {
    html! {
        div id="app" hx-target="#app" hx-swap="outerHTML" {
            (render_game_list(games, active))
            (render_setup_section(games))
            @if let Some(game) = games.get(active).filter(|g| g.started) {
                (render_scorecard(active, game))
            }
        }
    }
}

#[must_use]
pub fn render_game_list(games: &[Game], active: usize) -> Markup {
    html! {
        div class="game-list" {
            @for (index, game) in games.iter().enumerate() {
                button
                    class=[(index == active).then_some("active")]
                    hx-post=(format!("games/{index}/select")) {
                    (game.display_name(Side::Red)) " vs " (game.display_name(Side::Blue))
                    " (" (match_status(game).describe(game)) ")"
                }
            }
        }
    }
}

fn render_setup_section(games: &[Game]) -> Markup {
    html! {
        div class="setup-section" {
            @for (index, game) in games.iter().enumerate() {
                (render_setup_row(index, game))
            }
        }
    }
}

fn render_setup_row(index: usize, game: &Game) -> Markup {
    let setup_url = format!("games/{index}/setup");
    html! {
        div class="setup-row" id=(format!("setup-{index}")) {
            strong { "Game " (index + 1) }
            input name="redName" placeholder="Red" value=(game.red_name)
                hx-post=(setup_url) hx-trigger="change";
            input name="blueName" placeholder="Blue" value=(game.blue_name)
                hx-post=(setup_url) hx-trigger="change";
            input type="number" step="0.1" name="redIndex" title="Red handicap index" value=(game.red_index)
                hx-post=(setup_url) hx-trigger="change";
            input type="number" step="0.1" name="blueIndex" title="Blue handicap index" value=(game.blue_index)
                hx-post=(setup_url) hx-trigger="change";
            input type="number" step="0.1" name="rating" title="Course rating" value=(game.rating)
                hx-post=(setup_url) hx-trigger="change";
            input type="number" name="slope" title="Slope" value=(game.slope)
                hx-post=(setup_url) hx-trigger="change";
            @if game.started {
                button hx-post=(format!("games/{index}/reset")) hx-confirm="Clear this game?" { "Reset" }
            } @else {
                button hx-post=(format!("games/{index}/start")) { "Start" }
            }
        }
    }
}
