use maud::{Markup, html};

use crate::engine::{HoleResult, match_status, receives_stroke, result_for_hole};
use crate::model::{Game, Hole, Side};

#[must_use]
pub fn render_scorecard(index: usize, game: &Game) -> Markup {
    let red = game.display_name(Side::Red);
    let blue = game.display_name(Side::Blue);
    let status = match_status(game);

    html! {
        div id="scorecard" {
            h3 { (red) " vs " (blue) }
            p { (red) " CH: " (game.ch_red) ", " (blue) " CH: " (game.ch_blue) }
            p class="strokes" { (strokes_note(game)) }
            p class="status" {
                (status.describe(game))
                @if status.is_dormie() { " (dormie)" }
            }
            table {
                thead {
                    tr {
                        th { "Hole" } th { "Par" } th { "SI" }
                        th { (red) } th { (blue) }
                        th { "Result" }
                    }
                }
                tbody {
                    @for hole in &game.holes {
                        (render_hole_row(index, game, hole))
                    }
                }
            }
        }
    }
}

fn render_hole_row(index: usize, game: &Game, hole: &Hole) -> Markup {
    let result = hole.is_played().then(|| result_for_hole(game, hole));
    let row_class = match result {
        Some(HoleResult::Won(Side::Red)) => Some("red-row"),
        Some(HoleResult::Won(Side::Blue)) => Some("blue-row"),
        _ => None,
    };
    let hole_url = format!("games/{index}/holes/{}", hole.number);

    html! {
        tr class=[row_class] {
            td { (hole.number) }
            td { input name="par" size="2" value=(hole.par) hx-post=(hole_url) hx-trigger="change"; }
            td { input name="si" size="2" value=(hole.si) hx-post=(hole_url) hx-trigger="change"; }
            td { (render_stroke_cell(game, hole, Side::Red, &hole_url)) }
            td { (render_stroke_cell(game, hole, Side::Blue, &hole_url)) }
            td class="result" {
                @if let Some(result) = result { (result.label(game)) }
            }
        }
    }
}

fn render_stroke_cell(game: &Game, hole: &Hole, side: Side, hole_url: &str) -> Markup {
    let shot = game.shots_to == Some(side) && receives_stroke(game, hole);
    html! {
        button hx-post=(format!("{hole_url}/{}/-1", side.slug())) { "-" }
        span class="strokes" { (hole.strokes(side)) }
        @if shot { sup class="shot" title="Receives a stroke" { "*" } }
        button hx-post=(format!("{hole_url}/{}/1", side.slug())) { "+" }
    }
}

fn strokes_note(game: &Game) -> String {
    match game.shots_to {
        Some(side) if game.shots_given > 0 => {
            let plural = if game.shots_given == 1 { "stroke" } else { "strokes" };
            format!(
                "{} receives {} {plural} (SI 1-{})",
                game.display_name(side),
                game.shots_given,
                game.shots_given
            )
        }
        _ => "Level match, no strokes".to_string(),
    }
}
