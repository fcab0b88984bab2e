use maud::{Markup, html};

use crate::HTMX_PATH;
use crate::model::Game;
use crate::view::games::render_app;

pub const DEFAULT_INDEX_TITLE: &str = "Golf Matchplay Tracker";

#[must_use]
pub fn render_index_template(title: &str, games: &[Game], active: usize) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            link rel="stylesheet" type="text/css" href="static/styles.css";
            title { (title) }
            script src=(HTMX_PATH) defer {}
        }
        body {
            div class="app-container" {
                h1 { (title) }
                (render_app(games, active))
            }
        }
    }
}
