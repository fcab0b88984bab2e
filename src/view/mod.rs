pub mod games;
pub mod index;
pub mod scorecard;

pub use games::{render_app, render_game_list};
pub use index::{DEFAULT_INDEX_TITLE, render_index_template};
pub use scorecard::render_scorecard;
