pub mod args;
pub mod controller;
pub mod engine;
pub mod error;
pub mod model;
pub mod storage;
pub mod view;

pub const HTMX_PATH: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";

pub use engine::{course_handicap, match_status, result_for_hole, start_match};
pub use error::AppError;
