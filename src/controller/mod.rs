pub mod http_handlers;
pub mod scorekeeper;

pub use http_handlers::configure;
pub use scorekeeper::{Scorekeeper, SetupUpdate};
