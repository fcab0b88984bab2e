pub mod handicap;
pub mod hole;
pub mod status;

pub use handicap::*;
pub use hole::*;
pub use status::*;
