pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, ImportedGames};

use clap::Parser;

/// Parses the command line and resolves it into settings the server runs with.
///
/// # Errors
///
/// Returns an error if the import file is not a readable array of games.
pub fn args_checks() -> Result<CleanArgs, String> {
    let args = Args::parse();
    args.validate()
}
