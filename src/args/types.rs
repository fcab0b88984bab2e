use clap::Parser;

use crate::model::Game;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite file holding the saved games. Use :memory: for a throwaway run.
    #[arg(short = 's', long, value_name = "STORE", default_value = "matchplay.db")]
    pub store: String,
    #[arg(short = 'b', long, value_name = "ADDRESS", default_value = "0.0.0.0:8081")]
    pub bind: String,
    /// Directory served under /static.
    #[arg(long, value_name = "STATIC_DIR", default_value = "./static")]
    pub static_dir: String,
    /// Game list exported from the browser tracker; replaces the stored games on startup.
    #[arg(
        long,
        value_name = "IMPORT_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub import_json: Option<ImportedGames>,
}

/// Games read from an `--import-json` file.
#[derive(Debug, Clone)]
pub struct ImportedGames(pub Vec<Game>);

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub store: String,
    pub bind: String,
    pub static_dir: String,
    pub import_json: Option<Vec<Game>>,
}
