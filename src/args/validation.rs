use std::net::SocketAddr;
use std::{fs, path::PathBuf};

use super::types::{Args, CleanArgs, ImportedGames};
use crate::model::Game;

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the bind address does not parse or the store path is empty
    pub fn validate(self) -> Result<CleanArgs, String> {
        if self.store.trim().is_empty() {
            return Err("A store path is required.".to_string());
        }
        if self.bind.parse::<SocketAddr>().is_err() {
            return Err(format!("The bind address '{}' is not host:port.", self.bind));
        }
        Ok(CleanArgs {
            store: self.store,
            bind: self.bind,
            static_dir: self.static_dir,
            import_json: self.import_json.map(|g| g.0),
        })
    }
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not a json array of games
pub fn check_readable_file_and_json(file: &str) -> Result<ImportedGames, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents =
        fs::read_to_string(&path).map_err(|e| format!("The json file '{file}': {e}"))?;
    parse_games_json(&contents).map(ImportedGames)
}

/// The browser tracker stored a bare array of game objects. Extra games past
/// the eighth are accepted here and dropped when the import is applied.
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn parse_games_json(contents: &str) -> Result<Vec<Game>, String> {
    let json: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| format!("The json file is not valid json: {e}"))?;
    let Some(items) = json.as_array() else {
        return Err("The json file is not in the correct format. Expected an array of games.".to_string());
    };
    for (i, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(format!("Game {} is not a json object.", i + 1));
        }
        if let Some(holes) = item.get("holes") {
            if !holes.is_array() {
                return Err(format!("Game {}: holes is not an array.", i + 1));
            }
        }
    }
    serde_json::from_value(json).map_err(|e| format!("The json games do not decode: {e}"))
}
