pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::model::{GAME_SLOTS, Game, default_games};

/// Key the whole game list is stored under.
pub const GAMES_KEY: &str = "games8";

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// String key-value store. Values are whole JSON documents.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn put(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// # Errors
///
/// Returns an error if the backend read fails or the stored value does not decode.
pub async fn kv_get_json<T>(storage: &dyn Storage, key: &str) -> Result<Option<T>, StorageError>
where
    T: for<'de> Deserialize<'de>,
{
    match storage.get(key).await? {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StorageError::new(format!("KV key {key} does not decode: {e}"))),
        None => Ok(None),
    }
}

/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub async fn kv_put_json<T>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string(value).map_err(|e| StorageError::new(e.to_string()))?;
    storage.put(key, payload).await
}

/// Loads the game list, falling back to eight fresh games when nothing is stored
/// or the stored value is not a json array. A single game that does not decode
/// is replaced on its own, so one bad record never costs the other slots. The
/// result always has exactly eight slots.
///
/// # Errors
///
/// Returns an error only if the backend itself fails.
pub async fn load_games(storage: &dyn Storage) -> Result<Vec<Game>, StorageError> {
    let text = storage.get(GAMES_KEY).await?;
    let Some(text) = text else {
        tracing::info!(key = GAMES_KEY, "no stored games, starting with defaults");
        return Ok(default_games());
    };
    let items = match serde_json::from_str::<Vec<serde_json::Value>>(&text) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key = GAMES_KEY, "stored games unreadable, using defaults: {e}");
            return Ok(default_games());
        }
    };
    let games = items
        .into_iter()
        .enumerate()
        .map(|(slot, item)| {
            serde_json::from_value::<Game>(item).unwrap_or_else(|e| {
                tracing::warn!(key = GAMES_KEY, game = slot + 1, "stored game unreadable, using defaults: {e}");
                Game::default()
            })
        })
        .collect();
    Ok(normalize_games(games))
}

/// Writes the whole game list under [`GAMES_KEY`].
///
/// # Errors
///
/// Returns an error if the backend write fails.
pub async fn save_games(storage: &dyn Storage, games: &[Game]) -> Result<(), StorageError> {
    kv_put_json(storage, GAMES_KEY, games).await?;
    tracing::debug!(key = GAMES_KEY, games = games.len(), "games saved");
    Ok(())
}

/// Pads or truncates to the fixed slot count and repairs each card. Games past
/// the eighth slot are dropped.
#[must_use]
pub fn normalize_games(mut games: Vec<Game>) -> Vec<Game> {
    games.truncate(GAME_SLOTS);
    while games.len() < GAME_SLOTS {
        games.push(Game::default());
    }
    for game in &mut games {
        game.normalize();
    }
    games
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_load_gives_defaults() {
        let store = MemoryStore::new();
        let games = load_games(&store).await.unwrap();
        assert_eq!(games, default_games());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryStore::new();
        let mut games = default_games();
        games[3].red_name = "Alice".to_string();
        games[3].holes[0].red = 5;
        save_games(&store, &games).await.unwrap();

        let loaded = load_games(&store).await.unwrap();
        assert_eq!(loaded[3].red_name, "Alice");
        assert_eq!(loaded[3].holes[0].red, 5);
    }

    #[tokio::test]
    async fn garbage_falls_back() {
        let store = MemoryStore::new();
        store.put(GAMES_KEY, "{not json".to_string()).await.unwrap();
        let games = load_games(&store).await.unwrap();
        assert_eq!(games.len(), GAME_SLOTS);
        assert!(kv_get_json::<Vec<Game>>(&store, GAMES_KEY).await.is_err());
    }

    #[tokio::test]
    async fn null_numbers_keep_the_game() {
        let store = MemoryStore::new();
        store
            .put(GAMES_KEY, r#"[{"redName":"Kept","redIndex":null}]"#.to_string())
            .await
            .unwrap();
        let games = load_games(&store).await.unwrap();
        assert_eq!(games[0].red_name, "Kept");
        assert!((games[0].red_index - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn one_bad_game_does_not_wipe_the_rest() {
        let store = MemoryStore::new();
        store
            .put(GAMES_KEY, r#"[{"redName":"Kept"}, {"holes": 3}, {"blueName":"Also"}]"#.to_string())
            .await
            .unwrap();
        let games = load_games(&store).await.unwrap();
        assert_eq!(games[0].red_name, "Kept");
        assert_eq!(games[1], Game::default());
        assert_eq!(games[2].blue_name, "Also");
    }

    #[test]
    fn stored_allowance_is_capped() {
        let mut game = Game::default();
        game.shots_given = 30;
        let games = normalize_games(vec![game]);
        assert_eq!(games[0].shots_given, 18);
    }

    #[test]
    fn short_lists_are_padded() {
        let games = normalize_games(vec![Game::default(); 3]);
        assert_eq!(games.len(), GAME_SLOTS);
        let games = normalize_games(vec![Game::default(); 11]);
        assert_eq!(games.len(), GAME_SLOTS);
    }
}
