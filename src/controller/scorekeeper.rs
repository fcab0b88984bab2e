use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::engine::start_match;
use crate::error::AppError;
use crate::model::{GAME_SLOTS, Game, HOLES_PER_ROUND, Hole, Side};
use crate::storage::{Storage, load_games, normalize_games, save_games};

/// Fields posted from a game's setup row. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupUpdate {
    pub red_name: Option<String>,
    pub blue_name: Option<String>,
    pub red_index: Option<f64>,
    pub blue_index: Option<f64>,
    pub rating: Option<f64>,
    pub slope: Option<f64>,
}

impl SetupUpdate {
    fn apply(self, game: &mut Game) {
        if let Some(name) = self.red_name {
            game.red_name = name;
        }
        if let Some(name) = self.blue_name {
            game.blue_name = name;
        }
        if let Some(v) = self.red_index {
            game.red_index = v;
        }
        if let Some(v) = self.blue_index {
            game.blue_index = v;
        }
        if let Some(v) = self.rating {
            game.rating = v;
        }
        if let Some(v) = self.slope {
            game.slope = v;
        }
    }
}

/// The eight game slots plus the store they are written to. Every edit is made
/// on a copy of the list, written to storage, and only then swapped in, so the
/// stored array and the in-memory one never disagree.
pub struct Scorekeeper {
    games: RwLock<Vec<Game>>,
    active: AtomicUsize,
    storage: Arc<dyn Storage>,
}

impl Scorekeeper {
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub async fn load(storage: Arc<dyn Storage>) -> Result<Self, AppError> {
        let games = load_games(storage.as_ref()).await?;
        let started = games.iter().filter(|g| g.started).count();
        tracing::info!(slots = games.len(), started, "games loaded");
        Ok(Self {
            games: RwLock::new(games),
            active: AtomicUsize::new(0),
            storage,
        })
    }

    pub async fn snapshot(&self) -> Vec<Game> {
        self.games.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns `NotFound` for a slot outside 0..8.
    pub async fn game(&self, index: usize) -> Result<Game, AppError> {
        let games = self.games.read().await;
        games.get(index).cloned().ok_or_else(|| missing_game(index))
    }

    #[must_use]
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for a slot outside 0..8.
    pub fn select(&self, index: usize) -> Result<(), AppError> {
        if index >= GAME_SLOTS {
            return Err(missing_game(index));
        }
        self.active.store(index, Ordering::Relaxed);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NotFound` for a bad slot or a storage error if the write fails.
    pub async fn set_name(&self, index: usize, side: Side, name: &str) -> Result<Game, AppError> {
        let name = name.to_string();
        self.edit(index, move |game| {
            match side {
                Side::Red => game.red_name = name,
                Side::Blue => game.blue_name = name,
            }
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `Invalid` for a non-finite index, `NotFound` for a bad slot, or a
    /// storage error if the write fails.
    pub async fn set_handicap_index(
        &self,
        index: usize,
        side: Side,
        value: f64,
    ) -> Result<Game, AppError> {
        let value = finite("handicap index", value)?;
        self.edit(index, move |game| {
            match side {
                Side::Red => game.red_index = value,
                Side::Blue => game.blue_index = value,
            }
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `Invalid` for non-finite numbers, `NotFound` for a bad slot, or a
    /// storage error if the write fails.
    pub async fn set_course(&self, index: usize, rating: f64, slope: f64) -> Result<Game, AppError> {
        let update = SetupUpdate {
            rating: Some(rating),
            slope: Some(slope),
            ..SetupUpdate::default()
        };
        self.apply_setup(index, update).await
    }

    /// # Errors
    ///
    /// Returns `Invalid` for non-finite numbers, `NotFound` for a bad slot, or a
    /// storage error if the write fails.
    pub async fn apply_setup(&self, index: usize, update: SetupUpdate) -> Result<Game, AppError> {
        for (field, value) in [
            ("red index", update.red_index),
            ("blue index", update.blue_index),
            ("rating", update.rating),
            ("slope", update.slope),
        ] {
            if let Some(v) = value {
                finite(field, v)?;
            }
        }
        self.edit(index, move |game| {
            update.apply(game);
            Ok(())
        })
        .await
    }

    /// Fixes handicaps and strokes for the game and makes it the active one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a bad slot or a storage error if the write fails.
    pub async fn start(&self, index: usize) -> Result<Game, AppError> {
        let game = self
            .edit(index, |game| {
                start_match(game);
                Ok(())
            })
            .await?;
        self.select(index)?;
        tracing::info!(
            game = index + 1,
            ch_red = game.ch_red,
            ch_blue = game.ch_blue,
            shots_given = game.shots_given,
            shots_to = ?game.shots_to,
            "game started"
        );
        Ok(game)
    }

    /// Adds `delta` to a side's strokes on `hole` (1..=18), never going below zero.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a bad slot or hole, or a storage error if the write fails.
    pub async fn adjust_strokes(
        &self,
        index: usize,
        hole: usize,
        side: Side,
        delta: i32,
    ) -> Result<Game, AppError> {
        self.edit(index, move |game| {
            let hole = hole_mut(game, hole)?;
            let strokes = hole.strokes_mut(side);
            *strokes = strokes.saturating_add_signed(delta);
            Ok(())
        })
        .await
    }

    /// Changes par and stroke index of one hole in a single write. `None`
    /// leaves that field as it is.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a bad slot or hole, or a storage error if the write fails.
    pub async fn set_hole(
        &self,
        index: usize,
        hole: usize,
        par: Option<i32>,
        si: Option<i32>,
    ) -> Result<Game, AppError> {
        self.edit(index, move |game| {
            let hole = hole_mut(game, hole)?;
            if let Some(par) = par {
                hole.par = par;
            }
            if let Some(si) = si {
                hole.si = si;
            }
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `NotFound` for a bad slot or hole, or a storage error if the write fails.
    pub async fn set_par(&self, index: usize, hole: usize, par: i32) -> Result<Game, AppError> {
        self.set_hole(index, hole, Some(par), None).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` for a bad slot or hole, or a storage error if the write fails.
    pub async fn set_stroke_index(
        &self,
        index: usize,
        hole: usize,
        si: i32,
    ) -> Result<Game, AppError> {
        self.set_hole(index, hole, None, Some(si)).await
    }

    /// Puts one slot back to a fresh, unstarted game.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a bad slot or a storage error if the write fails.
    pub async fn reset(&self, index: usize) -> Result<Game, AppError> {
        let game = self
            .edit(index, |game| {
                *game = Game::default();
                Ok(())
            })
            .await?;
        tracing::info!(game = index + 1, "game reset");
        Ok(game)
    }

    /// Replaces every slot, e.g. with state exported from the browser widget.
    /// Games past the eighth are dropped.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub async fn import(&self, games: Vec<Game>) -> Result<(), AppError> {
        if games.len() > GAME_SLOTS {
            tracing::warn!(
                games = games.len(),
                kept = GAME_SLOTS,
                "import has more games than slots, dropping the rest"
            );
        }
        let games = normalize_games(games);
        let mut current = self.games.write().await;
        save_games(self.storage.as_ref(), &games).await?;
        *current = games;
        tracing::info!("games imported");
        Ok(())
    }

    async fn edit<F>(&self, index: usize, f: F) -> Result<Game, AppError>
    where
        F: FnOnce(&mut Game) -> Result<(), AppError>,
    {
        let mut current = self.games.write().await;
        let mut next = current.clone();
        let game = next.get_mut(index).ok_or_else(|| missing_game(index))?;
        f(game)?;
        let edited = game.clone();
        save_games(self.storage.as_ref(), &next).await?;
        *current = next;
        Ok(edited)
    }
}

fn hole_mut(game: &mut Game, hole: usize) -> Result<&mut Hole, AppError> {
    if hole == 0 || hole > HOLES_PER_ROUND {
        return Err(AppError::NotFound(format!("hole {hole}")));
    }
    game.holes
        .get_mut(hole - 1)
        .ok_or_else(|| AppError::NotFound(format!("hole {hole}")))
}

fn missing_game(index: usize) -> AppError {
    AppError::NotFound(format!("game {index}"))
}

fn finite(field: &str, value: f64) -> Result<f64, AppError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::Invalid(format!("{field} must be a number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{GAMES_KEY, MemoryStore, Storage, StorageError, kv_get_json};
    use async_trait::async_trait;

    /// Counts writes and fails every write after `fail_after`.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        puts: AtomicUsize,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl Storage for CountingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
            let n = self.puts.fetch_add(1, Ordering::SeqCst);
            if self.fail_after.is_some_and(|limit| n >= limit) {
                return Err(StorageError::new("disk full"));
            }
            self.inner.put(key, value).await
        }
    }

    async fn keeper() -> (Scorekeeper, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let keeper = Scorekeeper::load(store.clone()).await.unwrap();
        (keeper, store)
    }

    async fn stored(store: &MemoryStore) -> Vec<Game> {
        kv_get_json(store, GAMES_KEY).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn decrement_from_zero_stays_zero() {
        let (keeper, _) = keeper().await;
        let game = keeper.adjust_strokes(0, 1, Side::Red, -1).await.unwrap();
        assert_eq!(game.holes[0].red, 0);
        let game = keeper.adjust_strokes(0, 1, Side::Red, 1).await.unwrap();
        let game2 = keeper.adjust_strokes(0, 1, Side::Red, 1).await.unwrap();
        assert_eq!(game.holes[0].red, 1);
        assert_eq!(game2.holes[0].red, 2);
    }

    #[tokio::test]
    async fn every_edit_is_persisted() {
        let (keeper, store) = keeper().await;
        keeper.set_name(2, Side::Blue, "Bob").await.unwrap();
        keeper.adjust_strokes(2, 18, Side::Blue, 1).await.unwrap();
        let saved = stored(&store).await;
        assert_eq!(saved.len(), GAME_SLOTS);
        assert_eq!(saved[2].blue_name, "Bob");
        assert_eq!(saved[2].holes[17].blue, 1);
    }

    #[tokio::test]
    async fn start_selects_and_computes() {
        let (keeper, store) = keeper().await;
        keeper.set_course(5, 74.0, 113.0).await.unwrap();
        let game = keeper.start(5).await.unwrap();
        assert!(game.started);
        assert_eq!(game.ch_red, 12);
        assert_eq!(game.ch_blue, 10);
        assert_eq!(game.shots_to, Some(Side::Red));
        assert_eq!(keeper.active(), 5);
        assert!(stored(&store).await[5].started);
    }

    #[tokio::test]
    async fn bad_slots_and_holes() {
        let (keeper, _) = keeper().await;
        assert!(matches!(keeper.game(8).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            keeper.adjust_strokes(0, 0, Side::Red, 1).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            keeper.set_par(0, 19, 3).await,
            Err(AppError::NotFound(_))
        ));
        assert!(keeper.select(8).is_err());
    }

    #[tokio::test]
    async fn non_finite_numbers_rejected() {
        let (keeper, _) = keeper().await;
        let err = keeper
            .set_handicap_index(0, Side::Red, f64::NAN)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));
        assert!((keeper.game(0).await.unwrap().red_index - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn par_and_si_land_in_one_write() {
        let store = Arc::new(CountingStore::default());
        let keeper = Scorekeeper::load(store.clone()).await.unwrap();
        let game = keeper.set_hole(3, 9, Some(5), Some(2)).await.unwrap();
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);
        assert_eq!((game.holes[8].par, game.holes[8].si), (5, 2));
        let saved = stored(&store.inner).await;
        assert_eq!((saved[3].holes[8].par, saved[3].holes[8].si), (5, 2));
    }

    #[tokio::test]
    async fn failed_write_leaves_games_untouched() {
        let store = Arc::new(CountingStore {
            fail_after: Some(0),
            ..CountingStore::default()
        });
        let keeper = Scorekeeper::load(store.clone()).await.unwrap();
        let err = keeper.set_hole(0, 1, Some(3), Some(18)).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let game = keeper.game(0).await.unwrap();
        assert_eq!((game.holes[0].par, game.holes[0].si), (4, 1));
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let (keeper, _) = keeper().await;
        keeper.set_stroke_index(1, 4, 11).await.unwrap();
        keeper.start(1).await.unwrap();
        let game = keeper.reset(1).await.unwrap();
        assert_eq!(game, Game::default());
    }

    #[tokio::test]
    async fn import_normalizes() {
        let (keeper, store) = keeper().await;
        let mut game = Game::default();
        game.red_name = "Imported".to_string();
        keeper.import(vec![game]).await.unwrap();
        let games = keeper.snapshot().await;
        assert_eq!(games.len(), GAME_SLOTS);
        assert_eq!(games[0].red_name, "Imported");
        assert_eq!(stored(&store).await[0].red_name, "Imported");
    }

    #[tokio::test]
    async fn import_drops_extra_games_and_caps_allowance() {
        let (keeper, _) = keeper().await;
        let mut games = vec![Game::default(); 10];
        games[0].shots_given = 30;
        games[9].red_name = "Ninth".to_string();
        keeper.import(games).await.unwrap();
        let games = keeper.snapshot().await;
        assert_eq!(games.len(), GAME_SLOTS);
        assert_eq!(games[0].shots_given, 18);
        assert!(games.iter().all(|g| g.red_name != "Ninth"));
    }
}
