use serde::{Deserialize, Serialize};
use std::fmt;

pub const HOLES_PER_ROUND: usize = 18;
pub const GAME_SLOTS: usize = 8;

pub const DEFAULT_RED_INDEX: f64 = 10.0;
pub const DEFAULT_BLUE_INDEX: f64 = 8.0;
pub const DEFAULT_RATING: f64 = 72.0;
pub const DEFAULT_SLOPE: f64 = 113.0;
pub const DEFAULT_PAR: i32 = 4;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Lowercase form used in urls and css classes.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }

    #[must_use]
    pub fn from_slug(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Side::Red),
            "blue" => Some(Side::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Red => "Red",
            Side::Blue => "Blue",
        };
        write!(f, "{s}")
    }
}


#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "StoredHole")]
pub struct Hole {
    #[serde(rename = "hole")]
    pub number: u8,
    pub par: i32,
    /// Stroke index, 1 is the hardest hole.
    pub si: i32,
    pub red: u32,
    pub blue: u32,
}

impl Hole {
    #[must_use]
    pub fn new(number: u8) -> Self {
        Self {
            number,
            par: DEFAULT_PAR,
            si: i32::from(number),
            red: 0,
            blue: 0,
        }
    }

    #[must_use]
    pub fn strokes(&self, side: Side) -> u32 {
        match side {
            Side::Red => self.red,
            Side::Blue => self.blue,
        }
    }

    pub fn strokes_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        }
    }

    /// A hole counts toward the match once either side has a score on it.
    #[must_use]
    pub fn is_played(&self) -> bool {
        self.red > 0 || self.blue > 0
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredGame")]
pub struct Game {
    pub started: bool,
    pub red_name: String,
    pub blue_name: String,
    pub red_index: f64,
    pub blue_index: f64,
    pub rating: f64,
    pub slope: f64,
    pub ch_red: i32,
    pub ch_blue: i32,
    pub shots_given: u8,
    pub shots_to: Option<Side>,
    pub holes: Vec<Hole>,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            started: false,
            red_name: String::new(),
            blue_name: String::new(),
            red_index: DEFAULT_RED_INDEX,
            blue_index: DEFAULT_BLUE_INDEX,
            rating: DEFAULT_RATING,
            slope: DEFAULT_SLOPE,
            ch_red: 0,
            ch_blue: 0,
            shots_given: 0,
            shots_to: None,
            holes: default_holes(),
        }
    }
}

impl Game {
    /// Entered player name, or the side's colour when left blank.
    #[must_use]
    pub fn display_name(&self, side: Side) -> String {
        let name = match side {
            Side::Red => self.red_name.trim(),
            Side::Blue => self.blue_name.trim(),
        };
        if name.is_empty() {
            side.to_string()
        } else {
            name.to_string()
        }
    }

    #[must_use]
    pub fn handicap_index(&self, side: Side) -> f64 {
        match side {
            Side::Red => self.red_index,
            Side::Blue => self.blue_index,
        }
    }

    #[must_use]
    pub fn course_handicap(&self, side: Side) -> i32 {
        match side {
            Side::Red => self.ch_red,
            Side::Blue => self.ch_blue,
        }
    }

    #[must_use]
    pub fn holes_played(&self) -> usize {
        self.holes.iter().filter(|h| h.is_played()).count()
    }

    /// Repairs a record that came from storage or an import: exactly 18 holes
    /// numbered 1..=18 in card order, and at most one stroke per hole.
    pub fn normalize(&mut self) {
        self.holes.truncate(HOLES_PER_ROUND);
        while self.holes.len() < HOLES_PER_ROUND {
            let number = u8::try_from(self.holes.len() + 1).unwrap_or(u8::MAX);
            self.holes.push(Hole::new(number));
        }
        for (number, hole) in (1..=u8::MAX).zip(self.holes.iter_mut()) {
            hole.number = number;
        }
        self.shots_given = self.shots_given.min(MAX_SHOTS);
    }
}

const MAX_SHOTS: u8 = 18;

#[must_use]
pub fn default_holes() -> Vec<Hole> {
    (1..=18u8).map(Hole::new).collect()
}

#[must_use]
pub fn default_games() -> Vec<Game> {
    (0..GAME_SLOTS).map(|_| Game::default()).collect()
}

// The browser tracker wrote NaN (from text typed into a number field) as
// null, and an empty string for shotsTo before a game was started. Every
// field is optional here and falls back to the default for that field.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StoredGame {
    started: Option<bool>,
    red_name: Option<String>,
    blue_name: Option<String>,
    red_index: Option<f64>,
    blue_index: Option<f64>,
    rating: Option<f64>,
    slope: Option<f64>,
    ch_red: Option<f64>,
    ch_blue: Option<f64>,
    shots_given: Option<f64>,
    shots_to: Option<String>,
    holes: Option<Vec<Option<Hole>>>,
}

impl From<StoredGame> for Game {
    fn from(stored: StoredGame) -> Self {
        let defaults = Game::default();
        let holes = stored.holes.map(|holes| {
            holes
                .into_iter()
                .zip(1..=u8::MAX)
                .map(|(hole, number)| hole.unwrap_or_else(|| Hole::new(number)))
                .collect()
        });
        let mut game = Game {
            started: stored.started.unwrap_or(defaults.started),
            red_name: stored.red_name.unwrap_or_default(),
            blue_name: stored.blue_name.unwrap_or_default(),
            red_index: stored.red_index.unwrap_or(defaults.red_index),
            blue_index: stored.blue_index.unwrap_or(defaults.blue_index),
            rating: stored.rating.unwrap_or(defaults.rating),
            slope: stored.slope.unwrap_or(defaults.slope),
            ch_red: stored.ch_red.map_or(defaults.ch_red, whole),
            ch_blue: stored.ch_blue.map_or(defaults.ch_blue, whole),
            shots_given: stored
                .shots_given
                .map_or(defaults.shots_given, |v| count(v).min(u32::from(MAX_SHOTS)) as u8),
            shots_to: match stored.shots_to.as_deref() {
                Some("Red") => Some(Side::Red),
                Some("Blue") => Some(Side::Blue),
                _ => None,
            },
            holes: holes.unwrap_or(defaults.holes),
        };
        game.normalize();
        game
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct StoredHole {
    hole: Option<f64>,
    par: Option<f64>,
    si: Option<f64>,
    red: Option<f64>,
    blue: Option<f64>,
}

impl From<StoredHole> for Hole {
    fn from(stored: StoredHole) -> Self {
        let number = stored.hole.map_or(0, |v| count(v).min(u32::from(u8::MAX)) as u8);
        Hole {
            number,
            par: stored.par.map_or(DEFAULT_PAR, whole),
            si: stored.si.map_or(i32::from(number), whole),
            red: stored.red.map_or(0, count),
            blue: stored.blue.map_or(0, count),
        }
    }
}

// `as` saturates on out-of-range floats.
#[allow(clippy::cast_possible_truncation)]
fn whole(v: f64) -> i32 {
    v.round() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(v: f64) -> u32 {
    v.round().max(0.0) as u32
}
