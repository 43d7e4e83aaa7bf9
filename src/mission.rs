//! Missions (win conditions).
//!
//! A mission is a board-wide predicate assigned to the player at the start
//! of a campaign. Evaluation only reads the board, so it can be checked as
//! often as the player likes.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::board::Board;

/// Color the player's territories carry unless configured otherwise.
pub const DEFAULT_PLAYER_COLOR: &str = "Jogador";

/// Army targeted by the classic elimination mission.
pub const DEFAULT_ENEMY_COLOR: &str = "Verde";

/// Territory count required by the classic conquest mission.
pub const DEFAULT_CONQUER_COUNT: usize = 3;

/// A win condition checked against the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mission {
    /// No territory of `color` remains on the board.
    Eliminate { color: String },
    /// `color` holds at least `count` territories.
    Conquer { color: String, count: usize },
    /// `color` holds at least one territory.
    Hold { color: String },
    /// `color` fields strictly more troops than any other color.
    Supremacy { color: String },
    /// At least two colors still hold territory.
    Contested,
}

impl Mission {
    /// Human-readable objective shown in the mission panel.
    pub fn describe(&self) -> String {
        match self {
            Mission::Eliminate { color } => format!("Destroy the {} army.", color),
            Mission::Conquer { color, count } => {
                format!("Hold {} territories with the {} army.", count, color)
            }
            Mission::Hold { color } => format!("Keep at least one {} territory.", color),
            Mission::Supremacy { color } => {
                format!("Field more troops with {} than any other army.", color)
            }
            Mission::Contested => "Keep at least two armies on the board.".to_string(),
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Returns true if `mission` is satisfied by the current board.
pub fn evaluate_mission(mission: &Mission, board: &Board) -> bool {
    match mission {
        Mission::Eliminate { color } => board.count_owned(color) == 0,
        Mission::Conquer { color, count } => board.count_owned(color) >= *count,
        Mission::Hold { color } => board.count_owned(color) > 0,
        Mission::Supremacy { color } => {
            if board.count_owned(color) == 0 {
                return false;
            }
            let own = board.total_troops(color);
            board
                .colors()
                .into_iter()
                .filter(|c| *c != color.as_str())
                .all(|c| own > board.total_troops(c))
        }
        Mission::Contested => board.colors().len() >= 2,
    }
}

/// The missions a campaign can draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionPool {
    missions: Vec<Mission>,
}

impl MissionPool {
    pub fn new(missions: Vec<Mission>) -> Self {
        MissionPool { missions }
    }

    /// The classic pool: destroy the green army, or hold three territories.
    pub fn classic(player_color: &str) -> Self {
        MissionPool::new(vec![
            Mission::Eliminate {
                color: DEFAULT_ENEMY_COLOR.to_string(),
            },
            Mission::Conquer {
                color: player_color.to_string(),
                count: DEFAULT_CONQUER_COUNT,
            },
        ])
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// Draws one mission uniformly at random. Returns `None` for an empty pool.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Mission> {
        self.missions.choose(rng).cloned()
    }
}
