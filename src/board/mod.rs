//! Board representation.
//!
//! Contains the territory record and the ordered board that owns every
//! territory for the duration of a game.

pub mod state;
pub mod territory;

pub use state::{Board, MAX_TERRITORIES, MIN_TERRITORIES};
pub use territory::{Territory, TerritoryError, NEUTRAL_COLOR};
