//! Territory records.
//!
//! A territory is a named board cell held by an owning color with a
//! garrison of troops. Combat mutates the owner and the troop count in
//! place; territories are never removed from the board.

use serde::Deserialize;
use thiserror::Error;

/// Color assigned during setup when the player leaves it blank.
pub const NEUTRAL_COLOR: &str = "Neutro";

/// Errors raised when registering a territory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerritoryError {
    #[error("territory '{0}' must start with at least one troop")]
    NoInitialTroops(String),
}

/// A named board cell with an owning color and a troop count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Territory {
    pub name: String,
    #[serde(rename = "color")]
    pub owner_color: String,
    pub troops: u32,
}

impl Territory {
    /// Creates a territory. The starting garrison must be positive.
    pub fn new(
        name: impl Into<String>,
        owner_color: impl Into<String>,
        troops: u32,
    ) -> Result<Self, TerritoryError> {
        let name = name.into();
        if troops == 0 {
            return Err(TerritoryError::NoInitialTroops(name));
        }
        Ok(Territory {
            name,
            owner_color: owner_color.into(),
            troops,
        })
    }

    /// Creates a territory from raw setup input, filling blanks the way the
    /// setup screen does: an empty name becomes `T<index>` and an empty color
    /// becomes [`NEUTRAL_COLOR`].
    pub fn from_setup(
        index: usize,
        name: &str,
        owner_color: &str,
        troops: u32,
    ) -> Result<Self, TerritoryError> {
        let name = name.trim();
        let color = owner_color.trim();
        let name = if name.is_empty() {
            format!("T{}", index)
        } else {
            name.to_string()
        };
        let color = if color.is_empty() {
            NEUTRAL_COLOR.to_string()
        } else {
            color.to_string()
        };
        Territory::new(name, color, troops)
    }

    /// Returns true if this territory is held by `color`.
    pub fn is_owned_by(&self, color: &str) -> bool {
        self.owner_color == color
    }

    /// Removes up to `count` troops, never going below zero.
    /// Returns the number of troops actually removed.
    pub fn lose_troops(&mut self, count: u32) -> u32 {
        let lost = count.min(self.troops);
        self.troops -= lost;
        lost
    }
}
