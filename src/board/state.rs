//! Board state.
//!
//! The board is an ordered list of territories whose length is fixed once
//! setup finishes. Indices are stable for the lifetime of a game, so combat
//! and the console refer to territories by position.

use super::territory::Territory;

/// Smallest board on which an attack is possible.
pub const MIN_TERRITORIES: usize = 2;

/// Largest board a game may register.
pub const MAX_TERRITORIES: usize = 64;

/// Ordered collection of territories owned by a single game session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    territories: Vec<Territory>,
}

impl Board {
    /// Creates a board from already-registered territories.
    pub fn new(territories: Vec<Territory>) -> Self {
        Board { territories }
    }

    /// Number of territories on the board.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Returns the territory at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Territory> {
        self.territories.get(index)
    }

    /// All territories in board order.
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    /// Mutable access to two distinct territories at once.
    ///
    /// Returns `None` if either index is out of range or both are equal.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Territory, &mut Territory)> {
        if a == b || a >= self.len() || b >= self.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.territories.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.territories.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// Number of territories held by `color`.
    pub fn count_owned(&self, color: &str) -> usize {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(color))
            .count()
    }

    /// Sum of troops across every territory held by `color`.
    pub fn total_troops(&self, color: &str) -> u64 {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(color))
            .map(|t| u64::from(t.troops))
            .sum()
    }

    /// Distinct owner colors in first-seen board order.
    pub fn colors(&self) -> Vec<&str> {
        let mut colors: Vec<&str> = Vec::new();
        for t in &self.territories {
            if !colors.contains(&t.owner_color.as_str()) {
                colors.push(&t.owner_color);
            }
        }
        colors
    }
}
