//! Combat resolution.
//!
//! Dice sources and the attack rules that turn a pair of rolls into troop
//! losses and changes of ownership.

pub mod attack;
pub mod dice;

pub use attack::{
    resolve_attack, validate_attack, AttackError, AttackOutcome, AttackReport, CombatRule,
};
pub use dice::{Dice, LoadedDice, RandomDice, DIE_FACES};
