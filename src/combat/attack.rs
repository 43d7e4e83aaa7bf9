//! Attack resolution.
//!
//! Resolves a single attack between two territories on the board: validates
//! the attack, rolls one die for each side, compares the rolls under the
//! active [`CombatRule`], and applies the resulting troop and ownership
//! changes in place.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use super::dice::Dice;
use crate::board::Board;

/// Reasons an attack is refused. A refused attack never touches the board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttackError {
    #[error("territory {index} does not exist (board has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a territory cannot attack itself")]
    SelfAttack,

    #[error("cannot attack a territory of the same color ({color})")]
    SameOwner { color: String },

    #[error("'{name}' has no troops to attack with")]
    NoTroops { name: String },
}

/// How a pair of rolls translates into losses and conquest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CombatRule {
    /// A strictly higher attack roll conquers outright and moves half the
    /// attacking garrison (at least one) into the defender. Any other result
    /// costs the attacker one troop. Ties go to the defender.
    #[default]
    Conquest,
    /// An attack roll at least equal to the defense roll costs the defender
    /// one troop; the territory falls when its garrison reaches zero, and one
    /// attacking troop moves in. Ties go to the attacker.
    Attrition,
}

impl CombatRule {
    /// Returns the lowercase name used in configs and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            CombatRule::Conquest => "conquest",
            CombatRule::Attrition => "attrition",
        }
    }

    /// Returns true if this pair of rolls is a won round for the attacker.
    pub const fn attacker_wins(self, attack_roll: u8, defense_roll: u8) -> bool {
        match self {
            CombatRule::Conquest => attack_roll > defense_roll,
            CombatRule::Attrition => attack_roll >= defense_roll,
        }
    }
}

/// What happened to the two territories after the rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The defender changed hands and now holds `transferred` troops.
    Conquered { transferred: u32 },
    /// The defender lost a troop but held on.
    DefenderLostTroop,
    /// The defender held. The attacker lost `attacker_losses` troops.
    Repelled { attacker_losses: u32 },
}

/// Full record of a resolved attack, used for narration and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: String,
    pub defender: String,
    pub attack_roll: u8,
    pub defense_roll: u8,
    pub outcome: AttackOutcome,
}

impl AttackReport {
    /// Returns true if the defending territory changed owner.
    pub fn is_conquest(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Conquered { .. })
    }
}

impl fmt::Display for AttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} attacks {}! Attack die: {} / Defense die: {}",
            self.attacker, self.defender, self.attack_roll, self.defense_roll
        )?;
        match self.outcome {
            AttackOutcome::Conquered { transferred } => write!(
                f,
                "{} was conquered! {} troop(s) moved in.",
                self.defender, transferred
            ),
            AttackOutcome::DefenderLostTroop => {
                write!(f, "The attacker wins the round; {} lost 1 troop.", self.defender)
            }
            AttackOutcome::Repelled { attacker_losses } => write!(
                f,
                "The defender held! The attacker lost {} troop(s).",
                attacker_losses
            ),
        }
    }
}

/// Checks every precondition of an attack without rolling or mutating.
pub fn validate_attack(board: &Board, attacker: usize, defender: usize) -> Result<(), AttackError> {
    let len = board.len();
    let att = board
        .get(attacker)
        .ok_or(AttackError::IndexOutOfRange { index: attacker, len })?;
    let def = board
        .get(defender)
        .ok_or(AttackError::IndexOutOfRange { index: defender, len })?;

    if attacker == defender {
        return Err(AttackError::SelfAttack);
    }
    if att.owner_color == def.owner_color {
        return Err(AttackError::SameOwner {
            color: att.owner_color.clone(),
        });
    }
    if att.troops == 0 {
        return Err(AttackError::NoTroops {
            name: att.name.clone(),
        });
    }
    Ok(())
}

/// Resolves one attack from `attacker` against `defender`.
///
/// Dice are only rolled once every precondition holds, so a refused attack
/// consumes no rolls and leaves the board untouched.
pub fn resolve_attack<D: Dice + ?Sized>(
    board: &mut Board,
    attacker: usize,
    defender: usize,
    rule: CombatRule,
    dice: &mut D,
) -> Result<AttackReport, AttackError> {
    validate_attack(board, attacker, defender)?;
    let (att, def) = board
        .pair_mut(attacker, defender)
        .ok_or(AttackError::SelfAttack)?;

    let attack_roll = dice.roll();
    let defense_roll = dice.roll();
    log::debug!(
        "{} ({}) rolls {} vs {} ({}) rolls {}",
        att.name,
        att.owner_color,
        attack_roll,
        def.name,
        def.owner_color,
        defense_roll
    );

    let won = rule.attacker_wins(attack_roll, defense_roll);
    let outcome = match (rule, won) {
        (CombatRule::Conquest, true) => {
            let transferred = (att.troops / 2).max(1).min(att.troops);
            def.owner_color.clone_from(&att.owner_color);
            def.troops = transferred;
            att.troops -= transferred;
            AttackOutcome::Conquered { transferred }
        }
        (CombatRule::Conquest, false) => AttackOutcome::Repelled {
            attacker_losses: att.lose_troops(1),
        },
        (CombatRule::Attrition, true) => {
            def.lose_troops(1);
            if def.troops == 0 {
                def.owner_color.clone_from(&att.owner_color);
                def.troops = 1;
                att.lose_troops(1);
                AttackOutcome::Conquered { transferred: 1 }
            } else {
                AttackOutcome::DefenderLostTroop
            }
        }
        (CombatRule::Attrition, false) => AttackOutcome::Repelled { attacker_losses: 0 },
    };

    if let AttackOutcome::Conquered { transferred } = outcome {
        log::info!(
            "{} conquered by {} with {} troop(s)",
            def.name,
            def.owner_color,
            transferred
        );
    }

    Ok(AttackReport {
        attacker: att.name.clone(),
        defender: def.name.clone(),
        attack_roll,
        defense_roll,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Territory;
    use crate::combat::dice::{LoadedDice, RandomDice};

    fn two_sided() -> Board {
        Board::new(vec![
            Territory::new("A", "Red", 4).unwrap(),
            Territory::new("B", "Blue", 4).unwrap(),
        ])
    }

    #[test]
    fn conquest_high_roll_takes_territory() {
        let mut board = two_sided();
        let mut dice = LoadedDice::new([6, 1]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Conquest, &mut dice).unwrap();

        assert_eq!(report.outcome, AttackOutcome::Conquered { transferred: 2 });
        assert!(report.is_conquest());
        let b = board.get(1).unwrap();
        assert_eq!(b.owner_color, "Red");
        assert_eq!(b.troops, 2);
        assert_eq!(board.get(0).unwrap().troops, 2);
    }

    #[test]
    fn conquest_low_roll_costs_attacker_one() {
        let mut board = two_sided();
        let mut dice = LoadedDice::new([1, 6]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Conquest, &mut dice).unwrap();

        assert_eq!(report.outcome, AttackOutcome::Repelled { attacker_losses: 1 });
        let b = board.get(1).unwrap();
        assert_eq!(b.owner_color, "Blue");
        assert_eq!(b.troops, 4);
        assert_eq!(board.get(0).unwrap().troops, 3);
    }

    #[test]
    fn conquest_tie_favors_defender() {
        let mut board = two_sided();
        let mut dice = LoadedDice::new([4, 4]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Conquest, &mut dice).unwrap();
        assert!(!report.is_conquest());
        assert_eq!(board.get(1).unwrap().owner_color, "Blue");
        assert_eq!(board.get(0).unwrap().troops, 3);
    }

    #[test]
    fn conquest_single_troop_moves_whole_garrison() {
        let mut board = Board::new(vec![
            Territory::new("A", "Red", 1).unwrap(),
            Territory::new("B", "Blue", 5).unwrap(),
        ]);
        let mut dice = LoadedDice::new([5, 2]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Conquest, &mut dice).unwrap();
        assert_eq!(report.outcome, AttackOutcome::Conquered { transferred: 1 });
        assert_eq!(board.get(0).unwrap().troops, 0);
        assert_eq!(board.get(1).unwrap().troops, 1);
    }

    #[test]
    fn conquest_odd_garrison_rounds_down() {
        let mut board = Board::new(vec![
            Territory::new("A", "Red", 7).unwrap(),
            Territory::new("B", "Blue", 1).unwrap(),
        ]);
        let mut dice = LoadedDice::new([3, 2]);
        resolve_attack(&mut board, 0, 1, CombatRule::Conquest, &mut dice).unwrap();
        assert_eq!(board.get(0).unwrap().troops, 4);
        assert_eq!(board.get(1).unwrap().troops, 3);
    }

    #[test]
    fn attrition_tie_favors_attacker() {
        let mut board = two_sided();
        let mut dice = LoadedDice::new([3, 3]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Attrition, &mut dice).unwrap();
        assert_eq!(report.outcome, AttackOutcome::DefenderLostTroop);
        assert_eq!(board.get(1).unwrap().troops, 3);
        assert_eq!(board.get(1).unwrap().owner_color, "Blue");
        assert_eq!(board.get(0).unwrap().troops, 4);
    }

    #[test]
    fn attrition_loss_changes_nothing() {
        let mut board = two_sided();
        let before = board.clone();
        let mut dice = LoadedDice::new([2, 5]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Attrition, &mut dice).unwrap();
        assert_eq!(report.outcome, AttackOutcome::Repelled { attacker_losses: 0 });
        assert_eq!(board, before);
    }

    #[test]
    fn attrition_conquers_when_garrison_hits_zero() {
        let mut board = Board::new(vec![
            Territory::new("A", "Red", 3).unwrap(),
            Territory::new("B", "Blue", 1).unwrap(),
        ]);
        let mut dice = LoadedDice::new([6, 2]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Attrition, &mut dice).unwrap();
        assert_eq!(report.outcome, AttackOutcome::Conquered { transferred: 1 });
        let b = board.get(1).unwrap();
        assert_eq!(b.owner_color, "Red");
        assert_eq!(b.troops, 1);
        assert_eq!(board.get(0).unwrap().troops, 2);
    }

    #[test]
    fn refused_attacks_leave_board_unchanged() {
        let mut board = Board::new(vec![
            Territory::new("A", "Red", 4).unwrap(),
            Territory::new("B", "Red", 2).unwrap(),
            Territory::new("C", "Blue", 2).unwrap(),
        ]);
        // Drain A so it cannot attack.
        let mut empty = board.clone();
        let (a, _) = empty.pair_mut(0, 2).unwrap();
        a.troops = 0;

        let mut dice = LoadedDice::new([6, 1]);
        let before = board.clone();
        assert_eq!(
            resolve_attack(&mut board, 0, 0, CombatRule::Conquest, &mut dice),
            Err(AttackError::SelfAttack)
        );
        assert_eq!(
            resolve_attack(&mut board, 0, 1, CombatRule::Conquest, &mut dice),
            Err(AttackError::SameOwner {
                color: "Red".to_string()
            })
        );
        assert_eq!(
            resolve_attack(&mut board, 0, 3, CombatRule::Conquest, &mut dice),
            Err(AttackError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            resolve_attack(&mut board, 9, 0, CombatRule::Conquest, &mut dice),
            Err(AttackError::IndexOutOfRange { index: 9, len: 3 })
        );
        assert_eq!(board, before);

        let drained = empty.clone();
        assert_eq!(
            resolve_attack(&mut empty, 0, 2, CombatRule::Attrition, &mut dice),
            Err(AttackError::NoTroops {
                name: "A".to_string()
            })
        );
        assert_eq!(empty, drained);

        // No rolls were consumed by the refused attacks.
        assert_eq!(dice.roll(), 6);
    }

    #[test]
    fn troops_never_negative_under_random_play() {
        for rule in [CombatRule::Conquest, CombatRule::Attrition] {
            let mut board = Board::new(vec![
                Territory::new("A", "Red", 3).unwrap(),
                Territory::new("B", "Blue", 2).unwrap(),
                Territory::new("C", "Green", 1).unwrap(),
            ]);
            let mut dice = RandomDice::from_seed(99);
            for round in 0..500 {
                let a = round % 3;
                let d = (round + 1) % 3;
                let before = board.clone();
                match resolve_attack(&mut board, a, d, rule, &mut dice) {
                    Ok(report) => {
                        let conquered =
                            board.get(d).unwrap().owner_color != before.get(d).unwrap().owner_color;
                        assert_eq!(report.is_conquest(), conquered);
                    }
                    Err(_) => assert_eq!(board, before),
                }
            }
        }
    }

    #[test]
    fn ownership_changes_iff_condition_holds() {
        for a in 1..=6u8 {
            for d in 1..=6u8 {
                for rule in [CombatRule::Conquest, CombatRule::Attrition] {
                    let mut board = Board::new(vec![
                        Territory::new("A", "Red", 4).unwrap(),
                        Territory::new("B", "Blue", 1).unwrap(),
                    ]);
                    let mut dice = LoadedDice::new([a, d]);
                    resolve_attack(&mut board, 0, 1, rule, &mut dice).unwrap();
                    let flipped = board.get(1).unwrap().owner_color == "Red";
                    assert_eq!(flipped, rule.attacker_wins(a, d), "{:?} {} vs {}", rule, a, d);
                }
            }
        }
    }

    #[test]
    fn report_narration_mentions_rolls() {
        let mut board = two_sided();
        let mut dice = LoadedDice::new([6, 1]);
        let report = resolve_attack(&mut board, 0, 1, CombatRule::Conquest, &mut dice).unwrap();
        let text = report.to_string();
        assert!(text.contains("A attacks B"));
        assert!(text.contains("Attack die: 6"));
        assert!(text.contains("Defense die: 1"));
        assert!(text.contains("B was conquered"));
    }

    #[test]
    fn rule_names_and_deserialize() {
        assert_eq!(CombatRule::default(), CombatRule::Conquest);
        assert_eq!(CombatRule::Attrition.name(), "attrition");
        let rule: CombatRule = serde_json::from_str("\"attrition\"").unwrap();
        assert_eq!(rule, CombatRule::Attrition);
    }
}
