//! Console command parser.
//!
//! Turns raw lines typed by the player into structured choices that the
//! session loop can dispatch on.

/// A main-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1` — pick an attacker and a defender.
    Attack,
    /// `2` — check whether the mission is accomplished.
    CheckMission,
    /// `0` — leave the game.
    Exit,
}

/// Parses a main-menu line.
///
/// Returns `None` for empty lines and unknown options.
pub fn parse_menu(line: &str) -> Option<MenuChoice> {
    match parse_number(line)? {
        1 => Some(MenuChoice::Attack),
        2 => Some(MenuChoice::CheckMission),
        0 => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Parses an "another attack?" answer.
///
/// Accepts `1`/`0` as well as the usual yes and no words in English and
/// Portuguese. Returns `None` for anything else.
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "1" | "y" | "yes" | "s" | "sim" => Some(true),
        "0" | "n" | "no" | "nao" | "não" => Some(false),
        _ => None,
    }
}

/// Parses a single integer, ignoring surrounding whitespace.
pub fn parse_number(line: &str) -> Option<i64> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
