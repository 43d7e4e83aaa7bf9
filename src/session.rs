//! Game session.
//!
//! Holds the board, the dice, the active combat rule and the player's
//! mission between player actions, and drives the interactive control
//! loop. All narration goes to the prompter's writer so a whole game can be
//! replayed against in-memory buffers.

use std::io::{BufRead, Write};

use crate::board::{Board, Territory, MAX_TERRITORIES, MIN_TERRITORIES};
use crate::combat::{resolve_attack, AttackError, AttackReport, CombatRule, Dice};
use crate::config::PlayMode;
use crate::console::{render_board, ConsoleError, MenuChoice, Prompter};
use crate::mission::{evaluate_mission, Mission, DEFAULT_PLAYER_COLOR};

/// Result of checking the player's mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionStatus {
    Accomplished,
    Pending,
    /// The session has no mission (skirmish play).
    Unassigned,
}

/// Why the control loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player chose to leave.
    Exited,
    /// The mission was accomplished.
    Victory,
    /// Input ran out before the player left.
    InputClosed,
}

/// Mutable state of one game between player actions.
pub struct Session<D> {
    board: Board,
    rule: CombatRule,
    mode: PlayMode,
    player_color: String,
    mission: Option<Mission>,
    dice: D,
}

impl<D: Dice> Session<D> {
    /// Creates a campaign session with no mission assigned yet.
    pub fn new(board: Board, rule: CombatRule, dice: D) -> Self {
        Session {
            board,
            rule,
            mode: PlayMode::Campaign,
            player_color: DEFAULT_PLAYER_COLOR.to_string(),
            mission: None,
            dice,
        }
    }

    pub fn with_mode(mut self, mode: PlayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_player_color(mut self, color: impl Into<String>) -> Self {
        self.player_color = color.into();
        self
    }

    /// Assigns the mission. Missions never change once a game starts.
    pub fn with_mission(mut self, mission: Mission) -> Self {
        self.mission = Some(mission);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rule(&self) -> CombatRule {
        self.rule
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn player_color(&self) -> &str {
        &self.player_color
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    /// Resolves one attack on the board using the session's rule and dice.
    pub fn attack(&mut self, attacker: usize, defender: usize) -> Result<AttackReport, AttackError> {
        let result = resolve_attack(&mut self.board, attacker, defender, self.rule, &mut self.dice);
        if let Err(e) = &result {
            log::warn!(
                "attack {} -> {} refused: {}",
                attacker.saturating_add(1),
                defender.saturating_add(1),
                e
            );
        }
        result
    }

    /// Checks the mission against the current board.
    pub fn check_mission(&self) -> MissionStatus {
        match &self.mission {
            Some(m) if evaluate_mission(m, &self.board) => MissionStatus::Accomplished,
            Some(_) => MissionStatus::Pending,
            None => MissionStatus::Unassigned,
        }
    }

    /// Runs the control loop for the session's play mode until the player
    /// leaves, wins, or input runs out.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<SessionEnd, ConsoleError> {
        let result = match self.mode {
            PlayMode::Campaign => self.run_campaign(prompter),
            PlayMode::Skirmish => self.run_skirmish(prompter),
        };
        match result {
            Err(ConsoleError::Closed) => {
                log::info!("input closed, ending session");
                Ok(SessionEnd::InputClosed)
            }
            other => other,
        }
    }

    fn run_campaign<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<SessionEnd, ConsoleError> {
        loop {
            render_board(&self.board, prompter.out())?;
            self.write_mission(prompter.out())?;
            write_menu(prompter.out())?;

            match prompter.read_menu()? {
                Some(MenuChoice::Attack) => self.attack_phase(prompter)?,
                Some(MenuChoice::CheckMission) => {
                    if self.check_mission() != MissionStatus::Accomplished {
                        writeln!(prompter.out(), "Mission not accomplished yet. Keep playing!")?;
                    }
                }
                Some(MenuChoice::Exit) => {
                    writeln!(prompter.out(), "Leaving the game...")?;
                    return Ok(SessionEnd::Exited);
                }
                None => writeln!(prompter.out(), "Invalid option!")?,
            }

            if self.check_mission() == MissionStatus::Accomplished {
                render_board(&self.board, prompter.out())?;
                writeln!(prompter.out(), "Congratulations! You accomplished your mission!")?;
                log::info!("mission accomplished: {}", self.mission_text());
                return Ok(SessionEnd::Victory);
            }
        }
    }

    fn run_skirmish<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<SessionEnd, ConsoleError> {
        loop {
            self.attack_phase(prompter)?;
            if !prompter.read_continue("\nAnother attack? (1 = yes, 0 = no): ")? {
                writeln!(prompter.out(), "Ending the game...")?;
                return Ok(SessionEnd::Exited);
            }
        }
    }

    /// Asks for an attacker and a defender, resolves the attack and shows
    /// the board afterwards. Refused attacks are reported and change nothing.
    fn attack_phase<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ConsoleError> {
        if self.mode == PlayMode::Skirmish {
            render_board(&self.board, prompter.out())?;
        }
        writeln!(prompter.out(), "\nChoose the territories for the attack.")?;
        let len = self.board.len();
        let attacker = prompter.read_index("Attacker ID", len)?;
        let defender = prompter.read_index("Defender ID", len)?;

        match self.attack(attacker, defender) {
            Ok(report) => writeln!(prompter.out(), "\n{}", report)?,
            Err(e) => writeln!(prompter.out(), "\n[!] {}", e)?,
        }
        render_board(&self.board, prompter.out())?;
        Ok(())
    }

    fn mission_text(&self) -> String {
        self.mission
            .as_ref()
            .map(Mission::describe)
            .unwrap_or_else(|| "No mission assigned.".to_string())
    }

    fn write_mission<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "\n=== Current Mission ({} army) ===", self.player_color)?;
        writeln!(out, "{}", self.mission_text())
    }
}

fn write_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n--- Main Menu ---")?;
    writeln!(out, "1 - Attack")?;
    writeln!(out, "2 - Check Mission")?;
    writeln!(out, "0 - Exit")
}

/// Registers territories interactively.
///
/// Prompts for the board size when `count` is not given, then for each
/// territory's name, color and starting troops. Prompted sizes outside
/// `MIN_TERRITORIES..=MAX_TERRITORIES` are asked again; a given `count` is
/// expected to be validated by the caller.
pub fn setup_board<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    count: Option<usize>,
) -> Result<Board, ConsoleError> {
    let count = match count {
        Some(n) => n,
        None => loop {
            let n = prompter.read_positive("How many territories do you want to register? ")? as usize;
            if (MIN_TERRITORIES..=MAX_TERRITORIES).contains(&n) {
                break n;
            }
            writeln!(
                prompter.out(),
                "A game needs between {} and {} territories.",
                MIN_TERRITORIES,
                MAX_TERRITORIES
            )?;
        },
    };

    writeln!(prompter.out(), "\n=== Territory Registration ===")?;
    let mut territories = Vec::new();
    for i in 0..count {
        writeln!(prompter.out(), "\nTerritory #{}", i + 1)?;
        let name = prompter.read_line("Name: ")?;
        let color = prompter.read_line("Army color: ")?;
        let territory = loop {
            let troops = prompter.read_positive("Troops: ")?;
            match Territory::from_setup(i, &name, &color, troops) {
                Ok(t) => break t,
                Err(e) => writeln!(prompter.out(), "{}", e)?,
            }
        };
        territories.push(territory);
    }
    log::info!("registered {} territories", territories.len());
    Ok(Board::new(territories))
}
