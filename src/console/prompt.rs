//! Re-prompting input reader.
//!
//! Wraps a line reader and a writer so every question is asked again until
//! the player gives a usable answer. End of input is reported as
//! [`ConsoleError::Closed`] so the session can shut down cleanly.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use super::parser::{parse_menu, parse_number, parse_yes_no, MenuChoice};

/// Errors that end console interaction.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("input closed")]
    Closed,

    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Asks questions on `out` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Prompter { input, out }
    }

    /// The writer answers and narration go to.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_out(self) -> W {
        self.out
    }

    /// Writes `msg` and reads one line, without the trailing newline.
    pub fn read_line(&mut self, msg: &str) -> Result<String, ConsoleError> {
        write!(self.out, "{}", msg)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(trimmed.to_string())
    }

    /// Asks until the player enters an integer greater than zero.
    pub fn read_positive(&mut self, msg: &str) -> Result<u32, ConsoleError> {
        loop {
            let line = self.read_line(msg)?;
            match parse_number(&line).and_then(|n| u32::try_from(n).ok()) {
                Some(n) if n > 0 => return Ok(n),
                _ => writeln!(self.out, "Invalid input. Enter a positive whole number.")?,
            }
        }
    }

    /// Asks for a territory ID shown as `1..=len` and returns it 0-based.
    pub fn read_index(&mut self, label: &str, len: usize) -> Result<usize, ConsoleError> {
        let msg = format!("{} (1-{}): ", label, len);
        loop {
            let line = self.read_line(&msg)?;
            match parse_number(&line).and_then(|n| usize::try_from(n).ok()) {
                Some(n) if (1..=len).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.out, "Invalid ID. Try again.")?,
            }
        }
    }

    /// Reads one menu selection. Unknown options yield `Ok(None)`.
    pub fn read_menu(&mut self) -> Result<Option<MenuChoice>, ConsoleError> {
        let line = self.read_line("Choose an option: ")?;
        Ok(parse_menu(&line))
    }

    /// Asks whether to keep going. Anything that is not a clear yes is a no.
    pub fn read_continue(&mut self, msg: &str) -> Result<bool, ConsoleError> {
        let line = self.read_line(msg)?;
        Ok(parse_yes_no(&line).unwrap_or(false))
    }
}
