//! Board table rendering.

use std::io::{self, Write};

use crate::board::Board;

/// Writes the board as a table. IDs are shown 1-based.
pub fn render_board<W: Write>(board: &Board, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Current Map ===")?;
    writeln!(out, "{:<3} | {:<29} | {:<9} | {:<6}", "ID", "Name", "Color", "Troops")?;
    writeln!(out, "{}", "-".repeat(56))?;
    for (i, t) in board.territories().iter().enumerate() {
        writeln!(
            out,
            "{:<3} | {:<29} | {:<9} | {:<6}",
            i + 1,
            t.name,
            t.owner_color,
            t.troops
        )?;
    }
    Ok(())
}
