//! Console interaction.
//!
//! Menu parsing, the re-prompting input reader, and board rendering used by
//! the interactive session.

pub mod parser;
pub mod prompt;
pub mod render;

pub use parser::{parse_menu, parse_number, parse_yes_no, MenuChoice};
pub use prompt::{ConsoleError, Prompter};
pub use render::render_board;
