//! Conquista engine library.
//!
//! Exposes the board, combat resolution, missions, configuration and the
//! interactive session for use by integration tests and the binary entry
//! point.

pub mod board;
pub mod combat;
pub mod config;
pub mod console;
pub mod mission;
pub mod session;
