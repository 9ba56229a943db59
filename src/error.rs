//! Error types for the terminal collaborators.
//!
//! The simulation itself never fails; only talking to the terminal can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal too small: {cols}x{rows} cells (need at least {min_cols}x{min_rows})")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
