//! Errors reported by the board, the metrics and the tree

use thiserror::Error;

use crate::board::column_label;
use crate::{HEIGHT, WIDTH};

/// Everything that can go wrong in this crate
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid move, column {column} out of range. Columns must be below {}", WIDTH)]
    ColumnOutOfRange { column: usize },

    #[error("Invalid move, column {} full", label(.column))]
    ColumnFull { column: usize },

    #[error("Cell ({row}, {column}) is outside the {}x{} board", HEIGHT, WIDTH)]
    CellOutOfRange { row: usize, column: usize },

    #[error("could not parse '{0}' as a column, expected A-G")]
    InvalidColumnLabel(char),

    #[error("an empty cell has no opponent")]
    EmptyCell,

    #[error("the tree has no root")]
    Uninitialized,

    #[error("column {} was never explored from the current root", label(.column))]
    UnexploredMove { column: usize },

    #[error("no legal moves left, the game is drawn")]
    NoLegalMoves,

    #[error("the game is already over")]
    GameOver,

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

fn label(column: &usize) -> char {
    column_label(*column)
}

pub type Result<T> = std::result::Result<T, Error>;
