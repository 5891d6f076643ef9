use std::fmt;

use crate::board::{column_label, Player};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub player: Player,
    pub column: usize,
    /// 1-based position of the move in the game
    pub number: usize,
}

/// Append-only log of the moves played in a game
#[derive(Clone, Debug, Default)]
pub struct MoveRecorder {
    history: Vec<Move>,
}

impl MoveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move and returns its number
    pub fn record(&mut self, player: Player, column: usize) -> usize {
        let number = self.history.len() + 1;
        self.history.push(Move {
            player,
            column,
            number,
        });
        number
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last(&self) -> Option<&Move> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl fmt::Display for MoveRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in self.history.iter() {
            writeln!(
                f,
                "Move {}: Player {} -> {}",
                m.number,
                m.player.mark(),
                column_label(m.column)
            )?;
        }
        Ok(())
    }
}
