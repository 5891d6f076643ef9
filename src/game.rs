//! A game against the computer: the real board, the lookahead tree that
//! follows it and the log of moves played

use log::{debug, info};

use crate::board::{column_label, Board, Player};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::recorder::MoveRecorder;
use crate::strategy;
use crate::tree::Tree;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Playing,
    Won(Player),
    Draw,
}

pub struct Game {
    board: Board,
    tree: Tree,
    recorder: MoveRecorder,
    config: Config,
    computer: Player,
    to_move: Player,
    outcome: Outcome,
}

impl Game {
    /// Starts an empty board with `Player::One` to move and the computer playing `computer`
    pub fn new(config: Config, computer: Player) -> Result<Self> {
        let board = Board::new();
        let tree = Tree::new(&board, Player::One, computer, &config)?;
        Ok(Self {
            board,
            tree,
            recorder: MoveRecorder::new(),
            config,
            computer,
            to_move: Player::One,
            outcome: Outcome::Playing,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn recorder(&self) -> &MoveRecorder {
        &self.recorder
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn computer(&self) -> Player {
        self.computer
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_computer_turn(&self) -> bool {
        self.outcome == Outcome::Playing && self.to_move == self.computer
    }

    /// Plays `column` for the side to move
    pub fn play(&mut self, column: usize) -> Result<Outcome> {
        if self.outcome != Outcome::Playing {
            return Err(Error::GameOver);
        }
        let player = self.to_move;
        let landing = self.board.drop(column, player)?;
        let number = self.recorder.record(player, column);
        debug!(
            "move {}: {:?} -> {}{}",
            number,
            player,
            column_label(column),
            crate::HEIGHT - landing.row
        );

        self.outcome = if landing.wins {
            Outcome::Won(player)
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            Outcome::Playing
        };

        if self.outcome == Outcome::Playing {
            self.tree.update_tree(&self.board, column)?;
            self.to_move = player.opponent();
        } else {
            info!("game over after {} moves: {:?}", number, self.outcome);
        }
        Ok(self.outcome)
    }

    /// The computer's choice for the current position
    pub fn computer_move(&self) -> Result<usize> {
        if self.outcome != Outcome::Playing {
            return Err(Error::GameOver);
        }
        strategy::choose(self.config.difficulty, &self.board, &self.tree, self.computer)
    }
}
