//! A heuristic agent for playing the board game 'Connect 4'
//!
//! Instead of solving positions, this agent scores every candidate move
//! with cheap tile metrics and keeps a pruned lookahead tree that is carried
//! from turn to turn, so each move only pays for the newly exposed ply.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_tree::{board::{Board, Player}, config::Config, strategy::{self, Difficulty}, tree::Tree};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three discs stacked in column A
//! let board = Board::from_moves("AGAGA")?;
//! let tree = Tree::new(&board, Player::Two, Player::Two, &Config::default().with_depth(2))?;
//! let column = strategy::choose(Difficulty::Hard, &board, &tree, Player::Two)?;
//!
//! assert_eq!(column, 0);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod metrics;

pub mod tree;

pub mod strategy;

pub mod recorder;

pub mod config;

pub mod game;

pub mod logging;


pub use error::{Error, Result};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// columns are labelled with the letters A to G
const_assert!(WIDTH <= 7);
const_assert!(HEIGHT >= 4);
