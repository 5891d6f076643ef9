//! Move selection at three difficulty levels
//!
//! Every level plays a winning move first, then blocks an immediate threat,
//! then answers a minor threat. Only the scoring of the remaining, quiet
//! moves differs:
//!
//! * `Easy` scores one-ply metrics computed straight from the board
//! * `Medium` scores the metrics cached on the tree's root children
//! * `Hard` weighs win options, pressure, safety and row parity, and plays
//!   the tree's move outright when advanced pruning left a single one

use log::debug;

use std::str::FromStr;

use crate::board::{Board, Player};
use crate::error::{Error, Result};
use crate::metrics::{generate_metrics_for_layer, TileMetrics};
use crate::tree::Tree;
use crate::HEIGHT;

/// Bonus for a move that leaves the opponent without a follow-up threat
pub const SAFETY_BONUS: i32 = 5;
/// Bonus for a move that sets up a winning cell on the mover's row parity
pub const PARITY_BONUS: i32 = 5;
/// Weight of each open window in the hard score
pub const WIN_OPTION_WEIGHT: i32 = 10;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "e" | "easy" => Ok(Difficulty::Easy),
            "m" | "medium" => Ok(Difficulty::Medium),
            "h" | "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidConfig("difficulty must be easy, medium or hard")),
        }
    }
}

/// A playable column together with its metrics for the side to move
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Candidate {
    pub column: usize,
    pub metrics: TileMetrics,
}

/// How quiet moves are compared once no critical move exists
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Scoring {
    /// most win options, then most pressure
    Options,
    /// `hard_score`, from the point of view of the first or second mover
    Weighted { moved_first: bool },
}

/// Whether a cell in `row` lies on the parity the player prefers: odd rows
/// counted from the bottom for the first mover, even rows for the second
pub fn prefers_row(row: usize, moved_first: bool) -> bool {
    ((HEIGHT - row) % 2 == 1) == moved_first
}

pub fn hard_score(metrics: &TileMetrics, moved_first: bool) -> i32 {
    let mut bonus = 0;
    if !metrics.enables_opponent_threat {
        bonus += SAFETY_BONUS;
    }
    if let Some(row) = metrics.preferred_winning_row {
        if prefers_row(row, moved_first) {
            bonus += PARITY_BONUS;
        }
    }
    metrics.win_options * WIN_OPTION_WEIGHT + metrics.pressure + bonus
}

/// A move that wins, blocks a win or answers a minor threat, in that priority
pub fn critical_candidate(candidates: &[Candidate]) -> Option<Candidate> {
    candidates
        .iter()
        .find(|c| c.metrics.winning_move)
        .or_else(|| candidates.iter().find(|c| c.metrics.immediate_threat))
        .or_else(|| candidates.iter().find(|c| c.metrics.minor_threat))
        .copied()
}

/// Picks the best candidate, the earliest one winning any tie
pub fn best_candidate(candidates: &[Candidate], scoring: Scoring) -> Option<Candidate> {
    if let Some(critical) = critical_candidate(candidates) {
        return Some(critical);
    }

    let mut best: Option<Candidate> = None;
    for &candidate in candidates.iter() {
        let better = match best {
            None => true,
            Some(current) => match scoring {
                Scoring::Options => {
                    (candidate.metrics.win_options, candidate.metrics.pressure)
                        > (current.metrics.win_options, current.metrics.pressure)
                }
                Scoring::Weighted { moved_first } => {
                    hard_score(&candidate.metrics, moved_first)
                        > hard_score(&current.metrics, moved_first)
                }
            },
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

fn board_candidates(board: &Board, player: Player) -> Vec<Candidate> {
    let layer = generate_metrics_for_layer(board, player);
    board
        .possible_moves()
        .into_iter()
        .map(|column| Candidate {
            column,
            metrics: layer[column],
        })
        .collect()
}

/// The root children of the tree as candidates, if the tree is waiting on `player`
fn tree_candidates(tree: &Tree, player: Player) -> Result<Option<Vec<Candidate>>> {
    let root = tree.root()?;
    if root.next_mover() != player || root.children().is_empty() {
        return Ok(None);
    }
    Ok(Some(
        root.children()
            .iter()
            .filter_map(|child| {
                child.column().map(|column| Candidate {
                    column,
                    metrics: *child.metrics(),
                })
            })
            .collect(),
    ))
}

pub fn pick_easy(board: &Board, player: Player) -> Result<usize> {
    if board.is_full() {
        return Err(Error::NoLegalMoves);
    }
    best_candidate(&board_candidates(board, player), Scoring::Options)
        .map(|c| c.column)
        .ok_or(Error::NoLegalMoves)
}

pub fn pick_medium(board: &Board, tree: &Tree, player: Player) -> Result<usize> {
    if board.is_full() {
        return Err(Error::NoLegalMoves);
    }
    match tree_candidates(tree, player)? {
        Some(candidates) => best_candidate(&candidates, Scoring::Options)
            .map(|c| c.column)
            .ok_or(Error::NoLegalMoves),
        None => {
            debug!("tree has no moves for {:?}, scoring the board directly", player);
            pick_easy(board, player)
        }
    }
}

pub fn pick_hard(board: &Board, tree: &Tree, player: Player) -> Result<usize> {
    if board.is_full() {
        return Err(Error::NoLegalMoves);
    }
    let scoring = Scoring::Weighted {
        moved_first: player == Player::One,
    };

    let candidates = match tree_candidates(tree, player)? {
        Some(candidates) => {
            // the tree already committed to one line
            if tree.advanced_pruning() && candidates.len() == 1 {
                return Ok(candidates[0].column);
            }
            candidates
        }
        None => {
            debug!("tree has no moves for {:?}, scoring the board directly", player);
            board_candidates(board, player)
        }
    };
    best_candidate(&candidates, scoring)
        .map(|c| c.column)
        .ok_or(Error::NoLegalMoves)
}

/// Picks a column for `player` at the given difficulty
pub fn choose(difficulty: Difficulty, board: &Board, tree: &Tree, player: Player) -> Result<usize> {
    match difficulty {
        Difficulty::Easy => pick_easy(board, player),
        Difficulty::Medium => pick_medium(board, tree, player),
        Difficulty::Hard => pick_hard(board, tree, player),
    }
}
