//! Heuristic signals for a single candidate move
//!
//! Every function here scores the playable cell of one column for one
//! player without searching any further than a reply or two. Cells that are
//! off the board or already occupied produce the miss value of the signal:
//! `-1` for the counts, `false` for the flags and `None` for the row.

use rayon::prelude::*;

use crate::board::{Board, Player, DIRECTIONS};
use crate::error::{Error, Result};
use crate::{HEIGHT, WIDTH};

/// The eight neighbours of a cell
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Heuristic summary of one candidate move
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TileMetrics {
    /// own discs reachable from the cell before an opponent disc blocks the way
    pub pressure: i32,
    /// open 4-windows through the cell, -1 when the column is full
    pub win_options: i32,
    /// the opponent would win by playing here
    pub immediate_threat: bool,
    /// the cell borders a pair of opponent discs sharing an open window with it
    pub minor_threat: bool,
    /// the mover wins by playing here
    pub winning_move: bool,
    /// row of an immediately playable cell that would complete an own three
    pub preferred_winning_row: Option<usize>,
    /// some opponent reply leaves the opponent with an immediate win
    pub enables_opponent_threat: bool,
}

impl TileMetrics {
    /// The value reported for full columns and unplayable cells
    pub const MISS: TileMetrics = TileMetrics {
        pressure: -1,
        win_options: -1,
        immediate_threat: false,
        minor_threat: false,
        winning_move: false,
        preferred_winning_row: None,
        enables_opponent_threat: false,
    };

    pub fn is_miss(&self) -> bool {
        self.pressure < 0
    }
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self {
            pressure: 0,
            win_options: 0,
            immediate_threat: false,
            minor_threat: false,
            winning_move: false,
            preferred_winning_row: None,
            enables_opponent_threat: false,
        }
    }
}

fn playable_cell(board: &Board, row: usize, column: usize) -> bool {
    row < HEIGHT && column < WIDTH && board.at(row, column).is_empty()
}

/// All on-board 4-windows along `direction` that contain (row, column)
fn windows(
    row: usize,
    column: usize,
    direction: (isize, isize),
) -> impl Iterator<Item = [(usize, usize); 4]> {
    (0..4).filter_map(move |offset: isize| {
        let mut window = [(0, 0); 4];
        for (k, slot) in window.iter_mut().enumerate() {
            *slot = Board::offset(row, column, direction, k as isize - offset)?;
        }
        Some(window)
    })
}

/// Counts own discs seen walking up to three steps each way along every axis
pub fn pressure(board: &Board, player: Player, row: usize, column: usize) -> i32 {
    if !playable_cell(board, row, column) {
        return -1;
    }
    let opponent = player.opponent();

    let mut sum = 0;
    for &(dr, dc) in DIRECTIONS.iter() {
        for &sign in [1, -1].iter() {
            for step in 1..4 {
                let (r, c) = match Board::offset(row, column, (dr * sign, dc * sign), step) {
                    Some(cell) => cell,
                    None => break,
                };
                let cell = board.at(r, c);
                if cell == player {
                    sum += 1;
                } else if cell == opponent {
                    // blocked
                    break;
                }
            }
        }
    }
    sum
}

/// Counts the 4-windows through the cell that the opponent has not spoiled
pub fn win_options(board: &Board, player: Player, row: usize, column: usize) -> i32 {
    if !playable_cell(board, row, column) {
        return -1;
    }
    let opponent = player.opponent();

    DIRECTIONS
        .iter()
        .flat_map(|&direction| windows(row, column, direction))
        .filter(|window| window.iter().all(|&(r, c)| board.at(r, c) != opponent))
        .count() as i32
}

/// Whether the opponent would complete four by taking this cell
pub fn immediate_threat(board: &Board, player: Player, row: usize, column: usize) -> bool {
    if !playable_cell(board, row, column) {
        return false;
    }
    let opponent = player.opponent();

    let mut copy = *board;
    copy.put(row, column, opponent.into());
    copy.check_win(opponent)
}

/// Whether the cell shares a window with exactly two opponent discs and
/// nothing of the player's own, while touching an opponent disc
pub fn minor_threat(board: &Board, player: Player, row: usize, column: usize) -> bool {
    if !playable_cell(board, row, column) {
        return false;
    }
    let opponent = player.opponent();

    let in_pattern = DIRECTIONS
        .iter()
        .flat_map(|&direction| windows(row, column, direction))
        .any(|window| {
            let mut opponents = 0;
            let mut empties = 0;
            for &(r, c) in window.iter() {
                let cell = board.at(r, c);
                if cell.is_empty() {
                    empties += 1;
                } else if cell == opponent {
                    opponents += 1;
                } else {
                    return false;
                }
            }
            opponents == 2 && empties == 2
        });
    if !in_pattern {
        return false;
    }

    NEIGHBOURS.iter().any(|&direction| {
        Board::offset(row, column, direction, 1)
            .map(|(r, c)| board.at(r, c) == opponent)
            .unwrap_or(false)
    })
}

/// Whether the player completes four by taking this cell
pub fn winning_move(board: &Board, player: Player, row: usize, column: usize) -> bool {
    if !playable_cell(board, row, column) {
        return false;
    }
    let mut copy = *board;
    copy.put(row, column, player.into());
    copy.check_win(player)
}

/// Finds the open cell of a three the player would build here, if that
/// cell could be played straight away
pub fn preferred_winning_row(
    board: &Board,
    player: Player,
    row: usize,
    column: usize,
) -> Option<usize> {
    if !playable_cell(board, row, column) {
        return None;
    }
    let mut copy = *board;
    copy.put(row, column, player.into());

    for &direction in DIRECTIONS.iter() {
        for window in windows(row, column, direction) {
            let own = window.iter().filter(|&&(r, c)| copy.at(r, c) == player).count();
            let open: Vec<_> = window
                .iter()
                .filter(|&&(r, c)| copy.at(r, c).is_empty())
                .collect();
            if own != 3 || open.len() != 1 {
                continue;
            }
            let (open_row, open_column) = *open[0];
            let supported =
                open_row == HEIGHT - 1 || !copy.at(open_row + 1, open_column).is_empty();
            if supported {
                return Some(open_row);
            }
        }
    }
    None
}

/// Whether some opponent reply to `mover` playing `column` leaves the
/// opponent with a cell that wins on the following move
pub fn enables_opponent_threat(board: &Board, column: usize, mover: Player) -> Result<bool> {
    if column >= WIDTH {
        return Err(Error::ColumnOutOfRange { column });
    }
    if !board.playable(column) {
        return Ok(false);
    }
    let opponent = mover.opponent();

    let mut scratch = *board;
    let mut after = scratch.simulate(column, mover)?;
    for reply in after.possible_moves() {
        let replied = after.simulate(reply, opponent)?;
        let threatened = replied.possible_moves().into_iter().any(|next| {
            replied
                .find_row(next)
                .map(|row| immediate_threat(&replied, mover, row, next))
                .unwrap_or(false)
        });
        if threatened {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Collects every signal for one cell
pub fn generate_metrics_for_tile(
    board: &Board,
    player: Player,
    row: usize,
    column: usize,
) -> TileMetrics {
    let pressure = pressure(board, player, row, column);
    if pressure < 0 {
        return TileMetrics::MISS;
    }

    TileMetrics {
        pressure,
        win_options: win_options(board, player, row, column),
        immediate_threat: immediate_threat(board, player, row, column),
        minor_threat: minor_threat(board, player, row, column),
        winning_move: winning_move(board, player, row, column),
        preferred_winning_row: preferred_winning_row(board, player, row, column),
        // the cell is playable, so this is the cell the column would fill
        enables_opponent_threat: enables_opponent_threat(board, column, player).unwrap_or(false),
    }
}

/// Metrics for the playable cell of a column
pub fn generate_metrics_for_column(
    board: &Board,
    player: Player,
    column: usize,
) -> Result<TileMetrics> {
    if column >= WIDTH {
        return Err(Error::ColumnOutOfRange { column });
    }
    Ok(match board.find_row(column) {
        Some(row) => generate_metrics_for_tile(board, player, row, column),
        None => TileMetrics::MISS,
    })
}

/// Metrics for every column's playable cell, `TileMetrics::MISS` for full columns
pub fn generate_metrics_for_layer(board: &Board, player: Player) -> [TileMetrics; WIDTH] {
    let scored: Vec<TileMetrics> = (0..WIDTH)
        .into_par_iter()
        .map(|column| match board.find_row(column) {
            Some(row) => generate_metrics_for_tile(board, player, row, column),
            None => TileMetrics::MISS,
        })
        .collect();

    let mut layer = [TileMetrics::MISS; WIDTH];
    layer.copy_from_slice(&scored);
    layer
}

