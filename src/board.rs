use std::ops::{Deref, DerefMut};

use crate::error::{Error, Result};
use crate::{HEIGHT, WIDTH};

/// Row/column steps for the four axes a line of four can lie on:
/// horizontal, vertical, diagonal and anti-diagonal
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// One of the two sides. `Player::One` always makes the first move.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Disc character used by the text renderers
    pub fn mark(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    /// The opponent of whoever occupies this cell, failing for `Cell::Empty`
    pub fn opponent(&self) -> Result<Player> {
        self.player()
            .map(Player::opponent)
            .ok_or(Error::EmptyCell)
    }

    pub fn mark(&self) -> char {
        self.player().map(Player::mark).unwrap_or('.')
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl PartialEq<Player> for Cell {
    fn eq(&self, other: &Player) -> bool {
        self.player() == Some(*other)
    }
}

/// Converts a column index into its board label, 'A' to 'G', or '?' when out of range
pub fn column_label(column: usize) -> char {
    if column < WIDTH {
        (b'A' + column as u8) as char
    } else {
        '?'
    }
}

/// Parses a case-insensitive column label
pub fn parse_column(label: char) -> Result<usize> {
    let upper = label.to_ascii_uppercase();
    match upper {
        'A'..='G' => Ok((upper as u8 - b'A') as usize),
        _ => Err(Error::InvalidColumnLabel(label)),
    }
}

/// Where a dropped disc came to rest
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Landing {
    pub row: usize,
    /// the drop completed four in a row for the player who made it
    pub wins: bool,
}

/// A 6x7 Connect 4 grid
///
/// Row 0 is the top of the board and row `HEIGHT - 1` the bottom, so a
/// column fills from the highest row index downwards.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    grid: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Builds a position from a string of column labels, e.g. "DDCE",
    /// alternating players and starting with `Player::One`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::One;

        for label in moves.as_ref().chars() {
            let column = parse_column(label)?;
            board.drop(column, player)?;
            player = player.opponent();
        }
        Ok(board)
    }

    pub fn in_board(row: isize, column: isize) -> bool {
        row >= 0 && row < HEIGHT as isize && column >= 0 && column < WIDTH as isize
    }

    /// Moves `steps` cells along `direction` from (row, column), if that stays on the board
    pub fn offset(
        row: usize,
        column: usize,
        (dr, dc): (isize, isize),
        steps: isize,
    ) -> Option<(usize, usize)> {
        let r = row as isize + dr * steps;
        let c = column as isize + dc * steps;
        if Self::in_board(r, c) {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<Cell> {
        self.grid
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .ok_or(Error::CellOutOfRange { row, column })
    }

    /// Cell lookup for coordinates already known to be on the board
    pub(crate) fn at(&self, row: usize, column: usize) -> Cell {
        self.grid[row][column]
    }

    /// Unchecked write for coordinates already known to be on the board
    pub(crate) fn put(&mut self, row: usize, column: usize, cell: Cell) {
        self.grid[row][column] = cell;
    }

    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) -> Result<()> {
        if row >= HEIGHT || column >= WIDTH {
            return Err(Error::CellOutOfRange { row, column });
        }
        self.grid[row][column] = cell;
        Ok(())
    }

    /// Explicit undo of a simulated disc
    pub fn clear(&mut self, row: usize, column: usize) -> Result<()> {
        self.set_cell(row, column, Cell::Empty)
    }

    /// Read access to the grid, top row first
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; WIDTH]> + '_ {
        self.grid.iter()
    }

    /// The lowest empty row of a column, or `None` if the column is full
    /// or does not exist
    pub fn find_row(&self, column: usize) -> Option<usize> {
        if column >= WIDTH {
            return None;
        }
        (0..HEIGHT).rev().find(|&row| self.grid[row][column].is_empty())
    }

    pub fn playable(&self, column: usize) -> bool {
        self.find_row(column).is_some()
    }

    /// Columns with room for another disc, in ascending order
    pub fn possible_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.grid[0].iter().all(|cell| !cell.is_empty())
    }

    fn landing_row(&self, column: usize) -> Result<usize> {
        if column >= WIDTH {
            return Err(Error::ColumnOutOfRange { column });
        }
        self.find_row(column).ok_or(Error::ColumnFull { column })
    }

    /// Drops a disc for `player` into `column`
    pub fn drop(&mut self, column: usize, player: Player) -> Result<Landing> {
        let row = self.landing_row(column)?;
        self.grid[row][column] = player.into();
        Ok(Landing {
            row,
            wins: self.check_win(player),
        })
    }

    /// Drops a disc that is taken back out again when the returned guard goes away
    pub fn simulate(&mut self, column: usize, player: Player) -> Result<Simulation<'_>> {
        let row = self.landing_row(column)?;
        self.grid[row][column] = player.into();
        Ok(Simulation {
            board: self,
            row,
            column,
        })
    }

    /// Whether `player` has four in a row anywhere on the board
    pub fn check_win(&self, player: Player) -> bool {
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                if self.grid[row][column] != player {
                    continue;
                }
                for &direction in DIRECTIONS.iter() {
                    let mut count = 1;
                    let mut steps = 1;
                    while let Some((r, c)) = Self::offset(row, column, direction, steps) {
                        if self.grid[r][c] != player {
                            break;
                        }
                        count += 1;
                        if count == 4 {
                            return true;
                        }
                        steps += 1;
                    }
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A disc placed on a board for the duration of a search step
///
/// Dereferences to the board with the disc in place; dropping the guard
/// empties the cell again, whichever way the enclosing scope is left.
pub struct Simulation<'a> {
    board: &'a mut Board,
    row: usize,
    column: usize,
}

impl Simulation<'_> {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Simulation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.grid[self.row][self.column] = Cell::Empty;
    }
}
