use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_tree::{
    board::{column_label, Board, Cell},
    recorder::MoveRecorder,
    HEIGHT, WIDTH,
};

/// Draws the board with row numbers on the left and column letters below
pub fn draw_board(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    for (index, row) in board.rows().enumerate() {
        stdout.queue(PrintStyledContent(style(format!("{} ", HEIGHT - index))))?;
        for cell in row.iter() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match cell {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let labels: String = (0..WIDTH).map(column_label).collect();
    stdout.queue(PrintStyledContent(style(format!("  {}\n", labels))))?;
    stdout.flush()?;
    Ok(())
}

pub fn draw_history(recorder: &MoveRecorder) -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(PrintStyledContent(style(recorder.to_string())))?;
    stdout.flush()?;
    Ok(())
}
