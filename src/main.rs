use anyhow::Result;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_tree::{
    board::{column_label, parse_column, Player},
    config::Config,
    game::{Game, Outcome},
    logging,
    strategy::Difficulty,
};

mod display;
use display::*;

/// Asks a y/n question until it gets an answer
fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_difficulty(stdin: &Stdin) -> Result<Difficulty> {
    loop {
        let mut buffer = String::new();
        print!("Difficulty? easy/medium/hard (e/m/h): ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(difficulty),
            Err(err) => println!("{}", err),
        }
    }
}

fn ask_depth(stdin: &Stdin, default: usize) -> Result<usize> {
    loop {
        let mut buffer = String::new();
        print!("Lookahead depth in plies [{}]: ", default);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        let answer = buffer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(depth) => return Ok(depth),
            Err(_) => println!("Invalid number: {}", answer),
        }
    }
}

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let mut config = Config::default();
    config = config.with_difficulty(ask_difficulty(&stdin)?);
    config = config.with_depth(ask_depth(&stdin, config.depth)?);
    config = config.with_advanced_pruning(ask_yes_no(
        &stdin,
        "Should the computer only follow its best line?",
    )?);
    if ask_yes_no(&stdin, "Show search logging?")? {
        config = config.with_log_level(log::LevelFilter::Debug);
    }
    config.validate()?;
    logging::init(config.log_level)?;

    let computer = if ask_yes_no(&stdin, "Should the computer move first?")? {
        Player::One
    } else {
        Player::Two
    };

    let mut game = Game::new(config, computer)?;

    // game loop
    loop {
        draw_board(game.board())?;

        match game.outcome() {
            Outcome::Playing => {
                let next_move = if game.is_computer_turn() {
                    println!("Computer is thinking...");
                    let column = game.computer_move()?;
                    println!("Computer plays {}", column_label(column));
                    column
                } else {
                    print!("Move input (A-G, q to quit) > ");
                    stdout().flush().expect("Failed to flush to stdout!");
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    let input = input_str.trim();
                    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("exit") {
                        break;
                    }
                    match input.chars().next().map(parse_column) {
                        Some(Ok(column)) => column,
                        Some(Err(err)) => {
                            println!("{}", err);
                            continue;
                        }
                        None => continue,
                    }
                };

                if let Err(err) = game.play(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            Outcome::Won(player) => {
                let who = if player == game.computer() { "Computer" } else { "You" };
                println!("{} ({}) won!", who, player.mark());
                break;
            }
            Outcome::Draw => {
                println!("Draw!");
                break;
            }
        }
    }

    draw_history(game.recorder())?;
    println!("Game over!");
    Ok(())
}
