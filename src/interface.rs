#![cfg(feature = "std")]

//! Terminal rendering and input parsing for the interactive game.

use std::string::{String, ToString};

use crate::controller::Snapshot;
use crate::core::{CellState, GameConfig, Phase, Side, BOARD_SIZE};

/// What the player typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Fire(usize, usize),
    Pause,
    Resume,
    Restart,
    Quit,
    Help,
}

pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    std::format!("{}{}", col, r + 1)
}

/// Parse a target such as `A5` or `j10` into (row, col).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let mut chars = input.chars();
    let letter = match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() => ch.to_ascii_uppercase(),
        Some(ch) => return Err(std::format!("'{}' is not a column, use A-J", ch)),
        None => return Err("Enter a target such as A5".to_string()),
    };
    let col = (letter as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(std::format!("Column {} is off the board, use A-J", letter));
    }
    let digits = chars.as_str();
    match digits.parse::<usize>() {
        Ok(row) if (1..=BOARD_SIZE).contains(&row) => Ok((row - 1, col)),
        Ok(_) => Err(std::format!("Row {} is off the board, use 1-{}", digits, BOARD_SIZE)),
        Err(_) => Err(std::format!("Bad row '{}', use 1-{}", digits, BOARD_SIZE)),
    }
}

/// Parse one line of player input.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "pause" | "p" => Ok(Input::Pause),
        "resume" | "r" => Ok(Input::Resume),
        "restart" => Ok(Input::Restart),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        "help" | "?" => Ok(Input::Help),
        _ => parse_coord(trimmed).map(|(r, c)| Input::Fire(r, c)),
    }
}

fn cell_char(state: CellState, reveal: bool) -> char {
    match state {
        CellState::Hit => 'X',
        CellState::Miss => 'o',
        CellState::Mine if reveal => '*',
        CellState::Ship if reveal => 'S',
        _ => '.',
    }
}

/// Render the board. Ships and mines are only drawn when `reveal` is set.
pub fn render_board(snapshot: &Snapshot, reveal: bool) -> String {
    let view = &snapshot.view;
    let mut out = String::new();
    out.push_str("    ╔═══════════════════════╗\n");
    out.push_str("    ║  ");
    for c in 0..BOARD_SIZE {
        out.push(' ');
        out.push((b'A' + c as u8) as char);
    }
    out.push_str(" ║\n");
    out.push_str("    ╠═══════════════════════╣\n");
    for (r, row) in view.cells.iter().enumerate() {
        out.push_str(&std::format!("    ║ {:2}", r + 1));
        for &cell in row.iter() {
            out.push(' ');
            out.push(cell_char(cell, reveal));
        }
        out.push_str(" ║\n");
    }
    out.push_str("    ╚═══════════════════════╝\n");
    if reveal {
        out.push_str("    Legend: S=Ship  *=Mine  X=Hit  o=Miss  .=Water\n");
    } else {
        out.push_str("    Legend: X=Hit  o=Miss  .=Unknown\n");
    }
    out
}

/// Scores, timer and ship list under the board.
pub fn render_status(snapshot: &Snapshot) -> String {
    let view = &snapshot.view;
    let mut out = String::new();
    out.push_str(&std::format!(
        "    Player: {}   AI: {}   Ships left: {}\n",
        view.player_score, view.ai_score, view.remaining_ships
    ));
    match view.phase {
        Phase::PlayerTurn => {
            let timer = if view.paused {
                "paused".to_string()
            } else {
                std::format!("{}s", view.time_left)
            };
            out.push_str(&std::format!("    Your turn ({})\n", timer));
        }
        Phase::AiTurn => out.push_str("    AI is thinking...\n"),
        Phase::Setup => out.push_str("    Setting up...\n"),
        Phase::GameOver => out.push_str(&std::format!("    {}\n", game_over_message(snapshot))),
    }
    if let Some((side, name)) = view.last_sink {
        out.push_str(&std::format!("    Last sink: {} by {}\n", name, side.label()));
    }
    out.push_str("\n    Ships:\n");
    for ship in view.ships.iter() {
        let status = if ship.is_sunk() { "SUNK" } else { "Active" };
        out.push_str(&std::format!("      {} ({}): {}\n", ship.name(), ship.size(), status));
    }
    if let Some(advisory) = &snapshot.advisory {
        out.push_str(&std::format!("\n    {}\n", advisory));
    }
    out
}

pub fn game_over_message(snapshot: &Snapshot) -> String {
    let view = &snapshot.view;
    match (view.winner, view.ended_by_mine) {
        (Some(Side::Player), true) => std::format!(
            "The AI triggered a mine! You win with {} points!",
            view.player_score
        ),
        (Some(Side::Ai), true) => std::format!(
            "Oh no! You hit a mine and lost the battle. The AI wins with {} points!",
            view.ai_score
        ),
        (Some(Side::Player), false) => std::format!(
            "Congratulations! You sank the last enemy ship with {} points!",
            view.player_score
        ),
        (Some(Side::Ai), false) => std::format!(
            "The AI has prevailed, sinking the last ship with {} points!",
            view.ai_score
        ),
        (None, _) => "Game over.".to_string(),
    }
}

pub fn help_text(config: &GameConfig) -> String {
    std::format!(
        "Fire with a coordinate like B7 (columns A-J, rows 1-10). You have {}s per turn;\n\
         when it runs out a random cell is fired for you. There are {} mines: hit one and you lose.\n\
         Commands: pause, resume, restart, quit, help",
        config.timer_secs(),
        config.mines()
    )
}
