use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{
    ai,
    common::{BoardError, CellState, Side, TurnError},
    config::{GameConfig, BOARD_SIZE},
    opponent::Opponent,
    placement::deploy,
    resolver::{resolve, Resolution},
    ship::Ship,
    state::{GameState, Move},
    timer::{TimerTick, TurnTimer},
};

/// Where the game currently is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    PlayerTurn,
    AiTurn,
    GameOver,
}

/// Result of feeding one clock second into the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not the player's turn, or the timer is paused.
    Idle,
    /// The countdown advanced; this many seconds remain.
    Counting(u8),
    /// The countdown expired and a random move was played for the player.
    Forced(Resolution),
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameView {
    pub phase: Phase,
    /// Board cells. Mines read as EMPTY until the game is over.
    pub cells: [[CellState; BOARD_SIZE]; BOARD_SIZE],
    pub ships: Vec<Ship>,
    /// Mine coordinates; empty until the game is over.
    pub mines: Vec<(usize, usize)>,
    pub moves: Vec<Move>,
    pub player_score: usize,
    pub ai_score: usize,
    pub remaining_ships: usize,
    pub player_turn: bool,
    pub time_left: u8,
    pub paused: bool,
    pub winner: Option<Side>,
    pub ended_by_mine: bool,
    pub last_sunk_by_player: bool,
    pub last_sink: Option<(Side, &'static str)>,
}

/// Turn state machine for one game against the scripted opponent.
///
/// `Setup -> PlayerTurn -> (AiTurn <-> PlayerTurn) -> GameOver`. All state
/// changes go through [`resolve`]; every command here validates the phase
/// first and leaves the game untouched when it rejects.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    phase: Phase,
    timer: TurnTimer,
    winner: Option<Side>,
    ended_by_mine: bool,
    last_sink: Option<(Side, &'static str)>,
}

impl Game {
    /// A game in `Setup` with an empty board.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: GameState::new(),
            phase: Phase::Setup,
            timer: TurnTimer::new(config.timer_secs()),
            winner: None,
            ended_by_mine: false,
            last_sink: None,
        }
    }

    /// Deploy the fleet and mines on a fresh board and hand the first turn
    /// to the player.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        let paused = self.timer.is_paused();
        *self = Self::new(self.config);
        self.state = deploy(rng, &self.config)?;
        self.phase = Phase::PlayerTurn;
        self.state.player_turn = true;
        if paused {
            self.timer.pause();
        }
        self.timer.reset();
        Ok(())
    }

    /// Resume play from an already deployed `state`. The side to move is
    /// taken from `state.player_turn`. A state that is already decided (a
    /// triggered mine, or the whole fleet sunk) comes back as `GameOver`
    /// with the winner derived from the last move.
    pub fn from_state(config: GameConfig, state: GameState) -> Self {
        let mut game = Self::new(config);
        let last = state.moves.last().map(Move::side);
        if let Some((row, col)) = state.triggered_mine {
            let by = state
                .moves
                .iter()
                .rev()
                .find(|m| (m.row, m.col) == (row, col))
                .map(Move::side);
            game.phase = Phase::GameOver;
            game.winner = by.or(last).map(Side::opponent);
            game.ended_by_mine = true;
        } else if state.all_sunk() && state.ships.iter().any(|s| s.placement().is_some()) {
            game.phase = Phase::GameOver;
            game.winner = Some(if state.last_sunk_by_player {
                Side::Player
            } else {
                Side::Ai
            });
        } else if state.player_turn {
            game.phase = Phase::PlayerTurn;
            game.timer.reset();
        } else {
            game.phase = Phase::AiTurn;
        }
        if game.phase == Phase::GameOver {
            game.timer.cancel();
        }
        game.state = state;
        if game.is_over() {
            game.state.player_turn = false;
        }
        game
    }

    /// Drop the current game and return to `Setup` with `config`. The pause
    /// flag carries over.
    pub fn restart(&mut self, config: GameConfig) {
        let paused = self.timer.is_paused();
        *self = Self::new(config);
        if paused {
            self.timer.pause();
        }
    }

    /// Attack (`row`, `col`) on behalf of the player.
    pub fn submit_move(&mut self, row: usize, col: usize) -> Result<Resolution, TurnError> {
        match self.phase {
            Phase::Setup => return Err(TurnError::NotStarted),
            Phase::GameOver => return Err(TurnError::GameOver),
            Phase::AiTurn => return Err(TurnError::NotPlayerTurn),
            Phase::PlayerTurn => {}
        }
        if self.timer.is_paused() {
            return Err(TurnError::Paused);
        }
        if self.state.is_resolved(row, col)? {
            return Err(TurnError::AlreadyResolved { row, col });
        }
        self.play(row, col, Side::Player)
    }

    /// Let `opponent` pick and play the AI's attack.
    pub fn play_ai_turn(
        &mut self,
        opponent: &mut dyn Opponent,
        rng: &mut SmallRng,
    ) -> Result<Resolution, TurnError> {
        match self.phase {
            Phase::Setup => return Err(TurnError::NotStarted),
            Phase::GameOver => return Err(TurnError::GameOver),
            Phase::PlayerTurn => return Err(TurnError::NotAiTurn),
            Phase::AiTurn => {}
        }
        let (row, col) = opponent
            .select_target(rng, &self.state)
            .ok_or(TurnError::NoTargetsLeft)?;
        let res = self.play(row, col, Side::Ai)?;
        opponent.handle_result(&res);
        Ok(res)
    }

    /// Advance the turn timer by one second. When it runs out during the
    /// player's turn a random unresolved cell is attacked for the player.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Tick, TurnError> {
        if self.phase != Phase::PlayerTurn {
            return Ok(Tick::Idle);
        }
        match self.timer.tick() {
            TimerTick::Idle => Ok(Tick::Idle),
            TimerTick::Running(left) => Ok(Tick::Counting(left)),
            TimerTick::Expired => {
                let (row, col) = ai::pick_unresolved(rng, &self.state).ok_or(TurnError::NoTargetsLeft)?;
                Ok(Tick::Forced(self.play(row, col, Side::Player)?))
            }
        }
    }

    fn play(&mut self, row: usize, col: usize, by: Side) -> Result<Resolution, TurnError> {
        let res = resolve(&mut self.state, row, col, by)?;
        if let Some(name) = res.sunk {
            self.last_sink = Some((by, name));
        }
        if let Some(winner) = res.winner {
            self.phase = Phase::GameOver;
            self.winner = Some(winner);
            self.ended_by_mine = res.outcome == CellState::Mine;
            self.state.player_turn = false;
            self.timer.cancel();
            return Ok(res);
        }
        match by {
            Side::Player => {
                self.phase = Phase::AiTurn;
                self.state.player_turn = false;
                self.timer.cancel();
            }
            Side::Ai => {
                self.phase = Phase::PlayerTurn;
                self.state.player_turn = true;
                self.timer.reset();
            }
        }
        Ok(res)
    }

    /// Pause the turn timer. Ignored once the game is over.
    pub fn pause(&mut self) {
        if self.phase != Phase::GameOver {
            self.timer.pause();
        }
    }

    /// Resume the turn timer. Ignored once the game is over.
    pub fn resume(&mut self) {
        if self.phase != Phase::GameOver {
            self.timer.resume();
        }
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        if self.timer.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
        self.timer.is_paused()
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn ended_by_mine(&self) -> bool {
        self.ended_by_mine
    }

    pub fn time_left(&self) -> u8 {
        self.timer.remaining()
    }

    pub fn player_score(&self) -> usize {
        self.state.player_score()
    }

    pub fn ai_score(&self) -> usize {
        self.state.ai_score()
    }

    pub fn remaining_ships(&self) -> usize {
        self.state.remaining_ships()
    }

    /// Score of the winning side, or 0 without a winner.
    pub fn winner_score(&self) -> usize {
        self.winner.map_or(0, |side| self.state.score(side))
    }

    /// Build a read-only snapshot for renderers.
    pub fn view(&self) -> GameView {
        let over = self.is_over();
        let mut cells = *self.state.board.rows();
        if !over {
            for row in cells.iter_mut() {
                for cell in row.iter_mut() {
                    if *cell == CellState::Mine {
                        *cell = CellState::Empty;
                    }
                }
            }
        }
        GameView {
            phase: self.phase,
            cells,
            ships: self.state.ships.clone(),
            mines: if over { self.state.mines.clone() } else { Vec::new() },
            moves: self.state.moves.clone(),
            player_score: self.player_score(),
            ai_score: self.ai_score(),
            remaining_ships: self.remaining_ships(),
            player_turn: self.state.player_turn,
            time_left: self.time_left(),
            paused: self.is_paused(),
            winner: self.winner,
            ended_by_mine: self.ended_by_mine,
            last_sunk_by_player: self.state.last_sunk_by_player,
            last_sink: self.last_sink,
        }
    }
}
