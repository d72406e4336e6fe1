use naval_battle::{
    place_ship, resolve, CellState, Game, GameConfig, GameState, Opponent, Orientation, Phase, Placement,
    RandomOpponent, Side, TurnError, FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Opponent that fires at a fixed list of cells in order.
struct Scripted(Vec<(usize, usize)>);

impl Opponent for Scripted {
    fn select_target(&mut self, _rng: &mut SmallRng, _state: &GameState) -> Option<(usize, usize)> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }
}

/// Standard fleet laid out on even rows from column 0, one mine at (5, 5).
fn laid_out_state() -> GameState {
    let mut state = GameState::new();
    for (i, ship) in state.ships.iter_mut().enumerate() {
        place_ship(&mut state.board, ship, Placement::new(i * 2, 0, Orientation::Horizontal)).unwrap();
    }
    state.board.set(5, 5, CellState::Mine).unwrap();
    state.mines.push((5, 5));
    state
}

/// Water cells on row 9, for a harmless AI script.
fn water() -> Vec<(usize, usize)> {
    (0..10).map(|c| (9, c)).chain((0..10).map(|c| (7, c))).collect()
}

#[test]
fn test_new_game_starts_in_setup() {
    let mut game = Game::new(GameConfig::default());
    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.submit_move(0, 0).unwrap_err(), TurnError::NotStarted);

    let mut rng = SmallRng::seed_from_u64(1);
    game.start(&mut rng).unwrap();
    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert!(game.state().player_turn);
    assert_eq!(game.time_left(), 7);
    assert_eq!(game.remaining_ships(), FLEET.len());
}

#[test]
fn test_turns_alternate() {
    let mut game = Game::from_state(GameConfig::new(1, 5), laid_out_state());
    let mut ai = Scripted(water());
    let mut rng = SmallRng::seed_from_u64(2);

    let res = game.submit_move(0, 0).unwrap();
    assert_eq!(res.outcome, CellState::Hit);
    assert_eq!(game.phase(), Phase::AiTurn);
    assert!(!game.state().player_turn);
    assert_eq!(game.submit_move(0, 1).unwrap_err(), TurnError::NotPlayerTurn);

    let res = game.play_ai_turn(&mut ai, &mut rng).unwrap();
    assert_eq!((res.row, res.col, res.outcome), (9, 0, CellState::Miss));
    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert_eq!(
        game.play_ai_turn(&mut ai, &mut rng).unwrap_err(),
        TurnError::NotAiTurn
    );
    assert_eq!(game.player_score(), 1);
    assert_eq!(game.ai_score(), 0);
}

#[test]
fn test_resolved_cell_is_rejected_without_mutation() {
    let mut game = Game::from_state(GameConfig::new(1, 5), laid_out_state());
    let mut ai = Scripted(water());
    let mut rng = SmallRng::seed_from_u64(3);

    game.submit_move(3, 3).unwrap();
    game.play_ai_turn(&mut ai, &mut rng).unwrap();
    let before = game.state().clone();

    assert_eq!(
        game.submit_move(3, 3).unwrap_err(),
        TurnError::AlreadyResolved { row: 3, col: 3 }
    );
    assert_eq!(
        game.submit_move(9, 0).unwrap_err(),
        TurnError::AlreadyResolved { row: 9, col: 0 }
    );
    assert!(matches!(game.submit_move(10, 0).unwrap_err(), TurnError::Board(_)));
    assert_eq!(game.state(), &before);
    assert_eq!(game.phase(), Phase::PlayerTurn);
}

#[test]
fn test_paused_game_rejects_moves() {
    let mut game = Game::from_state(GameConfig::new(1, 5), laid_out_state());
    game.pause();
    assert!(game.is_paused());
    assert_eq!(game.submit_move(1, 1).unwrap_err(), TurnError::Paused);
    assert!(game.state().moves.is_empty());
    assert!(!game.toggle_pause());
    assert!(game.submit_move(1, 1).is_ok());
}

#[test]
fn test_ai_mine_hands_win_to_player() {
    let mut state = laid_out_state();
    state.player_turn = false;
    let mut game = Game::from_state(GameConfig::new(1, 7), state);
    assert_eq!(game.phase(), Phase::AiTurn);

    let mut ai = Scripted(vec![(5, 5)]);
    let mut rng = SmallRng::seed_from_u64(4);
    let res = game.play_ai_turn(&mut ai, &mut rng).unwrap();

    assert_eq!(res.outcome, CellState::Mine);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(Side::Player));
    assert!(game.ended_by_mine());
    assert_eq!(game.remaining_ships(), 5);
    assert_eq!(game.winner_score(), 0);
    assert_eq!(game.submit_move(1, 1).unwrap_err(), TurnError::GameOver);
}

#[test]
fn test_player_mine_hands_win_to_ai() {
    let mut game = Game::from_state(GameConfig::new(1, 7), laid_out_state());
    let res = game.submit_move(5, 5).unwrap();
    assert_eq!(res.winner, Some(Side::Ai));
    assert_eq!(game.winner(), Some(Side::Ai));
    assert!(game.ended_by_mine());
    assert_eq!(game.state().moves.len(), 1);
    assert!(game.state().moves[0].is_player_move);
}

#[test]
fn test_player_sinks_whole_fleet() {
    let mut game = Game::from_state(GameConfig::new(1, 7), laid_out_state());
    let mut ai = Scripted(water());
    let mut rng = SmallRng::seed_from_u64(5);

    let targets: Vec<(usize, usize)> = FLEET
        .iter()
        .enumerate()
        .flat_map(|(i, def)| (0..def.length()).map(move |c| (i * 2, c)))
        .collect();
    let mut sinks = Vec::new();
    for (n, &(r, c)) in targets.iter().enumerate() {
        let res = game.submit_move(r, c).unwrap();
        if let Some(name) = res.sunk {
            sinks.push(name);
        }
        if n + 1 < targets.len() {
            assert_eq!(res.winner, None);
            game.play_ai_turn(&mut ai, &mut rng).unwrap();
        } else {
            assert_eq!(res.winner, Some(Side::Player));
        }
    }

    assert_eq!(
        sinks,
        vec!["Aircraft Carrier", "Battleship", "Cruiser", "Submarine", "Destroyer"]
    );
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(Side::Player));
    assert!(!game.ended_by_mine());
    assert!(game.state().last_sunk_by_player);
    assert_eq!(game.player_score(), 17);
    assert_eq!(game.winner_score(), 17);
    assert_eq!(game.remaining_ships(), 0);
}

#[test]
fn test_view_hides_mines_until_game_over() {
    let mut game = Game::from_state(GameConfig::new(1, 7), laid_out_state());
    let view = game.view();
    assert_eq!(view.cells[5][5], CellState::Empty);
    assert!(view.mines.is_empty());
    assert_eq!(view.time_left, 7);

    game.submit_move(5, 5).unwrap();
    let view = game.view();
    assert_eq!(view.cells[5][5], CellState::Mine);
    assert_eq!(view.mines, vec![(5, 5)]);
    assert_eq!(view.winner, Some(Side::Ai));
    assert_eq!(view.phase, Phase::GameOver);
}

#[test]
fn test_restart_returns_to_setup_with_new_config() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut game = Game::new(GameConfig::default());
    game.start(&mut rng).unwrap();
    let mut ai = RandomOpponent::new();
    while !game.is_over() {
        if game.phase() == Phase::PlayerTurn {
            let (r, c) = naval_battle::pick_unresolved(&mut rng, game.state()).unwrap();
            game.submit_move(r, c).unwrap();
        } else {
            game.play_ai_turn(&mut ai, &mut rng).unwrap();
        }
    }
    assert!(game.winner().is_some());

    game.restart(GameConfig::new(10, 3));
    assert_eq!(game.phase(), Phase::Setup);
    assert!(game.state().board.is_clear());
    assert!(game.winner().is_none());

    game.start(&mut rng).unwrap();
    assert_eq!(game.state().mines.len(), 10);
    assert_eq!(game.time_left(), 3);
    assert!(game.state().moves.is_empty());
}

#[test]
fn test_random_games_always_have_one_winner() {
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Game::new(GameConfig::new((seed % 10) as usize + 1, 7));
        game.start(&mut rng).unwrap();
        let mut ai = RandomOpponent::new();
        let mut turns = 0;
        while !game.is_over() {
            turns += 1;
            assert!(turns <= 100, "game took too many turns");
            match game.phase() {
                Phase::PlayerTurn => {
                    let (r, c) = naval_battle::pick_unresolved(&mut rng, game.state()).unwrap();
                    game.submit_move(r, c).unwrap();
                }
                Phase::AiTurn => {
                    game.play_ai_turn(&mut ai, &mut rng).unwrap();
                }
                other => panic!("unexpected phase {:?}", other),
            }
        }
        let winner = game.winner().expect("finished game has a winner");
        if !game.ended_by_mine() {
            assert_eq!(game.remaining_ships(), 0);
            let last = game.state().moves.last().unwrap();
            assert_eq!(last.side(), winner);
        }
    }
}

#[test]
fn test_decided_state_resumes_as_game_over() {
    let mut state = laid_out_state();
    resolve(&mut state, 5, 5, Side::Player).unwrap();
    let mut game = Game::from_state(GameConfig::new(1, 7), state);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(Side::Ai));
    assert!(game.ended_by_mine());
    assert_eq!(game.submit_move(0, 0).unwrap_err(), TurnError::GameOver);

    let mut state = laid_out_state();
    let cells: Vec<(usize, usize)> = state.ships.iter().flat_map(|s| s.cells()).collect();
    for (r, c) in cells {
        resolve(&mut state, r, c, Side::Player).unwrap();
    }
    assert!(state.all_sunk());
    let mut game = Game::from_state(GameConfig::new(1, 7), state);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(Side::Player));
    assert!(!game.ended_by_mine());
    assert!(!game.state().player_turn);
    assert_eq!(game.submit_move(9, 9).unwrap_err(), TurnError::GameOver);
}

#[test]
fn test_restart_keeps_pause_flag() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut game = Game::new(GameConfig::default());
    game.start(&mut rng).unwrap();
    game.pause();
    game.restart(GameConfig::new(2, 4));
    game.start(&mut rng).unwrap();
    assert!(game.is_paused());
    assert_eq!(game.submit_move(0, 0).unwrap_err(), TurnError::Paused);
}
