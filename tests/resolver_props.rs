use naval_battle::{deploy, pick_unresolved, resolve, CellState, GameConfig, Side};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Play random attacks until someone wins, checking every transition.
    #[test]
    fn random_attacks_follow_transition_table(seed in any::<u64>(), mines in 1usize..=10) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = deploy(&mut rng, &GameConfig::new(mines, 7)).unwrap();
        let mut sink_events = vec![0usize; state.ships.len()];

        for _ in 0..100 {
            let (r, c) = pick_unresolved(&mut rng, &state).unwrap();
            let by = if rng.random::<bool>() { Side::Player } else { Side::Ai };
            let prior = state.board.get(r, c).unwrap();
            let sunk_before: Vec<bool> = state.ships.iter().map(|s| s.is_sunk()).collect();
            let moves_before = state.moves.len();

            let res = resolve(&mut state, r, c, by).unwrap();
            prop_assert_eq!(state.moves.len(), moves_before + 1);
            let last = *state.moves.last().unwrap();
            prop_assert_eq!((last.row, last.col, last.result), (r, c, res.outcome));
            prop_assert_eq!(last.is_player_move, by == Side::Player);

            match prior {
                CellState::Empty => {
                    prop_assert_eq!(res.outcome, CellState::Miss);
                    prop_assert_eq!(state.board.get(r, c).unwrap(), CellState::Miss);
                    prop_assert_eq!(res.sunk, None);
                    let sunk_after: Vec<bool> = state.ships.iter().map(|s| s.is_sunk()).collect();
                    prop_assert_eq!(&sunk_after, &sunk_before);
                }
                CellState::Ship => {
                    prop_assert_eq!(res.outcome, CellState::Hit);
                    prop_assert_eq!(state.board.get(r, c).unwrap(), CellState::Hit);
                }
                CellState::Mine => {
                    prop_assert_eq!(res.outcome, CellState::Mine);
                    prop_assert_eq!(res.winner, Some(by.opponent()));
                }
                other => prop_assert!(false, "picked resolved cell {:?}", other),
            }

            for (i, ship) in state.ships.iter().enumerate() {
                // sunk never reverts
                prop_assert!(!sunk_before[i] || ship.is_sunk());
                let hits = ship
                    .cells()
                    .filter(|&(sr, sc)| state.board.get(sr, sc).unwrap() == CellState::Hit)
                    .count();
                prop_assert_eq!(ship.is_sunk(), hits == ship.size());
                if !sunk_before[i] && ship.is_sunk() {
                    sink_events[i] += 1;
                    prop_assert_eq!(res.sunk, Some(ship.name()));
                    prop_assert_eq!(state.last_sunk_by_player, by == Side::Player);
                }
            }

            if let Some(winner) = res.winner {
                if res.outcome != CellState::Mine {
                    prop_assert!(state.all_sunk());
                    prop_assert_eq!(winner, by);
                }
                break;
            }
        }

        prop_assert!(sink_events.iter().all(|&n| n <= 1));
    }
}
