//! Rules engine behavior through the public API.
//!
//! Covers setup, legal moves, captures and safe cells, exact rolls, winning,
//! extra turns and forfeits, the gifted-dice hand-off, and replay determinism.

use std::sync::Arc;

use proptest::prelude::*;

use ludo_engine::ai::{seat_strategies, step, RandomStrategy};
use ludo_engine::core::HOME_STRETCH_LENGTH;
use ludo_engine::{
    BoardLayout, Cell, GameConfig, GameEngine, GamePhase, GameRng, GameState, MoveStrategy,
    PathCalculator, PlayerColor, Token,
};

fn engine(config: GameConfig) -> GameEngine {
    GameEngine::new(Arc::new(BoardLayout::standard()), config).unwrap()
}

fn track(index: usize) -> Cell {
    BoardLayout::standard().track_cell(index)
}

fn set_cells(state: &mut GameState, seat: usize, cells: [Cell; 4]) {
    let player = state.players[seat].clone().with_cells(cells);
    state.players[seat] = player;
}

fn base(color: PlayerColor) -> Cell {
    Cell::Base(color)
}

// =============================================================================
// Setup and legal moves
// =============================================================================

/// Every table size starts with all tokens in base and the first seat to roll.
#[test]
fn test_initial_state_for_all_table_sizes() {
    for n in 2..=4 {
        let engine = engine(GameConfig::with_players(n));
        let state = engine.create_initial_state();

        assert_eq!(state.player_count(), n);
        assert!(state.players.iter().all(|p| p.tokens.len() == 4));
        assert!(state.all_tokens().all(|t| t.cell == Cell::Base(t.color)));
        assert_eq!(state.phase, GamePhase::WaitingForRoll);
        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.winner, None);
    }
}

/// Without a die there is nothing to move.
#[test]
fn test_no_dice_no_legal_moves() {
    let engine = engine(GameConfig::with_players(4));
    let mut state = engine.create_initial_state();
    assert!(engine.legal_moves(&state).is_empty());

    set_cells(&mut state, 0, [track(4), track(20), base(PlayerColor::Red), base(PlayerColor::Red)]);
    state.phase = GamePhase::WaitingForMove;
    assert!(engine.legal_moves(&state).is_empty());
}

/// A six from an all-base position can only reach the color's entry cell.
#[test]
fn test_six_from_base_has_single_destination() {
    let engine = engine(GameConfig::with_players(4));
    let layout = BoardLayout::standard();
    for seat in 0..4 {
        let mut state = engine.create_initial_state();
        state.current_player_index = seat;
        let color = state.current_color();

        let state = engine.apply_dice_value(&state, 6);
        let moves = engine.legal_moves(&state);
        assert_eq!(moves.len(), 4);
        let entry = layout.track_cell(layout.start_position(color));
        assert!(moves.iter().all(|m| m.destination == entry));
        assert!(moves.iter().all(|m| m.captures.is_empty()));
    }
}

// =============================================================================
// Captures and safe cells
// =============================================================================

/// Landing on an opponent on a plain cell sends it home and earns a roll.
#[test]
fn test_capture_on_plain_cell() {
    let engine = engine(GameConfig::default());
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 0, [track(3), base(PlayerColor::Red), base(PlayerColor::Red), base(PlayerColor::Red)]);
    set_cells(&mut state, 1, [track(7), base(PlayerColor::Green), base(PlayerColor::Green), base(PlayerColor::Green)]);

    let state = engine.apply_dice_value(&state, 4);
    assert_eq!(state.phase, GamePhase::WaitingForMove);
    let moves = engine.legal_moves(&state);
    assert_eq!(moves.len(), 1);
    let victim = state.token(PlayerColor::Green, 0).unwrap();
    assert!(moves[0].captures_piece(&victim));

    let next = engine.execute_move(&state, &moves[0]);
    assert_eq!(next.token(PlayerColor::Green, 0).unwrap().cell, base(PlayerColor::Green));
    assert_eq!(next.token(PlayerColor::Red, 0).unwrap().cell, track(7));
    assert_eq!(next.current_player_index, 0);
    assert_eq!(next.phase, GamePhase::WaitingForRoll);
    assert!(next.check_invariants().is_ok());
}

/// Safe cells protect opponents unless safe zones are switched off.
#[test]
fn test_safe_cell_blocks_capture() {
    let setup = |config: GameConfig| {
        let engine = engine(config);
        let mut state = engine.create_initial_state();
        set_cells(&mut state, 0, [track(10), base(PlayerColor::Red), base(PlayerColor::Red), base(PlayerColor::Red)]);
        set_cells(&mut state, 1, [track(13), base(PlayerColor::Green), base(PlayerColor::Green), base(PlayerColor::Green)]);
        let state = engine.apply_dice_value(&state, 3);
        let moves = engine.legal_moves(&state);
        (engine, state, moves)
    };

    let (engine, state, moves) = setup(GameConfig::default());
    assert_eq!(moves.len(), 1);
    assert!(moves[0].captures.is_empty());
    let next = engine.execute_move(&state, &moves[0]);
    assert_eq!(next.token(PlayerColor::Green, 0).unwrap().cell, track(13));
    assert_eq!(next.current_player_index, 1);

    let (_, _, moves) = setup(GameConfig::default().with_safe_zones(false));
    assert_eq!(moves[0].captures.len(), 1);
}

/// Own tokens stack instead of capturing each other.
#[test]
fn test_own_tokens_stack() {
    let engine = engine(GameConfig::default());
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 0, [track(3), track(5), base(PlayerColor::Red), base(PlayerColor::Red)]);

    let state = engine.apply_dice_value(&state, 2);
    let mv = engine
        .legal_moves(&state)
        .into_iter()
        .find(|m| m.token.id == 0)
        .unwrap();
    assert!(mv.captures.is_empty());

    let next = engine.execute_move(&state, &mv);
    assert_eq!(next.token(PlayerColor::Red, 0).unwrap().cell, track(5));
    assert_eq!(next.token(PlayerColor::Red, 1).unwrap().cell, track(5));
}

/// Walking forward and then back from a captured cell ends at base.
#[test]
fn test_path_then_reverse_path_reaches_base() {
    let paths = PathCalculator::new(Arc::new(BoardLayout::standard()));
    let mover = Token::new(0, PlayerColor::Blue, track(45));
    let destination = paths.calculate_destination(&mover, 5).unwrap();
    let walked = paths.calculate_path(&mover, destination);
    assert_eq!(walked.len(), 5);
    assert_eq!(walked.last(), Some(&destination));

    let captured = Token::new(2, PlayerColor::Yellow, destination);
    let reverse = paths.calculate_reverse_path(&captured);
    assert_eq!(reverse.last(), Some(&Cell::Base(PlayerColor::Yellow)));
    assert_eq!(reverse.len(), paths.path_index(&captured).unwrap());
}

// =============================================================================
// Exact roll and winning
// =============================================================================

/// From the last home-stretch cell, 1 reaches home and 2 overshoots.
#[test]
fn test_exact_roll_for_every_color() {
    let paths = PathCalculator::new(Arc::new(BoardLayout::standard()));
    let last = (HOME_STRETCH_LENGTH - 1) as u8;
    for color in PlayerColor::ALL {
        let token = Token::new(0, color, Cell::HomeStretch { color, index: last });
        assert_eq!(paths.calculate_destination(&token, 1), Some(Cell::Home(color)));
        assert_eq!(paths.calculate_destination(&token, 2), None);
    }
}

/// Through the engine: an overshooting roll passes the turn, an exact one
/// reaches home and earns another roll.
#[test]
fn test_exact_roll_through_engine() {
    let engine = engine(GameConfig::default());
    let mut state = engine.create_initial_state();
    let last = Cell::HomeStretch { color: PlayerColor::Red, index: 4 };
    set_cells(&mut state, 0, [last, base(PlayerColor::Red), base(PlayerColor::Red), base(PlayerColor::Red)]);

    let passed = engine.apply_dice_value(&state, 2);
    assert_eq!(passed.current_player_index, 1);

    let ready = engine.apply_dice_value(&state, 1);
    let moves = engine.legal_moves(&ready);
    assert_eq!(moves.len(), 1);
    let next = engine.execute_move(&ready, &moves[0]);
    assert_eq!(next.token(PlayerColor::Red, 0).unwrap().cell, Cell::Home(PlayerColor::Red));
    assert_eq!(next.current_player_index, 0);
    assert_eq!(next.phase, GamePhase::WaitingForRoll);
}

/// Bringing the fourth token home ends the game.
#[test]
fn test_last_token_home_wins() {
    let engine = engine(GameConfig::with_players(3));
    let mut state = engine.create_initial_state();
    let home = Cell::Home(PlayerColor::Red);
    set_cells(&mut state, 0, [home, home, Cell::HomeStretch { color: PlayerColor::Red, index: 3 }, home]);

    let state = engine.apply_dice_value(&state, 2);
    let moves = engine.legal_moves(&state);
    assert_eq!(moves.len(), 1);

    let done = engine.execute_move(&state, &moves[0]);
    assert_eq!(done.phase, GamePhase::GameOver);
    assert_eq!(done.winner, Some(PlayerColor::Red));
    assert_eq!(done.dice, None);
    assert!(done.check_invariants().is_ok());

    // A finished game ignores further input.
    assert_eq!(engine.apply_dice_value(&done, 6), done);
    assert_eq!(engine.skip_turn(&done), done);
    assert_eq!(engine.execute_move(&done, &moves[0]), done);
}

// =============================================================================
// Extra turns and forfeits
// =============================================================================

/// Sixes keep the turn until the streak limit, which forfeits it.
#[test]
fn test_six_streak_and_forfeit() {
    let engine = engine(GameConfig::default());
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 0, [track(5), base(PlayerColor::Red), base(PlayerColor::Red), base(PlayerColor::Red)]);

    // First six: move and keep the turn.
    let s1 = engine.apply_dice_value(&state, 6);
    assert_eq!(s1.consecutive_sixes, 1);
    let s1 = engine.execute_move(&s1, &engine.legal_moves(&s1)[0]);
    assert_eq!(s1.current_player_index, 0);
    assert_eq!(s1.phase, GamePhase::WaitingForRoll);

    // Second six: still below the limit.
    let s2 = engine.apply_dice_value(&s1, 6);
    assert_eq!(s2.consecutive_sixes, 2);
    let s2 = engine.execute_move(&s2, &engine.legal_moves(&s2)[0]);
    assert_eq!(s2.current_player_index, 0);

    // Third six: forfeited even though moves exist.
    let s3 = engine.apply_dice_value(&s2, 6);
    assert_eq!(s3.current_player_index, 1);
    assert_eq!(s3.phase, GamePhase::WaitingForRoll);
    assert_eq!(s3.dice, None);
    assert_eq!(s3.consecutive_sixes, 0);
    assert_eq!(s3.players[0].last_dice_value, Some(6));
}

/// A non-six resets the streak.
#[test]
fn test_non_six_resets_streak() {
    let engine = engine(GameConfig::default());
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 0, [track(5), base(PlayerColor::Red), base(PlayerColor::Red), base(PlayerColor::Red)]);
    state.consecutive_sixes = 2;

    let next = engine.apply_dice_value(&state, 4);
    assert_eq!(next.consecutive_sixes, 0);
    assert_eq!(next.phase, GamePhase::WaitingForMove);
}

/// A six with nothing to move still owes another roll.
#[test]
fn test_unusable_six_rolls_again() {
    let engine = engine(GameConfig::default());
    let mut state = engine.create_initial_state();
    let home = Cell::Home(PlayerColor::Red);
    set_cells(&mut state, 0, [home, home, home, Cell::HomeStretch { color: PlayerColor::Red, index: 2 }]);

    let next = engine.apply_dice_value(&state, 6);
    assert_eq!(next.current_player_index, 0);
    assert_eq!(next.phase, GamePhase::WaitingForRoll);
    assert_eq!(next.dice, None);
    assert_eq!(next.consecutive_sixes, 1);
}

/// With a limit of one, every six forfeits.
#[test]
fn test_limit_of_one_forfeits_every_six() {
    let engine = engine(GameConfig::default().with_max_consecutive_sixes(1));
    let state = engine.apply_dice_value(&engine.create_initial_state(), 6);
    assert_eq!(state.current_player_index, 1);
    assert!(engine.legal_moves(&state).is_empty());
}

// =============================================================================
// Gifted dice
// =============================================================================

/// Red rolls 3 with nothing to move; Green cannot use it either, so it goes to
/// Yellow. Afterwards play resumes with Green, the roller's successor.
#[test]
fn test_gift_goes_to_first_capable_seat() {
    let engine = engine(GameConfig::with_players(3).with_pass_dice_to_next_player(true));
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 2, [track(30), base(PlayerColor::Yellow), base(PlayerColor::Yellow), base(PlayerColor::Yellow)]);

    let gifted = engine.apply_dice_value(&state, 3);
    assert_eq!(gifted.current_player_index, 2);
    assert_eq!(gifted.phase, GamePhase::WaitingForMove);
    assert_eq!(gifted.gifted_dice.map(|d| d.value), Some(3));
    assert_eq!(gifted.gifted_dice_original_player_index, Some(0));
    assert_eq!(gifted.dice, None);
    assert!(engine.legal_moves(&gifted).is_empty());
    assert_eq!(engine.get_resume_player_index_after_gifted_dice(&gifted), 1);
    assert!(gifted.check_invariants().is_ok());

    let ready = engine.apply_gifted_dice(&gifted);
    assert_eq!(ready.gifted_dice, None);
    assert_eq!(ready.gifted_dice_original_player_index, None);
    assert_eq!(ready.dice.map(|d| (d.value, d.gifted_from)), Some((3, Some(0))));
    assert_eq!(ready.players[2].last_dice_value, Some(3));
    assert_eq!(engine.get_resume_player_index_after_gifted_dice(&ready), 1);

    let moves = engine.legal_moves(&ready);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].destination, track(33));

    let next = engine.execute_move(&ready, &moves[0]);
    assert_eq!(next.current_player_index, 1);
    assert_eq!(next.phase, GamePhase::WaitingForRoll);
    assert_eq!(next.dice, None);
    assert!(!next.has_pending_gift());
    assert!(next.check_invariants().is_ok());
}

/// Nobody can use the roll: it is discarded and play passes normally.
#[test]
fn test_gift_without_recipient_is_discarded() {
    let engine = engine(GameConfig::with_players(4).with_pass_dice_to_next_player(true));
    let next = engine.apply_dice_value(&engine.create_initial_state(), 3);
    assert_eq!(next.current_player_index, 1);
    assert_eq!(next.phase, GamePhase::WaitingForRoll);
    assert!(!next.has_pending_gift());
}

/// Without the house rule, an unusable roll simply passes the turn.
#[test]
fn test_no_gift_when_rule_disabled() {
    let engine = engine(GameConfig::with_players(3));
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 2, [track(30), base(PlayerColor::Yellow), base(PlayerColor::Yellow), base(PlayerColor::Yellow)]);

    let next = engine.apply_dice_value(&state, 3);
    assert_eq!(next.current_player_index, 1);
    assert!(!next.has_pending_gift());
}

/// Skipping a gifted turn resumes after the original roller.
#[test]
fn test_skip_pending_gift_resumes_after_roller() {
    let engine = engine(GameConfig::with_players(3).with_pass_dice_to_next_player(true));
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 2, [track(30), base(PlayerColor::Yellow), base(PlayerColor::Yellow), base(PlayerColor::Yellow)]);

    let gifted = engine.apply_dice_value(&state, 3);
    let skipped = engine.skip_turn(&gifted);
    assert_eq!(skipped.current_player_index, 1);
    assert!(!skipped.has_pending_gift());

    let skipped_after_apply = engine.skip_turn(&engine.apply_gifted_dice(&gifted));
    assert_eq!(skipped_after_apply.current_player_index, 1);
    assert_eq!(skipped_after_apply.phase, GamePhase::WaitingForRoll);
    assert_eq!(skipped_after_apply.dice, None);
}

/// A gifted die that captures does not earn an extra roll; play resumes
/// after the original roller.
#[test]
fn test_gifted_die_never_grants_extra_turn() {
    let engine = engine(GameConfig::with_players(3).with_pass_dice_to_next_player(true));
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 1, [track(17), base(PlayerColor::Green), base(PlayerColor::Green), base(PlayerColor::Green)]);
    set_cells(&mut state, 2, [track(20), base(PlayerColor::Yellow), base(PlayerColor::Yellow), base(PlayerColor::Yellow)]);

    // Red cannot use a 3; Green can, and lands on Yellow.
    let gifted = engine.apply_dice_value(&state, 3);
    assert_eq!(gifted.current_player_index, 1);
    let ready = engine.apply_gifted_dice(&gifted);
    let moves = engine.legal_moves(&ready);
    assert!(moves[0].is_capture());

    let next = engine.execute_move(&ready, &moves[0]);
    assert_eq!(next.token(PlayerColor::Yellow, 0).unwrap().cell, base(PlayerColor::Yellow));
    assert_eq!(next.current_player_index, 1);
    assert_eq!(next.phase, GamePhase::WaitingForRoll);
    assert_eq!(next.consecutive_sixes, 0);
}

/// `can_player_use_dice` answers hypotheticals without touching the state.
#[test]
fn test_can_player_use_dice_is_hypothetical() {
    let engine = engine(GameConfig::with_players(3));
    let mut state = engine.create_initial_state();
    set_cells(&mut state, 2, [track(30), base(PlayerColor::Yellow), base(PlayerColor::Yellow), base(PlayerColor::Yellow)]);
    let before = state.clone();

    assert!(engine.can_player_use_dice(&state, 2, 3));
    assert!(!engine.can_player_use_dice(&state, 1, 3));
    assert!(engine.can_player_use_dice(&state, 1, 6));
    assert!(!engine.can_player_use_dice(&state, 0, 0));
    assert_eq!(state, before);
}

// =============================================================================
// Determinism and invariants
// =============================================================================

/// A game saved mid-way with its dice position replays the same continuation.
#[test]
fn test_saved_dice_position_resumes_game() {
    let engine = engine(GameConfig::with_players(4));
    let start = engine.create_initial_state();
    let strategies = seat_strategies(&start);
    let mut rng = GameRng::new(99);

    let mut state = start;
    for _ in 0..120 {
        let strategy = strategies[state.current_player_index].as_ref();
        state = step(&engine, &state, strategy, &mut rng);
    }
    let saved_state = bincode::serialize(&state).unwrap();
    let saved_rng = bincode::serialize(&rng.position()).unwrap();

    let mut original = state;
    let mut resumed: GameState = bincode::deserialize(&saved_state).unwrap();
    let mut resumed_rng = GameRng::resume(&bincode::deserialize(&saved_rng).unwrap());
    for _ in 0..200 {
        let seat = original.current_player_index;
        original = step(&engine, &original, strategies[seat].as_ref(), &mut rng);
        resumed = step(&engine, &resumed, strategies[seat].as_ref(), &mut resumed_rng);
        assert_eq!(original, resumed);
    }
}

/// Two engines fed the same value from the same state agree exactly.
#[test]
fn test_apply_dice_value_is_deterministic() {
    let config = GameConfig::with_players(4).with_pass_dice_to_next_player(true);
    let a = engine(config.clone());
    let b = engine(config);
    let state = a.create_initial_state();
    for value in 1..=6 {
        let left = a.apply_dice_value(&state, value);
        let right = b.apply_dice_value(&state, value);
        assert_eq!(left, right);
        assert_eq!(bincode::serialize(&left).unwrap(), bincode::serialize(&right).unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Replicas replaying the same dice values and chosen moves stay identical.
    #[test]
    fn prop_replicas_stay_identical(
        seed in any::<u64>(),
        values in prop::collection::vec(1u8..=6, 1..300),
        players in 2usize..=4,
        pass_dice in any::<bool>(),
    ) {
        let config = GameConfig::with_players(players).with_pass_dice_to_next_player(pass_dice);
        let leader = engine(config.clone());
        let follower = engine(config);
        let mut left = leader.create_initial_state();
        let mut right = follower.create_initial_state();
        let mut rng = GameRng::new(seed);

        for value in values {
            if left.is_game_over() {
                break;
            }
            if left.has_pending_gift() {
                left = leader.apply_gifted_dice(&left);
                right = follower.apply_gifted_dice(&right);
            }
            match left.phase {
                GamePhase::WaitingForRoll => {
                    left = leader.apply_dice_value(&left, value);
                    right = follower.apply_dice_value(&right, value);
                }
                _ => {
                    let moves = leader.legal_moves(&left);
                    let mv = RandomStrategy
                        .choose_move(&left, &moves, leader.layout(), &mut rng)
                        .unwrap();
                    left = leader.execute_move(&left, &mv);
                    right = follower.execute_move(&right, &mv);
                }
            }
            prop_assert_eq!(&left, &right);
        }
    }

    /// Invariants hold after every transition of randomly configured games.
    #[test]
    fn prop_invariants_hold_during_play(
        seed in any::<u64>(),
        players in 2usize..=4,
        pass_dice in any::<bool>(),
        enter_on_six_only in any::<bool>(),
        safe_zones in any::<bool>(),
        max_sixes in 1u32..=4,
    ) {
        let config = GameConfig::with_players(players)
            .with_pass_dice_to_next_player(pass_dice)
            .with_enter_on_six_only(enter_on_six_only)
            .with_safe_zones(safe_zones)
            .with_max_consecutive_sixes(max_sixes);
        let engine = engine(config);
        let layout = BoardLayout::standard();
        let mut state = engine.create_initial_state();
        let strategies = seat_strategies(&state);
        let mut rng = GameRng::new(seed);

        for _ in 0..1_500 {
            if state.is_game_over() {
                break;
            }
            let strategy = strategies[state.current_player_index].as_ref();
            state = step(&engine, &state, strategy, &mut rng);

            prop_assert!(state.check_invariants().is_ok(), "{:?}", state.check_invariants());
            prop_assert!(!matches!(state.phase, GamePhase::Rolling | GamePhase::Animating));
            prop_assert_eq!(state.all_tokens().count(), players * 4);
            for token in state.all_tokens() {
                prop_assert!(layout.path_index_of(token.color, token.cell).is_some());
            }
            if state.phase == GamePhase::WaitingForMove && !state.has_pending_gift() {
                prop_assert!(!engine.legal_moves(&state).is_empty());
            }
            if let Some(winner) = state.winner {
                prop_assert!(state.player_by_color(winner).unwrap().has_finished());
            }
        }
    }
}
