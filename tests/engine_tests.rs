//! Engine integration tests.
//!
//! Scripted scenarios drive the engine through its public API with
//! externally supplied die values, starting from hand-placed boards.

use ludo_bet::core::{
    Color, DiceRng, GameConfig, GameState, RollPhase, Token, TokenId, TokenRef, TrackPosition,
};
use ludo_bet::events::GameEvent;
use ludo_bet::rules::{GameEngine, RollResolution};
use ludo_bet::Rejection;

/// Build an engine with `current` to play and tokens placed by step count.
fn board(current: Color, placements: &[(TokenRef, u8)]) -> GameEngine {
    let config = GameConfig::default();
    let mut state = GameState::new(config.turn_log_capacity);
    state.current_player = current;
    for &(token, steps) in placements {
        let slot = state.token_mut(token).expect("valid token");
        *slot = Token {
            id: token.id,
            position: TrackPosition::from_steps(token.color, steps, &config),
            steps_taken: steps,
        };
    }
    GameEngine::from_state(config, state, DiceRng::new(1)).unwrap()
}

fn roll(engine: &mut GameEngine, value: u8) -> RollResolution {
    engine.roll_with(value).unwrap();
    engine.resolve_roll().unwrap()
}

const RED0: TokenRef = TokenRef::new(Color::Red, 0);
const RED1: TokenRef = TokenRef::new(Color::Red, 1);

#[test]
fn test_first_roll_of_fresh_game() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(1)).unwrap();

    let value = engine.roll().unwrap();

    let log: Vec<_> = engine.state().turn_log().map(|e| e.message.clone()).collect();
    assert_eq!(
        log,
        vec![format!("RED rolled a {value}"), ludo_bet::core::WELCOME_MESSAGE.to_string()]
    );
    assert_eq!(engine.state().phase, RollPhase::Rolling);
}

#[test]
fn test_plain_move_without_capture() {
    let mut engine = board(Color::Red, &[(RED0, 10)]);
    assert_eq!(engine.state().token(RED0).unwrap().position, TrackPosition::OnMainTrack(10));

    roll(&mut engine, 4);
    let outcome = engine.apply_move(RED0).unwrap();

    let token = engine.state().token(RED0).unwrap();
    assert_eq!(token.position, TrackPosition::OnMainTrack(14));
    assert_eq!(token.steps_taken, 14);
    assert!(outcome.captured.is_empty());
    assert_eq!(outcome.next_player, Color::Green);
    assert_eq!(engine.state().current_player, Color::Green);
    assert_eq!(engine.state().die_value, None);
}

#[test]
fn test_enter_home_stretch() {
    let mut engine = board(Color::Red, &[(RED0, 48)]);

    roll(&mut engine, 5);
    engine.apply_move(RED0).unwrap();

    let token = engine.state().token(RED0).unwrap();
    assert_eq!(token.position, TrackPosition::InHomeStretch(2));
    assert_eq!(token.steps_taken, 53);
}

#[test]
fn test_exact_finish_grants_bonus_when_not_winning() {
    let mut engine = board(Color::Red, &[(RED0, 50)]);

    roll(&mut engine, 6);
    let outcome = engine.apply_move(RED0).unwrap();

    assert_eq!(engine.state().token(RED0).unwrap().position, TrackPosition::Finished);
    assert_eq!(outcome.winner, None);
    assert!(outcome.bonus_turn);
    assert_eq!(engine.state().current_player, Color::Red);
}

#[test]
fn test_capture_scenario() {
    let blue0 = TokenRef::new(Color::Blue, 0);
    // Blue starts at 39: 27 steps lands on cell 14
    let mut engine = board(Color::Red, &[(RED0, 10), (blue0, 27)]);
    assert_eq!(engine.state().token(blue0).unwrap().position, TrackPosition::OnMainTrack(14));

    roll(&mut engine, 4);
    engine.drain_events();
    let outcome = engine.apply_move(RED0).unwrap();

    assert_eq!(outcome.captured.as_slice(), &[blue0]);
    assert_eq!(*engine.state().token(blue0).unwrap(), Token::at_base(TokenId(0)));
    assert!(engine.drain_events().contains(&GameEvent::Captured {
        by: RED0,
        victim: blue0,
        cell: 14,
    }));
    assert_eq!(
        engine.state().last_log().map(|e| e.message.as_str()),
        Some("RED captured BLUE on cell 14!")
    );
}

#[test]
fn test_capture_takes_every_opponent_on_the_cell() {
    let green0 = TokenRef::new(Color::Green, 0);
    let yellow1 = TokenRef::new(Color::Yellow, 1);
    // Green at 13+7 = 20, Yellow at (26+46) % 52 = 20
    let mut engine = board(Color::Red, &[(RED0, 17), (green0, 7), (yellow1, 46)]);

    roll(&mut engine, 3);
    let outcome = engine.apply_move(RED0).unwrap();

    assert_eq!(outcome.captured.len(), 2);
    assert!(engine.state().token(green0).unwrap().is_at_base());
    assert!(engine.state().token(yellow1).unwrap().is_at_base());
}

#[test]
fn test_no_capture_in_home_stretch() {
    let green0 = TokenRef::new(Color::Green, 0);
    let mut engine = board(Color::Red, &[(RED0, 48), (green0, 40)]);

    roll(&mut engine, 4);
    let outcome = engine.apply_move(RED0).unwrap();

    assert!(outcome.captured.is_empty());
    assert_eq!(engine.state().token(green0).unwrap().steps_taken, 40);
}

#[test]
fn test_six_on_board_grants_bonus() {
    let mut engine = board(Color::Green, &[(TokenRef::new(Color::Green, 1), 5)]);

    roll(&mut engine, 6);
    let outcome = engine.apply_move(TokenRef::new(Color::Green, 1)).unwrap();

    assert!(outcome.bonus_turn);
    assert_eq!(engine.state().current_player, Color::Green);
    assert_eq!(engine.state().phase, RollPhase::Idle);
    assert!(engine.roll().is_ok());
}

#[test]
fn test_base_requires_six() {
    let mut engine = board(Color::Yellow, &[]);

    for value in 1..6 {
        assert_eq!(roll(&mut engine, value), RollResolution::NoLegalMove);
        engine.auto_pass().unwrap();
        // Come back around to Yellow
        for _ in 0..3 {
            roll(&mut engine, 1);
            engine.auto_pass().unwrap();
        }
    }

    let RollResolution::AwaitingMove(legal) = roll(&mut engine, 6) else {
        panic!("six should release a token");
    };
    assert_eq!(legal.len(), 2);

    let yellow0 = TokenRef::new(Color::Yellow, 0);
    engine.apply_move(yellow0).unwrap();
    let token = engine.state().token(yellow0).unwrap();
    assert_eq!(token.position, TrackPosition::OnMainTrack(26));
    assert_eq!(token.steps_taken, 0);
}

#[test]
fn test_overshoot_forfeits_only_that_token() {
    let mut engine = board(Color::Red, &[(RED0, 55), (RED1, 20)]);

    let RollResolution::AwaitingMove(legal) = roll(&mut engine, 5) else {
        panic!("red#1 can still move");
    };
    assert_eq!(legal.as_slice(), &[RED1]);

    let before = engine.state().clone();
    assert_eq!(
        engine.apply_move(RED0),
        Err(Rejection::RejectedIllegalMove { token: RED0, roll: 5 })
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_overshoot_with_no_alternative_passes() {
    let mut engine = board(Color::Red, &[(RED0, 55), (RED1, 56)]);

    assert_eq!(roll(&mut engine, 4), RollResolution::NoLegalMove);
    assert_eq!(engine.auto_pass().unwrap(), Color::Green);
    assert_eq!(engine.state().token(RED0).unwrap().steps_taken, 55);
}

#[test]
fn test_rotation_order() {
    let mut engine = board(Color::Red, &[]);
    let mut order = Vec::new();

    for _ in 0..5 {
        order.push(engine.state().current_player);
        roll(&mut engine, 2);
        engine.auto_pass().unwrap();
    }

    assert_eq!(
        order,
        vec![Color::Red, Color::Green, Color::Yellow, Color::Blue, Color::Red]
    );
}

#[test]
fn test_win_detection_and_terminal_state() {
    let mut engine = board(Color::Blue, &[
        (TokenRef::new(Color::Blue, 0), 56),
        (TokenRef::new(Color::Blue, 1), 53),
    ]);

    roll(&mut engine, 3);
    let outcome = engine.apply_move(TokenRef::new(Color::Blue, 1)).unwrap();

    assert_eq!(outcome.winner, Some(Color::Blue));
    assert_eq!(engine.state().winner, Some(Color::Blue));
    assert!(engine.state().players[Color::Blue].has_finished());
    for color in [Color::Red, Color::Green, Color::Yellow] {
        assert!(!engine.state().players[color].has_finished());
    }

    let before = engine.state().clone();
    assert!(matches!(
        engine.roll(),
        Err(Rejection::RejectedIllegalPhase { winner: Some(Color::Blue), .. })
    ));
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_seeded_games_are_reproducible() {
    let play = |seed: u64| {
        let config = GameConfig::default().with_seed(seed);
        let mut engine = GameEngine::new(config).unwrap();
        for _ in 0..200 {
            engine.roll().unwrap();
            match engine.resolve_roll().unwrap() {
                RollResolution::NoLegalMove => {
                    engine.auto_pass().unwrap();
                }
                RollResolution::AwaitingMove(legal) => {
                    if engine.apply_move(legal[0]).unwrap().winner.is_some() {
                        break;
                    }
                }
            }
        }
        engine.state().clone()
    };

    assert_eq!(play(99), play(99));
}

#[test]
fn test_full_game_has_exactly_one_winner() {
    let config = GameConfig::default().with_seed(2024);
    let mut engine = GameEngine::new(config).unwrap();
    let mut wins = 0;

    for _ in 0..100_000 {
        if engine.state().is_terminal() {
            break;
        }
        engine.roll().unwrap();
        match engine.resolve_roll().unwrap() {
            RollResolution::NoLegalMove => {
                engine.auto_pass().unwrap();
            }
            RollResolution::AwaitingMove(legal) => {
                // Prefer the token furthest along
                let token = *legal
                    .iter()
                    .max_by_key(|&&t| engine.state().token(t).map(|t| t.steps_taken))
                    .unwrap();
                engine.apply_move(token).unwrap();
            }
        }
        wins += engine
            .drain_events()
            .iter()
            .filter(|e| e.winner().is_some())
            .count();
    }

    let winner = engine.win_event().expect("game should finish");
    assert_eq!(wins, 1);
    assert!(engine.state().players[winner].has_finished());
    let finished = Color::all()
        .filter(|&c| engine.state().players[c].has_finished())
        .count();
    assert_eq!(finished, 1);
}
