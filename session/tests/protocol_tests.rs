//! Wire-format and viewer-scoping tests for the session layer: request
//! bodies deserialize as spec §6 describes, and `view::build` hides hole
//! cards from everyone but the viewer until showdown.

use poker_engine::{Engine, GameState, Player};
use poker_session::protocol::{ClientMessage, CreateSinglePlayRequest};

fn two_player_game() -> GameState {
    let mut game = GameState::new("g1".to_string(), 2, 5, 10);
    game.seat_player(
        0,
        Player {
            id: "alice".to_string(),
            name: "Alice".to_string(),
            is_ai: false,
        },
        1000,
    )
    .unwrap();
    game.seat_player(
        1,
        Player {
            id: "bob".to_string(),
            name: "Bob".to_string(),
            is_ai: true,
        },
        1000,
    )
    .unwrap();
    Engine::start_new_hand(&mut game).unwrap();
    game
}

#[test]
fn create_single_play_request_deserializes() {
    let body = r#"{"big_blind": 20, "buy_in": 2000}"#;
    let req: CreateSinglePlayRequest = serde_json::from_str(body).unwrap();
    assert_eq!(req.big_blind, 20);
    assert_eq!(req.buy_in, 2000);
}

#[test]
fn client_message_tags_parse_as_expected() {
    assert!(matches!(
        serde_json::from_str::<ClientMessage>(r#"{"type":"start_game"}"#).unwrap(),
        ClientMessage::StartGame
    ));
    assert!(matches!(
        serde_json::from_str::<ClientMessage>(r#"{"type":"get_state"}"#).unwrap(),
        ClientMessage::GetState
    ));
    match serde_json::from_str::<ClientMessage>(r#"{"type":"player_action","action":"RAISE","amount":40}"#)
        .unwrap()
    {
        ClientMessage::PlayerAction { action, amount } => {
            assert_eq!(amount, 40);
            let player_action = action.into_player_action(amount);
            assert_eq!(player_action, poker_engine::PlayerAction::Raise(40));
        }
        other => panic!("expected PlayerAction, got {other:?}"),
    }
}

#[test]
fn player_action_defaults_amount_to_zero_when_omitted() {
    let msg: ClientMessage =
        serde_json::from_str(r#"{"type":"player_action","action":"FOLD"}"#).unwrap();
    match msg {
        ClientMessage::PlayerAction { action, amount } => {
            assert_eq!(amount, 0);
            assert_eq!(action.into_player_action(amount), poker_engine::PlayerAction::Fold);
        }
        other => panic!("expected PlayerAction, got {other:?}"),
    }
}

#[test]
fn viewer_sees_own_hole_cards_but_not_opponents() {
    let game = two_player_game();
    let view = poker_session::view::build(&game, "alice");

    let alice_seat = view.seats.iter().find(|s| s.index == 0).unwrap();
    assert_eq!(alice_seat.hole_cards.len(), 2);

    let bob_seat = view.seats.iter().find(|s| s.index == 1).unwrap();
    assert!(bob_seat.hole_cards.is_empty());
}

#[test]
fn valid_actions_are_empty_unless_it_is_the_viewers_turn() {
    let game = two_player_game();
    let current_idx = game.current_seat_index.unwrap();
    let current_player_id = game.table.seats[current_idx].player.as_ref().unwrap().id.clone();
    let other_player_id = game
        .table
        .seats
        .iter()
        .find(|s| s.player.as_ref().is_some_and(|p| p.id != current_player_id))
        .unwrap()
        .player
        .as_ref()
        .unwrap()
        .id
        .clone();

    let current_view = poker_session::view::build(&game, &current_player_id);
    assert!(!current_view.valid_actions.is_empty());

    let other_view = poker_session::view::build(&game, &other_player_id);
    assert!(other_view.valid_actions.is_empty());
}

#[test]
fn ai_seat_never_gets_valid_actions_even_on_its_turn() {
    let mut game = two_player_game();
    // Drive to bob's (AI) turn if alice is first to act preflop heads-up.
    if game.table.seats[game.current_seat_index.unwrap()]
        .player
        .as_ref()
        .unwrap()
        .id
        == "alice"
    {
        Engine::apply_action(&mut game, "alice", poker_engine::PlayerAction::Call).unwrap();
    }
    let view = poker_session::view::build(&game, "bob");
    assert!(view.valid_actions.is_empty());
}
