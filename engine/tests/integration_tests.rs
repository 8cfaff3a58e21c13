use poker_engine::{Engine, GameState, GameStatus, Player, PlayerAction, Round};

fn player(id: &str, name: &str) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        is_ai: false,
    }
}

fn heads_up(stack_a: u32, stack_b: u32) -> GameState {
    let mut game = GameState::new("g1".to_string(), 2, 50, 100);
    game.seat_player(0, player("a", "Alice"), stack_a).unwrap();
    game.seat_player(1, player("b", "Bob"), stack_b).unwrap();
    Engine::start_new_hand(&mut game).unwrap();
    game
}

#[test]
fn heads_up_walkover_on_fold() {
    let mut game = heads_up(1000, 1000);
    // Dealer (seat 0) is also SB heads-up; SB acts first preflop.
    assert_eq!(game.current_seat_index, Some(0));

    Engine::apply_action(&mut game, "a", PlayerAction::Fold).unwrap();

    assert_eq!(game.status, GameStatus::HandComplete);
    assert_eq!(game.table.seats[1].stack, 1050);
    assert_eq!(game.table.seats[0].stack, 950);
    assert_eq!(game.winners.len(), 1);
    assert_eq!(game.winners[0].seat_index, 1);
    assert_eq!(game.winners[0].amount, 150);
    assert_eq!(game.winners[0].pot_type, "main");
    assert_eq!(game.winners[0].hand_name, "fold-win");
}

#[test]
fn preflop_limp_and_big_blind_check_advances_to_flop() {
    let mut game = GameState::new("g2".to_string(), 3, 50, 100);
    game.seat_player(0, player("a", "Alice"), 1000).unwrap();
    game.seat_player(1, player("b", "Bob"), 1000).unwrap();
    game.seat_player(2, player("c", "Carol"), 1000).unwrap();
    Engine::start_new_hand(&mut game).unwrap();

    // dealer=0, sb=1, bb=2; first actor preflop is seat0.
    assert_eq!(game.dealer_seat_index, Some(0));
    assert_eq!(game.small_blind_seat_index, Some(1));
    assert_eq!(game.big_blind_seat_index, Some(2));
    assert_eq!(game.current_seat_index, Some(0));

    Engine::apply_action(&mut game, "a", PlayerAction::Call).unwrap(); // calls 100
    Engine::apply_action(&mut game, "b", PlayerAction::Call).unwrap(); // completes to 100
    Engine::apply_action(&mut game, "c", PlayerAction::Check).unwrap(); // BB option

    assert_eq!(game.current_round, Round::Flop);
    assert_eq!(game.current_bet, 0);
    assert_eq!(game.table.total_pot(), 300);
    assert_eq!(game.current_seat_index, Some(1));
}

#[test]
fn single_all_in_does_not_split_pot_until_a_higher_bet_arrives() {
    let mut game = GameState::new("g3".to_string(), 3, 50, 100);
    game.seat_player(0, player("a", "Alice"), 100).unwrap();
    game.seat_player(1, player("b", "Bob"), 500).unwrap();
    game.seat_player(2, player("c", "Carol"), 500).unwrap();
    Engine::start_new_hand(&mut game).unwrap();

    assert_eq!(game.current_seat_index, Some(0));
    // Alice's entire stack (100) exactly matches the big blind, so her
    // all-in is a CALL, not a raise.
    Engine::apply_action(&mut game, "a", PlayerAction::Call).unwrap();
    Engine::apply_action(&mut game, "b", PlayerAction::Call).unwrap();
    Engine::apply_action(&mut game, "c", PlayerAction::Check).unwrap();

    assert_eq!(game.table.pots.len(), 1);
    assert_eq!(game.table.pots[0].amount, 300);
    let mut eligible = game.table.pots[0].eligible_seats.clone();
    eligible.sort_unstable();
    assert_eq!(eligible, vec![0, 1, 2]);
}

#[test]
fn short_all_in_raise_does_not_reopen_action_for_seats_that_already_matched() {
    let mut game = GameState::new("g4".to_string(), 3, 50, 100);
    game.seat_player(0, player("a", "Alice"), 450).unwrap();
    game.seat_player(1, player("b", "Bob"), 1000).unwrap();
    game.seat_player(2, player("c", "Carol"), 1000).unwrap();
    Engine::start_new_hand(&mut game).unwrap();

    // Preflop: dealer=0 (Alice, UTG), sb=1 (Bob), bb=2 (Carol). Limp
    // around to reach the flop with current_bet reset to 0.
    Engine::apply_action(&mut game, "a", PlayerAction::Call).unwrap();
    Engine::apply_action(&mut game, "b", PlayerAction::Call).unwrap();
    Engine::apply_action(&mut game, "c", PlayerAction::Check).unwrap();
    assert_eq!(game.current_round, Round::Flop);
    assert_eq!(game.current_seat_index, Some(1)); // Bob acts first postflop.

    Engine::apply_action(&mut game, "b", PlayerAction::Bet(100)).unwrap();
    Engine::apply_action(&mut game, "c", PlayerAction::Raise(300)).unwrap(); // delta 200, full
    // Alice's whole remaining stack (350) can't reach the 500 formal
    // minimum raise, but she may still push it all in as a raise-for-less.
    Engine::apply_action(&mut game, "a", PlayerAction::Raise(350)).unwrap(); // delta 50, short

    // Bob was reopened by Carol's full raise (acted=false), but Alice's
    // short all-in never reopens the street further: the right to raise
    // stays closed for the rest of the street, Bob included.
    assert_eq!(game.current_seat_index, Some(1));
    let bob_legal = poker_engine::TurnManager::legal_actions_for_player(&game, "b");
    let bob_types: Vec<_> = bob_legal.iter().map(|l| l.action_type).collect();
    assert!(bob_types.contains(&poker_engine::ActionType::Fold));
    assert!(bob_types.contains(&poker_engine::ActionType::Call));
    assert!(!bob_types.contains(&poker_engine::ActionType::Raise));
    Engine::apply_action(&mut game, "b", PlayerAction::Call).unwrap();

    // Carol already matched 300 before Alice's short all-in; her raise
    // right is not reopened by it.
    assert_eq!(game.current_seat_index, Some(2));
    let carol_legal = poker_engine::TurnManager::legal_actions_for_player(&game, "c");
    let types: Vec<_> = carol_legal.iter().map(|l| l.action_type).collect();
    assert!(types.contains(&poker_engine::ActionType::Fold));
    assert!(types.contains(&poker_engine::ActionType::Call));
    assert!(!types.contains(&poker_engine::ActionType::Raise));

    Engine::apply_action(&mut game, "c", PlayerAction::Call).unwrap();
    assert_eq!(game.current_round, Round::Turn);
}

#[test]
fn run_it_out_when_one_side_is_all_in_with_chips_still_behind() {
    let mut game = GameState::new("g5".to_string(), 2, 50, 100);
    game.seat_player(0, player("a", "Alice"), 200).unwrap();
    game.seat_player(1, player("b", "Bob"), 1000).unwrap();
    Engine::start_new_hand(&mut game).unwrap();

    Engine::apply_action(&mut game, "a", PlayerAction::Raise(200)).unwrap(); // all-in
    Engine::apply_action(&mut game, "b", PlayerAction::Call).unwrap();

    // Alice is all-in with Bob still having chips; the street cannot
    // reopen, so the engine must run the board out to showdown.
    assert_eq!(game.status, GameStatus::HandComplete);
    assert_eq!(game.table.community_cards.len(), 5);
    assert!(!game.winners.is_empty());
}
