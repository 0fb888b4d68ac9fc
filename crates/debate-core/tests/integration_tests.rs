//! Integration tests for the debate turn engine.
//!
//! These tests verify complete game flows from group setup through to the end
//! of the game.

use debate_core::*;
use pretty_assertions::assert_eq;

/// Timings with an instant wheel so a spin commits in the same call
fn instant() -> GameConfig {
    GameConfig {
        spin_seconds: 0,
        ..GameConfig::default()
    }
}

/// Register red, blue, green and purple, in that order
fn with_groups(rolls: Vec<u8>, config: GameConfig) -> GameState<ScriptedRolls> {
    let mut game = GameState::with_source(config, ScriptedRolls::new(42).with_rolls(rolls));
    for (name, color) in [
        ("Rojo", DeckColor::Red),
        ("Azul", DeckColor::Blue),
        ("Verde", DeckColor::Green),
        ("Violeta", DeckColor::Purple),
    ] {
        game.apply_action(GameAction::CreateGroup {
            name: name.into(),
            color,
        })
        .unwrap();
    }
    game
}

/// Roll for order group by group and start; `turns` are the in-game rolls
fn started_with(config: GameConfig, order: [u8; 4], turns: &[u8]) -> GameState<ScriptedRolls> {
    let mut script = order.to_vec();
    script.extend_from_slice(turns);
    let mut game = with_groups(script, config);
    for group in 0..4 {
        game.apply_action(GameAction::RollForOrder { group }).unwrap();
        for _ in 0..config.spin_seconds {
            game.apply_action(GameAction::Tick).unwrap();
        }
    }
    game.apply_action(GameAction::StartGame).unwrap();
    game
}

fn started(order: [u8; 4], turns: &[u8]) -> GameState<ScriptedRolls> {
    started_with(instant(), order, turns)
}

fn dealt_card(events: &[GameEvent]) -> Option<DealtCard> {
    events.iter().find_map(|e| match e {
        GameEvent::CardDealt { card, .. } => Some(card.clone()),
        _ => None,
    })
}

#[test]
fn test_setup_to_play() {
    let mut game = with_groups(vec![5, 3, 8, 1], instant());
    assert_eq!(game.phase(), GamePhase::InitialRoll);

    // The wheel rolls for the last group first: purple, green, blue, red
    for _ in 0..4 {
        game.apply_action(GameAction::Spin).unwrap();
    }
    let rolls: Vec<(usize, u8)> = game
        .initial_rolls()
        .iter()
        .map(|r| (r.group, r.roll))
        .collect();
    assert_eq!(rolls, vec![(3, 5), (2, 3), (1, 8), (0, 1)]);
    assert_eq!(game.spin(), Err(GameError::InvalidPhase));

    let preview = game.starting_group().unwrap();
    assert_eq!(preview.group, 0);

    let events = game.apply_action(GameAction::StartGame).unwrap();
    assert_eq!(
        events,
        vec![GameEvent::GameStarted {
            starting_group: 0,
            roll: 1
        }]
    );
    assert_eq!(game.active_group(), Some(0));
    assert!(game.initial_rolls().is_empty());
}

#[test]
fn test_purple_starts_with_lowest_roll() {
    let game = started([5, 3, 8, 1], &[]);
    assert_eq!(game.active_group(), Some(3));
    assert_eq!(game.group(3).unwrap().color, DeckColor::Purple);
}

#[test]
fn test_tie_is_not_rerolled() {
    // Three groups share the minimum; the earliest created one starts
    let game = started([7, 2, 2, 2], &[]);
    assert_eq!(game.active_group(), Some(1));
}

#[test]
fn test_rolling_one_deals_second_card() {
    let mut game = started([1, 4, 4, 4], &[1]);
    let events = game.apply_action(GameAction::Spin).unwrap();

    let dealt = dealt_card(&events).unwrap();
    assert_eq!(dealt.deck, DeckColor::Red);
    assert_eq!(dealt.id, 2);
    assert_eq!(dealt.text, "JUGAR PERMITE EXPRESAR FANTASIAS.");
}

#[test]
fn test_modulo_pick_on_a_short_deck() {
    // Red spins 12 each round, everyone else skips
    let mut turns = Vec::new();
    for _ in 0..8 {
        turns.extend([12, 16, 16, 16]);
    }
    let mut game = started([1, 4, 4, 4], &turns);
    for _ in 0..8 {
        game.apply_action(GameAction::Spin).unwrap();
        game.apply_action(GameAction::Respond { agree: true }).unwrap();
        for _ in 0..3 {
            game.apply_action(GameAction::Spin).unwrap();
        }
    }
    assert_eq!(game.active_group(), Some(0));
    assert_eq!(game.decks().remaining(DeckColor::Red), 4);

    let available: Vec<CardId> = game
        .decks()
        .deck(DeckColor::Red)
        .available(&[])
        .map(|c| c.id)
        .collect();
    game.roll_source_mut().push_roll(6);
    game.apply_action(GameAction::Spin).unwrap();
    assert_eq!(game.current_card().unwrap().card.id, available[6 % 4]);
}

#[test]
fn test_two_extra_turns_then_turn_passes() {
    let mut game = started([1, 4, 4, 4], &[15, 15, 3, 4, 5]);

    let events = game.apply_action(GameAction::Spin).unwrap();
    let granted: Vec<u8> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ExtraTurnGranted { banked, .. } => Some(*banked),
            _ => None,
        })
        .collect();
    assert_eq!(granted, vec![1, 2]);
    assert_eq!(game.extra_turns(), 2);

    game.apply_action(GameAction::Respond { agree: true }).unwrap();
    assert_eq!(game.active_group(), Some(0));

    game.apply_action(GameAction::Spin).unwrap();
    game.apply_action(GameAction::Respond { agree: false }).unwrap();
    assert_eq!(game.active_group(), Some(0));

    game.apply_action(GameAction::Spin).unwrap();
    let events = game.apply_action(GameAction::Respond { agree: true }).unwrap();
    assert!(events.contains(&GameEvent::TurnPassed { from: 0, to: 1 }));
    assert_eq!(game.group(0).unwrap().card_count(), 3);
}

#[test]
fn test_reverse_changes_traversal_and_borrow_side() {
    // Red reverses, purple borrows from red (previous when counter-clockwise)
    let mut game = started([1, 4, 4, 4], &[13, 14]);

    game.apply_action(GameAction::Spin).unwrap();
    assert!(!game.is_clockwise());
    assert_eq!(game.active_group(), Some(3));

    game.roll_source_mut().push_pick(0);
    game.apply_action(GameAction::Spin).unwrap();
    let card = game.current_card().unwrap();
    assert_eq!(card.group, 3);
    assert_eq!(card.borrowed_from, Some(0));
    assert_eq!(card.card.deck, DeckColor::Red);
    assert_eq!(card.card.id, 1);

    let events = game.apply_action(GameAction::Respond { agree: true }).unwrap();
    assert!(events.contains(&GameEvent::TurnPassed { from: 3, to: 2 }));

    // The borrowed card keeps the lender's colors in purple's history
    let response = &game.group(3).unwrap().responses[0];
    assert_eq!(response.color, DeckColor::Red.text_color());
    assert_eq!(response.bg_color, DeckColor::Red.bg_color());
    assert_eq!(game.decks().used_count(DeckColor::Red), 1);
    assert_eq!(game.decks().used_count(DeckColor::Purple), 0);
}

#[test]
fn test_closing_a_card_passes_the_turn() {
    let mut game = started([1, 4, 4, 4], &[15, 8]);
    game.apply_action(GameAction::Spin).unwrap();
    assert_eq!(game.extra_turns(), 1);

    let events = game.apply_action(GameAction::CloseCard).unwrap();
    assert!(events.contains(&GameEvent::CardClosed { group: 0 }));
    assert_eq!(game.active_group(), Some(1));
    assert_eq!(game.extra_turns(), 1);
    assert_eq!(game.apply_action(GameAction::CloseCard), Err(GameError::NoCard));
}

#[test]
fn test_first_group_to_twelve_ends_the_game() {
    // Every spin deals from the group's own deck; red answers first each round
    let turns = vec![1; 45];
    let mut game = started([1, 4, 4, 4], &turns);

    let mut last = Vec::new();
    while !game.is_finished() {
        game.apply_action(GameAction::Spin).unwrap();
        last = game.apply_action(GameAction::Respond { agree: true }).unwrap();
    }

    assert_eq!(game.winner(), Some(0));
    assert_eq!(
        game.phase(),
        GamePhase::Ended {
            reason: EndReason::Completed { group: 0 }
        }
    );
    assert_eq!(game.group(0).unwrap().card_count(), 12);
    for other in 1..4 {
        assert_eq!(game.group(other).unwrap().card_count(), 11);
    }
    assert!(last.contains(&GameEvent::Celebration));
    assert!(!last.iter().any(|e| matches!(e, GameEvent::TurnPassed { .. })));
    assert_eq!(game.active_group(), Some(0));
    assert_eq!(game.decks().remaining(DeckColor::Red), 0);

    assert_eq!(game.apply_action(GameAction::Spin), Err(GameError::GameOver));
    assert!(game.advance_turn().is_empty());
}

#[test]
fn test_wheel_commits_after_delay() {
    let config = GameConfig::default();
    let mut game = started_with(config, [1, 4, 4, 4], &[2]);

    let events = game.apply_action(GameAction::Spin).unwrap();
    assert_eq!(events, vec![GameEvent::SpinStarted { group: 0 }]);
    assert!(game.is_spinning());
    assert_eq!(
        game.apply_action(GameAction::Spin),
        Err(GameError::SpinInProgress)
    );
    assert_eq!(
        game.apply_action(GameAction::Respond { agree: true }),
        Err(GameError::NoCard)
    );

    game.apply_action(GameAction::Tick).unwrap();
    game.apply_action(GameAction::Tick).unwrap();
    assert!(game.current_card().is_none());

    let events = game.apply_action(GameAction::Tick).unwrap();
    assert!(dealt_card(&events).is_some());
    assert!(!game.is_spinning());
    assert_eq!(game.card_timer().remaining(), 60);
}

#[test]
fn test_game_timer_fires_mid_card() {
    let config = GameConfig {
        game_seconds: 10,
        ..instant()
    };
    let mut game = started_with(config, [1, 4, 4, 4], &[4]);
    game.apply_action(GameAction::Spin).unwrap();
    assert!(game.current_card().is_some());

    let mut events = Vec::new();
    for _ in 0..10 {
        events.extend(game.apply_action(GameAction::Tick).unwrap());
    }

    assert_eq!(
        events,
        vec![GameEvent::GameOver {
            reason: EndReason::TimeUp
        }]
    );
    assert_eq!(
        game.phase(),
        GamePhase::Ended {
            reason: EndReason::TimeUp
        }
    );
    assert_eq!(game.winner(), None);
    assert!(game.current_card().is_none());
    assert!(!game.card_timer().is_running());

    let used = game.decks().used_count(DeckColor::Red);
    assert_eq!(
        game.apply_action(GameAction::Respond { agree: true }),
        Err(GameError::GameOver)
    );
    assert_eq!(game.apply_action(GameAction::Spin), Err(GameError::GameOver));
    assert_eq!(game.decks().used_count(DeckColor::Red), used);
}

#[test]
fn test_game_timer_cancels_a_pending_spin() {
    let config = GameConfig {
        game_seconds: 2,
        ..GameConfig::default()
    };
    let mut game = started_with(config, [1, 4, 4, 4], &[5]);
    game.apply_action(GameAction::Spin).unwrap();
    game.apply_action(GameAction::Tick).unwrap();
    game.apply_action(GameAction::Tick).unwrap();

    assert!(game.is_finished());
    assert!(!game.is_spinning());
    assert!(game.apply_action(GameAction::Tick).unwrap().is_empty());
    assert!(game.current_card().is_none());
}

#[test]
fn test_card_timer_expiry_passes_the_turn() {
    let config = GameConfig {
        card_seconds: 3,
        ..instant()
    };
    let mut game = started_with(config, [1, 4, 4, 4], &[9]);
    game.apply_action(GameAction::Spin).unwrap();

    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(game.apply_action(GameAction::Tick).unwrap());
    }
    assert_eq!(
        events,
        vec![
            GameEvent::CardTimeUp { group: 0 },
            GameEvent::TurnPassed { from: 0, to: 1 },
        ]
    );
    assert!(game.group(0).unwrap().responses.is_empty());
}

#[test]
fn test_answering_stops_the_card_timer() {
    let config = GameConfig {
        card_seconds: 2,
        ..instant()
    };
    let mut game = started_with(config, [1, 4, 4, 4], &[9]);
    game.apply_action(GameAction::Spin).unwrap();
    game.apply_action(GameAction::Tick).unwrap();
    game.apply_action(GameAction::Respond { agree: false }).unwrap();

    // The stale countdown must not fire into the next group's turn
    for _ in 0..5 {
        assert!(game.apply_action(GameAction::Tick).unwrap().is_empty());
    }
    assert_eq!(game.active_group(), Some(1));
}

#[test]
fn test_snapshot_serializes() {
    let mut game = started([1, 4, 4, 4], &[3]);
    game.apply_action(GameAction::Spin).unwrap();

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["phase"], "Playing");
    assert_eq!(json["active_group"], 0);
    assert_eq!(json["clockwise"], true);
    assert_eq!(json["current_card"]["card"]["deck"], "red");
    assert_eq!(json["card_seconds_left"], 60);
}

#[test]
fn test_actions_round_trip_through_json() {
    let action = GameAction::CreateGroup {
        name: "Rojo".into(),
        color: DeckColor::Red,
    };
    let json = serde_json::to_string(&action).unwrap();
    let back: GameAction = serde_json::from_str(&json).unwrap();
    assert_eq!(back, action);
}
