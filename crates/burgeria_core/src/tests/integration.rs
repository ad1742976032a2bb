use super::*;

#[test]
fn full_service_flow_pays_out_price_plus_tip() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let number = seed_waiting_customer(&mut state, &[
        IngredientKind::BottomBun,
        IngredientKind::Patty,
        IngredientKind::TopBun,
    ]);

    apply(&mut state, &content, &mut rng, Command::SelectOrder { number });
    apply(&mut state, &content, &mut rng, Command::PlaceRawPatty {
        row: 0,
        col: 0,
    });
    for _ in 0..16 {
        tick(&mut state, &[], &content, &mut rng, EventLevel::Normal);
    }
    apply(&mut state, &content, &mut rng, Command::TakePattyOffGrill {
        row: 0,
        col: 0,
    });
    let patty_id = state.cooked_tray[0].id.clone();

    apply(&mut state, &content, &mut rng, Command::AddIngredient {
        kind: IngredientKind::BottomBun,
        accuracy: 1.0,
    });
    apply(&mut state, &content, &mut rng, Command::AddPattyFromTray {
        patty: patty_id,
        accuracy: 1.0,
    });
    apply(&mut state, &content, &mut rng, Command::AddIngredient {
        kind: IngredientKind::TopBun,
        accuracy: 1.0,
    });

    let events = apply(&mut state, &content, &mut rng, Command::ServeBurger);

    let evaluated = events
        .iter()
        .find_map(|e| match &e.event {
            Event::BurgerEvaluated {
                score,
                payment,
                tip,
                ..
            } => Some((*score, *payment, *tip)),
            _ => None,
        })
        .unwrap();
    assert!((evaluated.0 - 1.0).abs() < 1e-5);
    // Bun, patty, bun price the order at 2 + 5 + 2.
    assert_eq!(evaluated.1, 9);
    assert_eq!(evaluated.2, 2);

    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::CustomerServed { .. })));
    assert!(events.iter().any(|e| matches!(
        e.event,
        Event::BalanceChanged {
            delta: 11,
            balance: 11,
        }
    )));
    assert_eq!(state.balance, 11);
    assert!(state.assembly.is_empty());
    assert_eq!(state.register.selected_order, None);
    assert!(state.register.wait_line.is_empty());
}

#[test]
fn serving_an_empty_assembly_pays_nothing() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let number = seed_waiting_customer(&mut state, &[
        IngredientKind::BottomBun,
        IngredientKind::Patty,
        IngredientKind::TopBun,
    ]);

    apply(&mut state, &content, &mut rng, Command::SelectOrder { number });
    let events = apply(&mut state, &content, &mut rng, Command::ServeBurger);

    assert!(events.iter().any(|e| matches!(
        e.event,
        Event::BurgerEvaluated {
            payment: 0,
            tip: 0,
            ..
        }
    )));
    assert_eq!(state.balance, 0);
    // The customer still leaves, unhappy or not.
    assert!(state.register.wait_line.is_empty());
}

#[test]
fn commands_run_only_on_their_scheduled_tick() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();

    let mut envelope = cmd(&state, Command::PlaceRawPatty { row: 0, col: 0 });
    envelope.execute_at_tick = state.meta.tick + 2;

    let events = tick(
        &mut state,
        &[envelope.clone()],
        &content,
        &mut rng,
        EventLevel::Normal,
    );
    assert!(events.is_empty());
    assert_eq!(state.grill.occupied_count(), 0);

    tick(&mut state, &[], &content, &mut rng, EventLevel::Normal);

    let events = tick(
        &mut state,
        &[envelope],
        &content,
        &mut rng,
        EventLevel::Normal,
    );
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::PattyPlaced { .. })));
    assert_eq!(state.grill.occupied_count(), 1);
}

#[test]
fn ticking_advances_the_clock_without_commands() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();

    for _ in 0..5 {
        tick(&mut state, &[], &content, &mut rng, EventLevel::Normal);
    }
    assert_eq!(state.meta.tick, 5);
}

#[test]
fn identical_seeds_replay_to_identical_sessions() {
    let content = test_content();

    let run = || {
        let mut state = test_state(&content);
        let mut rng = make_rng();
        let mut log = Vec::new();
        for command in [
            Command::SpawnCustomer,
            Command::TakeOrder,
            Command::SpawnCustomer,
            Command::PlaceRawPatty { row: 1, col: 1 },
            Command::StartNextDay,
            Command::SpawnCustomer,
        ] {
            log.extend(apply(&mut state, &content, &mut rng, command));
        }
        for _ in 0..10 {
            log.extend(tick(&mut state, &[], &content, &mut rng, EventLevel::Normal));
        }
        (format!("{log:?}"), format!("{state:?}"))
    };

    assert_eq!(run(), run());
}
