use lib_tetribot::prelude::*;

fn row(pattern: &str) -> Row {
    parse_row(pattern).unwrap()
}

fn seeded() -> Game {
    Game::with_seed(Options::default(), 1234).unwrap()
}

/// Overwrite the falling piece with a spawn-fresh kind, the way a scripted
/// scenario pins its inputs.
fn force_piece(game: &mut Game, piece: Piece) {
    game.current = PieceData::spawn(piece, game.options.board_height, game.options.board_width);
    game.is_immobile = false;
}

fn set_board(game: &mut Game, rows_bottom_up: &[&str]) {
    game.board = Board::from_rows(rows_bottom_up.iter().map(|pattern| row(pattern)).collect(), 10);
}

fn clear_event(events: &[Event]) -> Option<&Event> {
    events.iter().find(|event| matches!(event, Event::Clear { .. }))
}

#[test]
fn sonic_drop_rests_the_i_bar_at_one() {
    let mut game = seeded();
    force_piece(&mut game, Piece::I);
    game.execute_command(Command::SonicDrop).unwrap();
    assert_eq!(game.current.y, 1);
}

#[test]
fn horizontal_movement_respects_the_walls() {
    let mut game = seeded();
    force_piece(&mut game, Piece::I);
    assert_eq!(game.current.x, 3);
    game.execute_command(Command::MoveRight).unwrap();
    assert_eq!(game.current.x, 4);
    game.execute_command(Command::SonicLeft).unwrap();
    assert_eq!(game.current.x, 0);
    game.execute_command(Command::MoveLeft).unwrap();
    assert_eq!(game.current.x, 0);
}

#[test]
fn hard_drop_writes_the_bar_into_row_zero() {
    // S1: one I, one hard drop, one row
    let mut game = seeded();
    force_piece(&mut game, Piece::I);
    let events = game.execute_command(Command::HardDrop).unwrap();

    assert_eq!(game.board.rows(), &[row("...IIII...")]);
    assert!(clear_event(&events).is_none());
    match &events[0] {
        Event::PiecePlaced { initial, r#final } => {
            assert_eq!(initial.y, 20);
            assert_eq!(r#final.y, 1);
            assert_eq!(r#final.x, 3);
        }
        other => panic!("expected piece_placed first, got {other:?}"),
    }
}

#[test]
fn tspin_double_scores_as_all_spin() {
    // S2: rotate into the slot, then kick down into the pocket
    let mut game = seeded();
    set_board(&mut game, &["GGGG.GGGGG", "GGG...GGGG", "...G..G...", ".........."]);
    force_piece(&mut game, Piece::T);

    let events = game
        .execute_commands(&[Command::RotateCw, Command::SonicDrop, Command::RotateCw, Command::HardDrop])
        .unwrap();

    match clear_event(&events).expect("the drop should clear") {
        Event::Clear { clear_name, all_spin, attack, combo, .. } => {
            assert_eq!(*clear_name, ClearName::AllSpinDouble);
            assert_eq!(clear_name.as_str(), "All-Spin Double");
            assert!(*all_spin);
            assert_eq!(*attack, 4);
            assert_eq!(*combo, 1);
        }
        _ => unreachable!(),
    }
    assert!(game.b2b);
}

#[test]
fn tspin_double_carries_the_b2b_bonus_when_armed() {
    let mut game = seeded();
    game.b2b = true;
    set_board(&mut game, &["GGGG.GGGGG", "GGG...GGGG", "...G..G..."]);
    force_piece(&mut game, Piece::T);

    let events = game
        .execute_commands(&[Command::RotateCw, Command::SonicDrop, Command::RotateCw, Command::HardDrop])
        .unwrap();

    match clear_event(&events).expect("the drop should clear") {
        Event::Clear { attack, b2b, .. } => {
            assert_eq!(*attack, 4 + 1);
            assert!(*b2b);
        }
        _ => unreachable!(),
    }
}

#[test]
fn vertical_i_into_the_well_is_a_perfect_clear() {
    // S3: four full-height columns each side of a one-column well
    let mut game = seeded();
    set_board(
        &mut game,
        &["GGGGG.GGGG", "GGGGG.GGGG", "GGGGG.GGGG", "GGGGG.GGGG"],
    );
    force_piece(&mut game, Piece::I);

    let events = game
        .execute_commands(&[Command::RotateCcw, Command::MoveRight, Command::HardDrop])
        .unwrap();

    match clear_event(&events).expect("the drop should clear") {
        Event::Clear { clear_name, attack, pc, cleared_lines, .. } => {
            assert_eq!(*clear_name, ClearName::PerfectClear);
            assert_eq!(clear_name.as_str(), "Perfect Clear");
            assert!(*pc);
            assert_eq!(*attack, 10);
            assert_eq!(cleared_lines.len(), 4);
        }
        _ => unreachable!(),
    }
    assert!(game.board.is_perfect_clear());
    assert!(game.b2b);
}

#[test]
fn outgoing_attack_cancels_queued_garbage_first() {
    // S4: a quad against four delay-0 lines nets to zero
    let mut game = seeded();
    set_board(
        &mut game,
        &["GGGGG.GGGG", "GGGGG.GGGG", "GGGGG.GGGG", "GGGGG.GGGG", "G........."],
    );
    force_piece(&mut game, Piece::I);
    game.queue_garbage_lines((0..4).map(|index| GarbageLine { delay: 0, index }));

    let events = game
        .execute_commands(&[Command::RotateCcw, Command::MoveRight, Command::HardDrop])
        .unwrap();

    match clear_event(&events).expect("the drop should clear") {
        Event::Clear { clear_name, attack, cancelled, .. } => {
            assert_eq!(*clear_name, ClearName::Quad);
            assert_eq!(*attack, 0);
            assert_eq!(*cancelled, 4);
        }
        _ => unreachable!(),
    }
    assert!(game.garbage_queue.is_empty());
    assert!(!events.iter().any(|event| matches!(event, Event::DamageTanked { .. })));
}

#[test]
fn expired_garbage_materializes_under_a_tanked_placement() {
    // S5: two delay-0 lines with holes at 2 and 5
    let mut game = seeded();
    force_piece(&mut game, Piece::O);
    game.queue_garbage_lines([GarbageLine { delay: 0, index: 2 }, GarbageLine { delay: 0, index: 5 }]);

    let events = game.execute_command(Command::HardDrop).unwrap();

    let tanked = events
        .iter()
        .find_map(|event| match event {
            Event::DamageTanked { hole_indices } => Some(hole_indices.clone()),
            _ => None,
        })
        .expect("the placement should tank damage");
    assert_eq!(tanked, vec![2, 5]);

    // first dequeued line ends up highest among the new bottom rows
    assert_eq!(game.board.rows()[0], row("GGGGG.GGGG"));
    assert_eq!(game.board.rows()[1], row("GG.GGGGGGG"));
    // the O locked before the garbage arrived, so it sits on top
    assert_eq!(game.board.rows()[2], row("....OO...."));
    assert_eq!(game.board.rows()[3], row("....OO...."));
}

#[test]
fn combo_counts_consecutive_clears() {
    // S6: five singles in a row walk the combo table
    let mut game = seeded();
    let mut combos = Vec::new();
    let mut attacks = Vec::new();

    for _ in 0..5 {
        set_board(&mut game, &["GGGG..GGGG"]);
        force_piece(&mut game, Piece::O);
        let events = game.execute_command(Command::HardDrop).unwrap();
        match clear_event(&events).expect("each O should clear a single") {
            Event::Clear { clear_name, combo, attack, .. } => {
                assert_eq!(*clear_name, ClearName::Single);
                combos.push(*combo);
                attacks.push(*attack);
            }
            _ => unreachable!(),
        }
    }

    assert_eq!(combos, vec![1, 2, 3, 4, 5]);
    assert_eq!(attacks, vec![0, 0, 1, 1, 1]);
}

#[test]
fn a_non_clearing_placement_resets_the_combo() {
    let mut game = seeded();
    set_board(&mut game, &["GGGG..GGGG"]);
    force_piece(&mut game, Piece::O);
    game.execute_command(Command::HardDrop).unwrap();
    assert_eq!(game.combo, 1);

    force_piece(&mut game, Piece::O);
    game.execute_command(Command::HardDrop).unwrap();
    assert_eq!(game.combo, 0);
}

#[test]
fn garbage_delay_ticks_down_once_per_tanked_placement() {
    let mut game = seeded();
    game.queue_garbage(&[3]); // default delay 1

    force_piece(&mut game, Piece::O);
    let events = game.execute_command(Command::HardDrop).unwrap();
    assert!(!events.iter().any(|event| matches!(event, Event::DamageTanked { .. })));
    assert_eq!(game.garbage_queue.front().map(|line| line.delay), Some(0));

    force_piece(&mut game, Piece::O);
    game.current.x = 0; // keep the stack flat enough to never clear
    let events = game.execute_command(Command::HardDrop).unwrap();
    assert!(events.iter().any(|event| matches!(event, Event::DamageTanked { .. })));
    assert!(game.garbage_queue.is_empty());
    assert_eq!(game.board.rows()[0], row("GGG.GGGGGG"));
}

#[test]
fn dangerous_drop_teleports_a_matching_kind() {
    let mut game = seeded();
    force_piece(&mut game, Piece::T);
    let target = PieceData { piece: Piece::T, x: 0, y: 1, rotation: 0 };

    let events = game.dangerously_drop_piece(target).unwrap();
    match &events[0] {
        Event::PiecePlaced { r#final, .. } => assert_eq!(*r#final, target),
        other => panic!("expected piece_placed, got {other:?}"),
    }
    assert_eq!(game.board.rows()[0], row("TTT......."));
    assert_eq!(game.board.rows()[1], row(".T........"));
}

#[test]
fn dangerous_drop_swaps_through_hold_for_the_other_kind() {
    let mut game = seeded();
    let upcoming = *game.queue.front().unwrap();
    let parked = if upcoming == Piece::T { Piece::S } else { Piece::T };
    force_piece(&mut game, parked);
    let target = PieceData::spawn(upcoming, 20, 10).offset(0, -19);

    game.dangerously_drop_piece(target).unwrap();
    assert_eq!(game.held, Some(parked));
    assert!(!game.can_hold);
}

#[test]
fn dangerous_drop_refuses_when_hold_is_spent() {
    let mut game = seeded();
    force_piece(&mut game, Piece::T);
    game.can_hold = false;
    let upcoming = *game.queue.front().unwrap();
    let mismatched = if upcoming == Piece::T { Piece::S } else { upcoming };

    let target = PieceData::spawn(mismatched, 20, 10);
    assert_eq!(game.dangerously_drop_piece(target), Err(GameError::HoldRefused));
    assert_eq!(game.pieces_placed, 0);
}

#[test]
fn topping_out_emits_game_over_and_locks_the_game() {
    let mut game = seeded();
    // a center tower reaching the spawn window kills the respawn, while
    // the current piece still has room at the left wall
    game.board = Board::from_rows(vec![row("...GGGG..."); 20], 10);
    force_piece(&mut game, Piece::O);
    game.current.x = 0;

    let events = game.execute_command(Command::HardDrop).unwrap();
    assert_eq!(events.last(), Some(&Event::GameOver));
    assert!(game.dead);
    assert_eq!(game.execute_command(Command::MoveLeft), Err(GameError::GameOver));
}

#[test]
fn snapshot_hydration_rerolls_garbage_holes_locally() {
    let mut game = seeded();
    game.queue_garbage(&[7, 7, 7]);
    let snapshot = game.snapshot();
    assert!(snapshot.garbage_queued.iter().all(|line| line.delay == 1));

    let options = Options { garbage_messiness: 0.0, ..Options::default() };
    let hydrated = Game::from_snapshot_seeded(&snapshot, options, 99).unwrap();
    assert_eq!(hydrated.garbage_queue.len(), 3);
    let first = hydrated.garbage_queue[0].index;
    assert!(hydrated.garbage_queue.iter().all(|line| line.index == first));
    assert!(first < 10);
}

#[test]
fn event_payloads_serialize_for_the_wire() {
    let mut game = seeded();
    set_board(&mut game, &["GGGG..GGGG"]);
    force_piece(&mut game, Piece::O);
    let events = game.execute_command(Command::HardDrop).unwrap();
    let json = serde_json::to_string(&events).unwrap();

    assert!(json.contains("\"type\":\"piece_placed\""));
    assert!(json.contains("\"type\":\"clear\""));
    assert!(json.contains("\"clearName\":\"Single\""));
    assert!(json.contains("\"clearedLines\""));
}

#[test]
fn tspin_double_via_ccw_wallkick() {
    // same slot as the clockwise variant, entered from the right side
    let mut game = seeded();
    set_board(&mut game, &["GGGG.GGGGG", "GGG...GGGG", "...G..G...", ".........."]);
    force_piece(&mut game, Piece::T);

    let events = game
        .execute_commands(&[
            Command::MoveRight,
            Command::RotateCcw,
            Command::SonicDrop,
            Command::RotateCcw,
            Command::HardDrop,
        ])
        .unwrap();

    match clear_event(&events).expect("the drop should clear") {
        Event::Clear { clear_name, attack, .. } => {
            assert_eq!(*clear_name, ClearName::AllSpinDouble);
            assert_eq!(*attack, 4);
        }
        _ => unreachable!(),
    }
}

#[test]
fn all_spin_single_in_the_right_corner() {
    let mut game = seeded();
    set_board(&mut game, &["GGGGGGG...", "GGGGGGGG..", "GGGGGGGG.."]);
    force_piece(&mut game, Piece::T);

    let events = game
        .execute_commands(&[
            Command::RotateCcw,
            Command::SonicRight,
            Command::SonicDrop,
            Command::RotateCw,
            Command::HardDrop,
        ])
        .unwrap();

    match clear_event(&events).expect("the drop should clear") {
        Event::Clear { clear_name, all_spin, .. } => {
            assert_eq!(*clear_name, ClearName::AllSpinSingle);
            assert!(*all_spin);
        }
        _ => unreachable!(),
    }
}

#[test]
fn all_spin_triple_through_the_side_door() {
    let mut game = seeded();
    set_board(
        &mut game,
        &["GGGGGG.GGG", "GGGGG..GGG", "GGGGGG.GGG", ".......GGG", "......GGGG"],
    );
    force_piece(&mut game, Piece::T);

    let events = game
        .execute_commands(&[
            Command::SonicDrop,
            Command::SonicRight,
            Command::RotateCcw,
            Command::HardDrop,
        ])
        .unwrap();

    match clear_event(&events).expect("the drop should clear") {
        Event::Clear { clear_name, attack, .. } => {
            assert_eq!(*clear_name, ClearName::AllSpinTriple);
            assert_eq!(*attack, 6);
        }
        _ => unreachable!(),
    }
}

#[test]
fn sonic_right_singles_and_triples_clear_by_count() {
    let mut game = seeded();
    set_board(&mut game, &["IIIIII....", "I........."]);
    force_piece(&mut game, Piece::I);
    let events = game
        .execute_commands(&[Command::SonicRight, Command::HardDrop])
        .unwrap();
    match clear_event(&events).expect("the bar should finish the row") {
        Event::Clear { clear_name, .. } => assert_eq!(*clear_name, ClearName::Single),
        _ => unreachable!(),
    }

    set_board(
        &mut game,
        &["IIIIIIIII.", "IIIIIIIII.", "IIIIIIII..", "I........."],
    );
    force_piece(&mut game, Piece::L);
    let events = game
        .execute_commands(&[Command::RotateCcw, Command::SonicRight, Command::HardDrop])
        .unwrap();
    match clear_event(&events).expect("the corner should finish three rows") {
        Event::Clear { clear_name, .. } => assert_eq!(*clear_name, ClearName::Triple),
        _ => unreachable!(),
    }
}

#[test]
fn garbage_delays_materialize_one_wave_per_placement() {
    let mut game = seeded();
    game.queue_garbage_lines(
        [0, 0, 1, 2]
            .into_iter()
            .enumerate()
            .map(|(index, delay)| GarbageLine { delay, index: index + 1 }),
    );
    assert!(!game.board.rows().iter().flatten().flatten().any(Block::is_garbage));

    // wave one: both delay-0 lines arrive under the first bar
    force_piece(&mut game, Piece::I);
    game.execute_command(Command::HardDrop).unwrap();
    let garbage_rows = |game: &Game| {
        game.board
            .rows()
            .iter()
            .map(|row| row.iter().flatten().any(Block::is_garbage))
            .collect::<Vec<_>>()
    };
    assert_eq!(garbage_rows(&game), vec![true, true, false]);

    // wave two: the delay-1 line has counted down
    force_piece(&mut game, Piece::I);
    game.execute_command(Command::HardDrop).unwrap();
    assert_eq!(garbage_rows(&game), vec![true, true, true, false, false]);

    // wave three: the last line lands
    force_piece(&mut game, Piece::I);
    game.execute_command(Command::HardDrop).unwrap();
    assert_eq!(
        garbage_rows(&game),
        vec![true, true, true, true, false, false, false]
    );
}
