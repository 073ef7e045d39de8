use roomwalk_core::{
    Direction, GameConfig, InputState, MovementModel, Pos, RoomCoord, Session, SessionEvent,
    TickOutcome,
};

const TILE: f32 = 40.0;

fn cell_center(cell: Pos) -> (f32, f32) {
    (cell.x as f32 * TILE + TILE / 2.0, cell.y as f32 * TILE + TILE / 2.0)
}

/// Walks the player until its centre sits on `cell`'s centre. Platformer walks only follow x.
fn walk_to(session: &mut Session, cell: Pos) {
    let (target_x, target_y) = cell_center(cell);
    let follow_y = session.config().movement == MovementModel::Dungeon;
    for _ in 0..2_000 {
        let (x, y) = session.player().center();
        let input = InputState {
            left: x > target_x,
            right: x < target_x,
            up: follow_y && y > target_y,
            down: follow_y && y < target_y,
            jump_pressed: false,
        };
        if input == InputState::IDLE {
            return;
        }
        assert_eq!(session.tick(&input), TickOutcome::Continued, "lane walk left the room");
    }
    panic!("player never reached {cell:?}");
}

fn walk_out(session: &mut Session, exit: Direction) -> TickOutcome {
    let (dx, dy) = exit.unit();
    let input = InputState {
        left: dx < 0,
        right: dx > 0,
        up: dy < 0,
        down: dy > 0,
        jump_pressed: false,
    };
    for _ in 0..2_000 {
        let outcome = session.tick(&input);
        if outcome != TickOutcome::Continued {
            return outcome;
        }
    }
    panic!("player never left through {exit:?}");
}

fn tour(seed: u64, movement: MovementModel, hops: usize) -> Session {
    let config = GameConfig::default().with_movement(movement);
    let mut session = Session::new(seed, config).expect("default config is valid");
    let mut arrival = None;

    for _ in 0..hops {
        let room = session.current_room();
        let anchor = room.anchor();
        let exit = Direction::ALL
            .into_iter()
            .find(|side| room.has_door(*side) && Some(*side) != arrival)
            .or(arrival)
            .expect("every room has a door");

        walk_to(&mut session, anchor);
        let from = session.current_coord();
        let outcome = walk_out(&mut session, exit);

        let to = from.step(exit);
        assert_eq!(outcome, TickOutcome::RoomChanged { from, to }, "seed {seed}");
        let room = session.current_room();
        assert!(room.has_door(exit.opposite()), "seed {seed}: no door back to {from:?}");
        assert_eq!(session.player().center_cell(TILE), room.entry_cell(exit.opposite()));
        arrival = Some(exit.opposite());
    }
    session
}

#[test]
fn dungeon_tour_keeps_every_room_connected() {
    for seed in 0..40 {
        let session = tour(seed, MovementModel::Dungeon, 8);
        assert!(session.rooms_generated() >= 2);
        let entered = session
            .log()
            .iter()
            .filter(|event| matches!(event, SessionEvent::RoomEntered { .. }))
            .count();
        assert_eq!(entered, 8);
        assert_eq!(session.items_collected(), 0);
    }
}

#[test]
fn platformer_tour_moves_only_along_the_horizontal_axis() {
    for seed in 0..40 {
        let session = tour(seed, MovementModel::Platformer, 6);
        assert_eq!(session.current_coord().y, 0, "seed {seed}");
        for coord in session.rooms().coords() {
            assert_eq!(coord.y, 0);
        }
    }
}

#[test]
fn going_back_and_forth_never_regenerates_a_room() {
    let config = GameConfig::default();
    let mut session = Session::new(77, config).expect("default config is valid");
    let exit = Direction::ALL
        .into_iter()
        .find(|side| session.current_room().has_door(*side))
        .expect("every room has a door");
    let origin_fingerprint = session.current_room().fingerprint();

    for round in 0..4 {
        let side = if round % 2 == 0 { exit } else { exit.opposite() };
        let anchor = session.current_room().anchor();
        walk_to(&mut session, anchor);
        walk_out(&mut session, side);
    }

    assert_eq!(session.current_coord(), RoomCoord::ORIGIN);
    assert_eq!(session.current_room().fingerprint(), origin_fingerprint);
    assert_eq!(session.rooms_generated(), 2);
}
