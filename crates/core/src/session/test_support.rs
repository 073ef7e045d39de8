//! Shared fixtures for the `session` submodule test suites.
//! This module exists to avoid repeating room setup across contact and transition tests.
//! It does not own production gameplay logic.

use super::*;
use crate::environment::Environment;

/// Tile size used by every fixture; matches the default config.
pub(super) const TILE: f32 = 40.0;

pub(super) const RIGHT: InputState = InputState { right: true, ..InputState::IDLE };
pub(super) const LEFT: InputState = InputState { left: true, ..InputState::IDLE };

/// A walled dungeon room with an all-floor interior and the given doors.
pub(super) fn open_room(coord: RoomCoord, doors: &[Direction]) -> Room {
    let config = GameConfig::default();
    let (width, height) = (config.room_width, config.room_height);
    let mut tiles = vec![TileKind::Floor; width * height];
    for y in 0..height {
        for x in 0..width {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                tiles[y * width + x] = TileKind::Wall;
            }
        }
    }
    let mut room = Room {
        coord,
        width,
        height,
        tiles,
        profile: RoomProfile::Dungeon,
        environment: Environment::Clear,
    };
    for side in doors {
        room.set_tile(room.door_position(*side), TileKind::Door);
    }
    room
}

/// Session whose origin room is replaced by `room`, with the player centred on `start`.
pub(super) fn session_with_room(room: Room, start: Pos) -> Session {
    let mut session = Session::new(7, GameConfig::default()).expect("default config is valid");
    session.current = session.cache.insert(room);
    session.player.place_on_cell(start, TILE);
    let environment = session.current_room().environment;
    session.weather.switch_to(environment);
    session
}

pub(super) fn open_dungeon_session() -> Session {
    let room = open_room(RoomCoord::ORIGIN, &[Direction::East]);
    let start = room.anchor();
    session_with_room(room, start)
}

/// Ticks with `input` until `done` holds, failing the test after `limit` ticks.
pub(super) fn tick_until(
    session: &mut Session,
    input: InputState,
    limit: u32,
    mut done: impl FnMut(&Session, TickOutcome) -> bool,
) -> TickOutcome {
    for _ in 0..limit {
        let outcome = session.tick(&input);
        if done(session, outcome) {
            return outcome;
        }
    }
    panic!("condition not reached within {limit} ticks");
}
