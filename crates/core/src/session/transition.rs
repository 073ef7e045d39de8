//! Room-to-room transitions through border doors.
//! This module exists to keep neighbour lookup and arrival placement in one synchronous step.
//! It does not own room generation; the cache and generator decide what the neighbour looks like.

use super::*;

impl Session {
    /// Moves the player through the door on `exit` into the neighbouring room.
    ///
    /// The player lands centred on the cell just inside the arrival door, never on the door
    /// itself, so the same door cannot fire again on the next tick.
    pub(super) fn transition(&mut self, exit: Direction) -> TickOutcome {
        let from = self.current_coord();
        let to = from.step(exit);
        let arrival = exit.opposite();
        let first_visit = !self.cache.contains(to);

        let id = self.cache.get_or_create(
            to,
            &GenerationContext::arriving_from(arrival),
            &self.generator,
        );
        let room = &mut self.cache[id];
        // A neighbour sealed on every side was given a door it could not match.
        room.open_door(arrival);

        self.current = id;
        self.player.place_on_cell(room.entry_cell(arrival), self.config.tile_size);
        self.weather.switch_to(room.environment);
        self.record(SessionEvent::RoomEntered { coord: to, via: arrival, first_visit });

        TickOutcome::RoomChanged { from, to }
    }
}
