//! Effects of the tile under the player once movement has settled.

use super::*;

impl Session {
    pub(super) fn resolve_contact(&mut self) -> TickOutcome {
        let cell = self.player.center_cell(self.config.tile_size);
        let room = &mut self.cache[self.current];
        let coord = room.coord;

        match room.tile_at(cell) {
            TileKind::Door => match room.border_side(cell) {
                Some(exit) => self.transition(exit),
                None => TickOutcome::Continued,
            },
            TileKind::Item => {
                room.set_tile(cell, TileKind::Floor);
                self.items_collected += 1;
                self.record(SessionEvent::ItemCollected { coord, tile: cell });
                TickOutcome::Continued
            }
            TileKind::Trap => {
                room.set_tile(cell, TileKind::Floor);
                self.player.apply_penalty(
                    self.tick + self.config.trap_penalty_ticks,
                    self.config.trap_speed_factor,
                );
                let until_tick =
                    self.player.penalty.map_or(self.tick, |penalty| penalty.until_tick);
                self.record(SessionEvent::TrapTriggered { coord, tile: cell, until_tick });
                TickOutcome::Continued
            }
            TileKind::Monster => {
                self.status = SessionStatus::Defeated;
                self.record(SessionEvent::PlayerDefeated { coord, tile: cell });
                TickOutcome::Defeated
            }
            TileKind::Floor | TileKind::Wall | TileKind::Obstacle => TickOutcome::Continued,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn room_with(tiles: &[(Pos, TileKind)]) -> Room {
        let mut room = open_room(RoomCoord::ORIGIN, &[Direction::East]);
        for (pos, tile) in tiles {
            room.set_tile(*pos, *tile);
        }
        room
    }

    fn trap_events(session: &Session) -> Vec<u64> {
        session
            .log()
            .iter()
            .filter_map(|event| match event {
                SessionEvent::TrapTriggered { until_tick, .. } => Some(*until_tick),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn walking_onto_an_item_collects_it_once() {
        let item = Pos { y: 6, x: 6 };
        let mut session =
            session_with_room(room_with(&[(item, TileKind::Item)]), Pos { y: 6, x: 5 });

        tick_until(&mut session, RIGHT, 20, |session, _| session.items_collected() == 1);

        assert_eq!(session.current_room().tile_at(item), TileKind::Floor);
        assert_eq!(
            session.log(),
            &[SessionEvent::ItemCollected { coord: RoomCoord::ORIGIN, tile: item }]
        );
        for _ in 0..3 {
            session.tick(&InputState::IDLE);
        }
        assert_eq!(session.items_collected(), 1);
    }

    #[test]
    fn second_trap_extends_the_penalty_without_compounding_it() {
        let first = Pos { y: 6, x: 6 };
        let second = Pos { y: 6, x: 9 };
        let mut session = session_with_room(
            room_with(&[(first, TileKind::Trap), (second, TileKind::Trap)]),
            Pos { y: 6, x: 5 },
        );

        tick_until(&mut session, RIGHT, 20, |session, _| trap_events(session).len() == 1);
        assert_eq!(session.player().speed(), 2.5);
        assert_eq!(session.current_room().tile_at(first), TileKind::Floor);

        tick_until(&mut session, RIGHT, 200, |session, _| trap_events(session).len() == 2);
        assert_eq!(session.player().speed(), 2.5);

        let until = trap_events(&session);
        assert!(until[1] > until[0]);
        let last_until = until[1];

        while session.tick_count() + 1 < last_until {
            session.tick(&InputState::IDLE);
            assert_eq!(session.player().speed(), 2.5, "tick {}", session.tick_count());
        }
        session.tick(&InputState::IDLE);
        assert_eq!(session.tick_count(), last_until);
        assert_eq!(session.player().speed(), 5.0);

        let restores: Vec<_> = session
            .log()
            .iter()
            .filter(|event| matches!(event, SessionEvent::SpeedRestored { .. }))
            .collect();
        assert_eq!(restores, [&SessionEvent::SpeedRestored { tick: last_until }]);
    }

    #[test]
    fn trap_slows_movement_to_the_configured_factor() {
        let trap = Pos { y: 6, x: 6 };
        let mut session =
            session_with_room(room_with(&[(trap, TileKind::Trap)]), Pos { y: 6, x: 5 });
        tick_until(&mut session, RIGHT, 20, |session, _| !trap_events(session).is_empty());

        let before = session.player().x;
        session.tick(&RIGHT);
        assert_eq!(session.player().x - before, 2.5);
    }

    #[test]
    fn touching_a_monster_ends_the_session() {
        let monster = Pos { y: 6, x: 6 };
        let mut session =
            session_with_room(room_with(&[(monster, TileKind::Monster)]), Pos { y: 6, x: 5 });

        let outcome =
            tick_until(&mut session, RIGHT, 20, |_, outcome| outcome == TickOutcome::Defeated);
        assert_eq!(outcome, TickOutcome::Defeated);
        assert_eq!(session.status(), SessionStatus::Defeated);

        let ticks = session.tick_count();
        let position = (session.player().x, session.player().y);
        assert_eq!(session.tick(&RIGHT), TickOutcome::Defeated);
        assert_eq!(session.tick_count(), ticks);
        assert_eq!((session.player().x, session.player().y), position);
        assert!(matches!(session.log().back(), Some(SessionEvent::PlayerDefeated { .. })));
    }

    #[test]
    fn obstacles_stop_the_player_before_their_tile() {
        let obstacle = Pos { y: 6, x: 7 };
        let mut session =
            session_with_room(room_with(&[(obstacle, TileKind::Obstacle)]), Pos { y: 6, x: 5 });
        for _ in 0..40 {
            session.tick(&RIGHT);
        }
        let player = session.player();
        assert_eq!(player.x + player.width, 7.0 * TILE);
        assert!(session.log().is_empty());
    }
}
