//! The single source of truth for rooms that have already been generated.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use slotmap::{SlotMap, new_key_type};

use crate::mapgen::{GenerationContext, RoomGenerator, SideConstraint};
use crate::room::Room;
use crate::types::{Direction, RoomCoord};

new_key_type! {
    pub struct RoomId;
}

#[derive(Clone, Default)]
pub struct RoomCache {
    rooms: SlotMap<RoomId, Room>,
    by_coord: BTreeMap<RoomCoord, RoomId>,
}

impl RoomCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the room at `coord`, generating it on first request.
    ///
    /// Edges shared with rooms already in the cache are constrained to match them, so a door
    /// always leads to a door whichever way the lattice is walked.
    pub fn get_or_create(
        &mut self,
        coord: RoomCoord,
        context: &GenerationContext,
        generator: &RoomGenerator,
    ) -> RoomId {
        if let Some(&id) = self.by_coord.get(&coord) {
            return id;
        }

        let mut constrained = *context;
        for side in Direction::ALL {
            if let Some(neighbour) = self.at(coord.step(side)) {
                let constraint = if neighbour.has_door(side.opposite()) {
                    SideConstraint::Open
                } else {
                    SideConstraint::Sealed
                };
                constrained = constrained.with_side(side, constraint);
            }
        }

        let room = generator.generate(coord, &constrained);
        let id = self.rooms.insert(room);
        self.by_coord.insert(coord, id);
        id
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    pub fn id_at(&self, coord: RoomCoord) -> Option<RoomId> {
        self.by_coord.get(&coord).copied()
    }

    pub fn at(&self, coord: RoomCoord) -> Option<&Room> {
        self.id_at(coord).and_then(|id| self.rooms.get(id))
    }

    pub fn contains(&self, coord: RoomCoord) -> bool {
        self.by_coord.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = RoomCoord> + '_ {
        self.by_coord.keys().copied()
    }

    /// Stores a prebuilt room, replacing whatever was cached at its coordinate.
    #[cfg(test)]
    pub(crate) fn insert(&mut self, room: Room) -> RoomId {
        if let Some(old) = self.by_coord.remove(&room.coord) {
            self.rooms.remove(old);
        }
        let coord = room.coord;
        let id = self.rooms.insert(room);
        self.by_coord.insert(coord, id);
        id
    }
}

impl Index<RoomId> for RoomCache {
    type Output = Room;

    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id]
    }
}

impl IndexMut<RoomId> for RoomCache {
    fn index_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id]
    }
}
