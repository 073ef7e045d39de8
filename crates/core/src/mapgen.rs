//! Procedural room generation split into coherent submodules.

mod generator;
mod grid;
mod layout;
mod objects;
mod seed;

pub use generator::RoomGenerator;

use crate::config::GameConfig;
use crate::room::Room;
use crate::types::{Direction, RoomCoord};

/// What is already known about the room across one edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SideConstraint {
    #[default]
    Unknown,
    /// The neighbour has a door facing this room.
    Open,
    /// The neighbour exists and has no door facing this room.
    Sealed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationContext {
    pub arriving_from: Option<Direction>,
    pub sides: [SideConstraint; 4],
}

impl GenerationContext {
    pub fn arriving_from(side: Direction) -> Self {
        Self { arriving_from: Some(side), ..Self::default() }
    }

    pub fn with_side(mut self, side: Direction, constraint: SideConstraint) -> Self {
        self.sides[side.slot()] = constraint;
        self
    }

    pub fn side(&self, side: Direction) -> SideConstraint {
        self.sides[side.slot()]
    }

    pub(crate) fn must_open(&self, side: Direction) -> bool {
        self.arriving_from == Some(side) || self.side(side) == SideConstraint::Open
    }

    pub(crate) fn is_free(&self, side: Direction) -> bool {
        self.arriving_from != Some(side) && self.side(side) == SideConstraint::Unknown
    }
}

pub fn generate_room(
    run_seed: u64,
    config: &GameConfig,
    coord: RoomCoord,
    context: &GenerationContext,
) -> Room {
    RoomGenerator::new(run_seed, config).generate(coord, context)
}
