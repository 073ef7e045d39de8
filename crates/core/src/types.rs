use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Floor,
    Wall,
    Door,
    Obstacle,
    Item,
    Monster,
    Trap,
}

impl TileKind {
    pub const fn code(self) -> u8 {
        match self {
            Self::Floor => 0,
            Self::Wall => 1,
            Self::Door => 2,
            Self::Obstacle => 3,
            Self::Item => 4,
            Self::Monster => 5,
            Self::Trap => 6,
        }
    }

    /// Tiles the player's bounding box may never overlap.
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Obstacle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Unit step as `(dx, dy)`; north is negative y on both the room lattice and the tile grid.
    pub const fn unit(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomCoord {
    pub x: i32,
    pub y: i32,
}

impl RoomCoord {
    pub const ORIGIN: RoomCoord = RoomCoord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementModel {
    #[default]
    Dungeon,
    Platformer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Exploring,
    Defeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continued,
    RoomChanged { from: RoomCoord, to: RoomCoord },
    Defeated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    RoomEntered { coord: RoomCoord, via: Direction, first_visit: bool },
    ItemCollected { coord: RoomCoord, tile: Pos },
    TrapTriggered { coord: RoomCoord, tile: Pos, until_tick: u64 },
    SpeedRestored { tick: u64 },
    Landed { tick: u64 },
    PlayerDefeated { coord: RoomCoord, tile: Pos },
}
