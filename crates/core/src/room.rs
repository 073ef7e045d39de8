//! Room tile grids and the layout profiles that decide where their doors sit.

use xxhash_rust::xxh3::xxh3_64;

use crate::environment::Environment;
use crate::types::{Direction, MovementModel, Pos, RoomCoord, TileKind};

/// Layout family of a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomProfile {
    /// Top-down rooms with doors at the midpoint of every edge.
    Dungeon,
    /// Side-on chunks with doors at ground level on the west and east edges.
    SideScroller,
}

impl RoomProfile {
    pub fn for_movement(movement: MovementModel) -> Self {
        match movement {
            MovementModel::Dungeon => Self::Dungeon,
            MovementModel::Platformer => Self::SideScroller,
        }
    }

    /// Sides that may receive a random door.
    pub fn door_sides(self) -> &'static [Direction] {
        match self {
            Self::Dungeon => &Direction::ALL,
            Self::SideScroller => &[Direction::West, Direction::East],
        }
    }

    pub fn door_position(self, side: Direction, width: usize, height: usize) -> Pos {
        let (w, h) = (width as i32, height as i32);
        let side_row = match self {
            Self::Dungeon => h / 2,
            Self::SideScroller => h - 2,
        };
        match side {
            Direction::North => Pos { y: 0, x: w / 2 },
            Direction::South => Pos { y: h - 1, x: w / 2 },
            Direction::West => Pos { y: side_row, x: 0 },
            Direction::East => Pos { y: side_row, x: w - 1 },
        }
    }

    /// Interior cell every door lane leads to.
    pub fn anchor(self, width: usize, height: usize) -> Pos {
        let (w, h) = (width as i32, height as i32);
        match self {
            Self::Dungeon => Pos { y: h / 2, x: w / 2 },
            Self::SideScroller => Pos { y: h - 2, x: w / 2 },
        }
    }

    pub(crate) const fn code(self) -> u64 {
        match self {
            Self::Dungeon => 1,
            Self::SideScroller => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub coord: RoomCoord,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub profile: RoomProfile,
    pub environment: Environment,
}

impl Room {
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    /// Edge a border cell lies on. Corners never hold doors, so the first match is unambiguous.
    pub fn border_side(&self, pos: Pos) -> Option<Direction> {
        if !self.is_border(pos) {
            return None;
        }
        if pos.y == 0 {
            Some(Direction::North)
        } else if pos.y as usize == self.height - 1 {
            Some(Direction::South)
        } else if pos.x == 0 {
            Some(Direction::West)
        } else {
            Some(Direction::East)
        }
    }

    pub fn door_position(&self, side: Direction) -> Pos {
        self.profile.door_position(side, self.width, self.height)
    }

    pub fn has_door(&self, side: Direction) -> bool {
        self.tile_at(self.door_position(side)) == TileKind::Door
    }

    /// Cell just inside the door on `side`; arrivals through that door are placed here.
    pub fn entry_cell(&self, side: Direction) -> Pos {
        self.door_position(side).offset(side.opposite())
    }

    pub fn anchor(&self) -> Pos {
        self.profile.anchor(self.width, self.height)
    }

    pub fn door_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == TileKind::Door).count()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| **tile == kind).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.tiles.len() + 24);
        bytes.extend(self.coord.x.to_le_bytes());
        bytes.extend(self.coord.y.to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.push(self.profile.code() as u8);
        bytes.push(self.environment.code());
        bytes.extend(self.tiles.iter().map(|tile| tile.code()));
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// One character per tile, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width) {
            for tile in row {
                out.push(match tile {
                    TileKind::Floor => '.',
                    TileKind::Wall => '#',
                    TileKind::Door => '+',
                    TileKind::Obstacle => 'O',
                    TileKind::Item => '$',
                    TileKind::Monster => 'M',
                    TileKind::Trap => '^',
                });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
