//! Door selection, interior perturbation and lane carving.
//! This module exists to hold the rules that keep every room reachable and every exit connected.
//! It does not own object placement or environment choice.

use crate::room::{Room, RoomProfile};
use crate::types::{Direction, Pos, TileKind};

use super::GenerationContext;
use super::grid::{index, interior_cells, l_path};
use super::seed::SeedStream;

/// Picks the sides that get a door, in a fixed order of random draws:
/// the forced door first, then one extra-door roll per remaining free side.
pub(super) fn choose_door_sides(
    profile: RoomProfile,
    context: &GenerationContext,
    stream: &mut SeedStream,
    extra_door_permille: u16,
) -> Vec<Direction> {
    let mut open = [false; 4];
    for side in Direction::ALL {
        if context.must_open(side) {
            open[side.slot()] = true;
        }
    }

    let free: Vec<Direction> =
        profile.door_sides().iter().copied().filter(|side| context.is_free(*side)).collect();
    let candidates = if free.is_empty() && !open.contains(&true) {
        // Every profile side is sealed and nothing forces a door. Open one anyway; walking
        // through it reopens the matching door in the neighbour.
        profile.door_sides().to_vec()
    } else {
        free.clone()
    };
    if !candidates.is_empty() {
        let forced = candidates[stream.below(candidates.len())];
        open[forced.slot()] = true;
    }

    for side in free {
        if !open[side.slot()] && stream.chance_permille(extra_door_permille) {
            open[side.slot()] = true;
        }
    }

    Direction::ALL.into_iter().filter(|side| open[side.slot()]).collect()
}

pub(super) fn perturb_interior(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    stream: &mut SeedStream,
    wall_perturb_permille: u16,
) {
    for pos in interior_cells(width, height) {
        if stream.chance_permille(wall_perturb_permille) {
            tiles[index(width, pos)] = TileKind::Wall;
        }
    }
}

/// Floor path from the cell inside `side`'s door to the anchor.
pub(super) fn lane_cells(
    profile: RoomProfile,
    side: Direction,
    width: usize,
    height: usize,
) -> Vec<Pos> {
    let door = profile.door_position(side, width, height);
    let start = door.offset(side.opposite());
    let vertical_first = matches!(side, Direction::North | Direction::South);
    l_path(start, profile.anchor(width, height), vertical_first)
}

/// Carves a lane per open side and returns the reserved-cell mask.
pub(super) fn carve_lanes(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    profile: RoomProfile,
    open_sides: &[Direction],
) -> Vec<bool> {
    let mut reserved = vec![false; width * height];
    let anchor = profile.anchor(width, height);
    tiles[index(width, anchor)] = TileKind::Floor;
    reserved[index(width, anchor)] = true;
    for &side in open_sides {
        tiles[index(width, profile.door_position(side, width, height))] = TileKind::Door;
        for pos in lane_cells(profile, side, width, height) {
            tiles[index(width, pos)] = TileKind::Floor;
            reserved[index(width, pos)] = true;
        }
    }
    reserved
}

impl Room {
    /// Opens the door on `side` after generation and clears its lane.
    /// Returns false when the door was already open.
    pub fn open_door(&mut self, side: Direction) -> bool {
        if self.has_door(side) {
            return false;
        }
        self.set_tile(self.door_position(side), TileKind::Door);
        for pos in lane_cells(self.profile, side, self.width, self.height) {
            self.set_tile(pos, TileKind::Floor);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::SideConstraint;
    use super::super::grid::walled_grid;
    use super::*;

    #[test]
    fn arriving_side_is_always_opened() {
        for seed in 0..200 {
            let mut stream = SeedStream::new(seed);
            let context = GenerationContext::arriving_from(Direction::West);
            let sides = choose_door_sides(RoomProfile::Dungeon, &context, &mut stream, 0);
            assert!(sides.contains(&Direction::West), "seed {seed} lost the arriving door");
        }
    }

    #[test]
    fn sealed_sides_never_receive_random_doors() {
        let context = GenerationContext::default()
            .with_side(Direction::North, SideConstraint::Sealed)
            .with_side(Direction::East, SideConstraint::Sealed);
        for seed in 0..200 {
            let mut stream = SeedStream::new(seed);
            let sides = choose_door_sides(RoomProfile::Dungeon, &context, &mut stream, 1000);
            assert!(!sides.contains(&Direction::North));
            assert!(!sides.contains(&Direction::East));
            assert!(!sides.is_empty());
        }
    }

    #[test]
    fn fully_sealed_room_still_gets_one_door() {
        let mut context = GenerationContext::default();
        for side in Direction::ALL {
            context = context.with_side(side, SideConstraint::Sealed);
        }
        let mut stream = SeedStream::new(5);
        let sides = choose_door_sides(RoomProfile::Dungeon, &context, &mut stream, 1000);
        assert_eq!(sides.len(), 1);
    }

    #[test]
    fn side_scroller_random_doors_stay_on_west_and_east() {
        for seed in 0..200 {
            let mut stream = SeedStream::new(seed);
            let sides = choose_door_sides(
                RoomProfile::SideScroller,
                &GenerationContext::default(),
                &mut stream,
                1000,
            );
            assert!(sides.iter().all(|side| matches!(side, Direction::West | Direction::East)));
        }
    }

    #[test]
    fn lanes_connect_each_door_to_the_anchor_through_floor() {
        let (width, height) = (20, 12);
        let mut tiles = vec![TileKind::Wall; width * height];
        let reserved =
            carve_lanes(&mut tiles, width, height, RoomProfile::Dungeon, &Direction::ALL);
        let anchor = RoomProfile::Dungeon.anchor(width, height);
        assert!(reserved[index(width, anchor)]);
        for side in Direction::ALL {
            let lane = lane_cells(RoomProfile::Dungeon, side, width, height);
            assert_eq!(lane.last(), Some(&anchor));
            assert!(lane.iter().all(|pos| tiles[index(width, *pos)] == TileKind::Floor));
        }
    }

    #[test]
    fn perturbation_never_touches_the_border() {
        let (width, height) = (12, 8);
        let mut tiles = walled_grid(width, height);
        let mut stream = SeedStream::new(3);
        perturb_interior(&mut tiles, width, height, &mut stream, 1000);
        assert!(tiles.iter().all(|tile| *tile == TileKind::Wall));

        let mut tiles = walled_grid(width, height);
        perturb_interior(&mut tiles, width, height, &mut stream, 0);
        assert_eq!(tiles, walled_grid(width, height));
    }
}
