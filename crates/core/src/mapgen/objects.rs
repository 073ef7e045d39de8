//! Rejection-sampled placement of obstacles, items, monsters and traps.

use crate::types::{Pos, TileKind};

use super::grid::index;
use super::seed::SeedStream;

const OBJECT_WEIGHTS: [(TileKind, usize); 4] =
    [(TileKind::Obstacle, 4), (TileKind::Item, 3), (TileKind::Trap, 2), (TileKind::Monster, 1)];

pub(super) struct PlacementContext<'a> {
    pub(super) tiles: &'a mut [TileKind],
    pub(super) reserved: &'a [bool],
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) min_objects: usize,
    pub(super) max_objects: usize,
    pub(super) placement_attempts: u32,
}

/// Returns how many objects were actually placed; exhausted attempts simply place fewer.
pub(super) fn place_objects(context: &mut PlacementContext<'_>, stream: &mut SeedStream) -> usize {
    let requested = stream.range(context.min_objects, context.max_objects);
    let mut placed = 0;
    for _ in 0..requested {
        let kind = pick_object_kind(stream);
        if let Some(pos) = find_free_floor(context, stream) {
            context.tiles[index(context.width, pos)] = kind;
            placed += 1;
        }
    }
    placed
}

fn pick_object_kind(stream: &mut SeedStream) -> TileKind {
    let total: usize = OBJECT_WEIGHTS.iter().map(|(_, weight)| weight).sum();
    let mut roll = stream.below(total);
    for (kind, weight) in OBJECT_WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    TileKind::Obstacle
}

fn find_free_floor(context: &PlacementContext<'_>, stream: &mut SeedStream) -> Option<Pos> {
    for _ in 0..context.placement_attempts {
        let pos = Pos {
            y: stream.range(1, context.height - 2) as i32,
            x: stream.range(1, context.width - 2) as i32,
        };
        let idx = index(context.width, pos);
        if context.tiles[idx] == TileKind::Floor && !context.reserved[idx] {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::super::grid::walled_grid;
    use super::*;

    #[test]
    fn objects_land_only_on_unreserved_interior_floor() {
        let (width, height) = (10, 8);
        let mut tiles = walled_grid(width, height);
        let mut reserved = vec![false; width * height];
        for x in 1..width - 1 {
            reserved[index(width, Pos { y: 4, x: x as i32 })] = true;
        }
        let mut stream = SeedStream::new(42);
        let placed = place_objects(
            &mut PlacementContext {
                tiles: &mut tiles,
                reserved: &reserved,
                width,
                height,
                min_objects: 5,
                max_objects: 5,
                placement_attempts: 64,
            },
            &mut stream,
        );

        assert_eq!(placed, 5);
        let objects: Vec<usize> = tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| !matches!(tile, TileKind::Floor | TileKind::Wall))
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(objects.len(), 5);
        for idx in objects {
            let (y, x) = (idx / width, idx % width);
            assert!(y > 0 && y < height - 1 && x > 0 && x < width - 1);
            assert!(!reserved[idx]);
        }
    }

    #[test]
    fn exhausted_attempts_degrade_to_fewer_objects() {
        let (width, height) = (6, 6);
        let mut tiles = vec![TileKind::Wall; width * height];
        let reserved = vec![false; width * height];
        let mut stream = SeedStream::new(9);
        let placed = place_objects(
            &mut PlacementContext {
                tiles: &mut tiles,
                reserved: &reserved,
                width,
                height,
                min_objects: 3,
                max_objects: 3,
                placement_attempts: 16,
            },
            &mut stream,
        );
        assert_eq!(placed, 0);
        assert!(tiles.iter().all(|tile| *tile == TileKind::Wall));
    }

    #[test]
    fn every_object_kind_is_reachable() {
        let mut stream = SeedStream::new(1);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let kind = pick_object_kind(&mut stream);
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), OBJECT_WEIGHTS.len());
    }
}
