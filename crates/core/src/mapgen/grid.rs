//! Flat tile-grid primitives shared by door, lane and object placement.

use crate::types::{Pos, TileKind};

pub(super) fn index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

pub(super) fn walled_grid(width: usize, height: usize) -> Vec<TileKind> {
    let mut tiles = vec![TileKind::Floor; width * height];
    for x in 0..width {
        tiles[x] = TileKind::Wall;
        tiles[(height - 1) * width + x] = TileKind::Wall;
    }
    for y in 0..height {
        tiles[y * width] = TileKind::Wall;
        tiles[y * width + (width - 1)] = TileKind::Wall;
    }
    tiles
}

pub(super) fn interior_cells(width: usize, height: usize) -> impl Iterator<Item = Pos> {
    (1..height - 1).flat_map(move |y| (1..width - 1).map(move |x| Pos { y: y as i32, x: x as i32 }))
}

/// Cells from `start` to `end` inclusive, walking the `vertical_first` axis before the other.
pub(super) fn l_path(start: Pos, end: Pos, vertical_first: bool) -> Vec<Pos> {
    let mut path = vec![start];
    let mut cursor = start;
    if vertical_first {
        walk_rows(&mut cursor, end.y, &mut path);
        walk_cols(&mut cursor, end.x, &mut path);
    } else {
        walk_cols(&mut cursor, end.x, &mut path);
        walk_rows(&mut cursor, end.y, &mut path);
    }
    path
}

fn walk_rows(cursor: &mut Pos, target_y: i32, path: &mut Vec<Pos>) {
    while cursor.y != target_y {
        cursor.y += (target_y - cursor.y).signum();
        path.push(*cursor);
    }
}

fn walk_cols(cursor: &mut Pos, target_x: i32, path: &mut Vec<Pos>) {
    while cursor.x != target_x {
        cursor.x += (target_x - cursor.x).signum();
        path.push(*cursor);
    }
}
