//! Per-tick player movement and tile-accurate collision.
//! This module exists to keep the two movement models and their shared AABB check in one place.
//! It does not own what happens when the player touches a tile; the session resolves contacts.

use crate::config::GameConfig;
use crate::input::InputState;
use crate::room::Room;
use crate::types::Pos;

/// Slowdown from a trap, lifted once the session tick reaches `until_tick`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedPenalty {
    pub until_tick: u64,
    pub factor: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner in room pixels.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub base_speed: f32,
    pub velocity_y: f32,
    pub on_ground: bool,
    pub penalty: Option<SpeedPenalty>,
}

impl Player {
    pub fn new(size: f32, base_speed: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size,
            height: size,
            base_speed,
            velocity_y: 0.0,
            on_ground: false,
            penalty: None,
        }
    }

    /// Centres the bounding box on `cell` and clears vertical motion.
    pub fn place_on_cell(&mut self, cell: Pos, tile_size: f32) {
        self.x = cell.x as f32 * tile_size + (tile_size - self.width) / 2.0;
        self.y = cell.y as f32 * tile_size + (tile_size - self.height) / 2.0;
        self.velocity_y = 0.0;
        self.on_ground = false;
    }

    pub fn speed(&self) -> f32 {
        match self.penalty {
            Some(penalty) => self.base_speed * penalty.factor,
            None => self.base_speed,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Tile under the centre of the bounding box.
    pub fn center_cell(&self, tile_size: f32) -> Pos {
        let (cx, cy) = self.center();
        Pos { y: (cy / tile_size).floor() as i32, x: (cx / tile_size).floor() as i32 }
    }

    /// Starts or extends a slowdown. The factor is replaced, never multiplied.
    pub fn apply_penalty(&mut self, until_tick: u64, factor: f32) {
        let until_tick = match self.penalty {
            Some(current) => current.until_tick.max(until_tick),
            None => until_tick,
        };
        self.penalty = Some(SpeedPenalty { until_tick, factor });
    }

    /// Lifts an expired penalty; returns true when speed was restored this call.
    pub fn restore_speed(&mut self, tick: u64) -> bool {
        match self.penalty {
            Some(penalty) if tick >= penalty.until_tick => {
                self.penalty = None;
                true
            }
            _ => false,
        }
    }

    fn box_at(&self, x: f32, y: f32) -> Aabb {
        Aabb { x, y, width: self.width, height: self.height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementParams {
    pub tile_size: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub max_fall_speed: f32,
}

impl MovementParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            tile_size: config.tile_size,
            gravity: config.gravity,
            jump_power: config.jump_power,
            max_fall_speed: config.max_fall_speed,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Ground contact was gained this tick.
    pub landed: bool,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Aabb {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Aabb {
    /// Inclusive tile span; an edge lying exactly on a tile boundary does not reach the next tile.
    fn tile_span(&self, tile_size: f32) -> (Pos, Pos) {
        let first =
            Pos { y: (self.y / tile_size).floor() as i32, x: (self.x / tile_size).floor() as i32 };
        let last = Pos {
            y: ((self.y + self.height) / tile_size).ceil() as i32 - 1,
            x: ((self.x + self.width) / tile_size).ceil() as i32 - 1,
        };
        (first, last)
    }
}

fn hits_solid(room: &Room, aabb: Aabb, tile_size: f32) -> bool {
    let (first, last) = aabb.tile_span(tile_size);
    (first.y..=last.y).any(|y| (first.x..=last.x).any(|x| room.tile_at(Pos { y, x }).is_solid()))
}

fn clamp_to_room(room: &Room, aabb: Aabb, tile_size: f32) -> Aabb {
    let max_x = (room.width as f32 * tile_size - aabb.width).max(0.0);
    let max_y = (room.height as f32 * tile_size - aabb.height).max(0.0);
    Aabb { x: aabb.x.clamp(0.0, max_x), y: aabb.y.clamp(0.0, max_y), ..aabb }
}

/// True when the player's box overlaps any wall or obstacle.
pub fn overlaps_solid(room: &Room, player: &Player, tile_size: f32) -> bool {
    hits_solid(room, player.box_at(player.x, player.y), tile_size)
}

fn try_move_x(room: &Room, player: &mut Player, dx: f32, tile_size: f32) -> bool {
    if dx == 0.0 {
        return false;
    }
    let candidate = clamp_to_room(room, player.box_at(player.x + dx, player.y), tile_size);
    if hits_solid(room, candidate, tile_size) {
        return true;
    }
    player.x = candidate.x;
    false
}

/// Top-down step: each axis moves by the current speed or not at all.
pub fn step_dungeon(
    room: &Room,
    player: &mut Player,
    input: &InputState,
    params: &MovementParams,
) -> StepReport {
    let (horizontal, vertical) = input.axes();
    let speed = player.speed();
    let blocked_x = try_move_x(room, player, f32::from(horizontal) * speed, params.tile_size);

    let mut blocked_y = false;
    if vertical != 0 {
        let dy = f32::from(vertical) * speed;
        let candidate =
            clamp_to_room(room, player.box_at(player.x, player.y + dy), params.tile_size);
        if hits_solid(room, candidate, params.tile_size) {
            blocked_y = true;
        } else {
            player.y = candidate.y;
        }
    }

    StepReport { landed: false, blocked_x, blocked_y }
}

/// Side-on step: horizontal walk, then gravity with landing and ceiling snaps.
/// `jump` is a latched press; it only takes effect while grounded.
pub fn step_platformer(
    room: &Room,
    player: &mut Player,
    input: &InputState,
    jump: bool,
    params: &MovementParams,
) -> StepReport {
    let tile_size = params.tile_size;
    let (horizontal, _) = input.axes();
    let blocked_x = try_move_x(room, player, f32::from(horizontal) * player.speed(), tile_size);

    let was_on_ground = player.on_ground;
    if jump && player.on_ground {
        player.velocity_y = params.jump_power;
        player.on_ground = false;
    }
    player.velocity_y = (player.velocity_y + params.gravity).min(params.max_fall_speed);

    let candidate =
        clamp_to_room(room, player.box_at(player.x, player.y + player.velocity_y), tile_size);
    let mut blocked_y = false;
    let mut grounded = false;
    if hits_solid(room, candidate, tile_size) {
        blocked_y = true;
        let (first, last) = candidate.tile_span(tile_size);
        let snapped = if player.velocity_y > 0.0 {
            grounded = true;
            last.y as f32 * tile_size - player.height
        } else {
            (first.y + 1) as f32 * tile_size
        };
        if !hits_solid(room, player.box_at(player.x, snapped), tile_size) {
            player.y = snapped;
        }
        player.velocity_y = 0.0;
    } else {
        player.y = candidate.y;
    }
    player.on_ground = grounded;

    StepReport { landed: grounded && !was_on_ground, blocked_x, blocked_y }
}
