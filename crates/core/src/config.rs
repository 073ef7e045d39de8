//! Session tunables and their validation.
//! This module exists so every size, speed and probability a session depends on is checked once,
//! before any room is generated. It does not own where settings are stored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::MovementModel;

pub const MIN_ROOM_SIDE: usize = 5;
const PERMILLE_MAX: u16 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementModel,
    pub room_width: usize,
    pub room_height: usize,
    pub tile_size: f32,
    /// Chance per interior cell of becoming a wall, in thousandths.
    pub wall_perturb_permille: u16,
    /// Chance per unconstrained side of an extra door, in thousandths.
    pub extra_door_permille: u16,
    pub min_objects: usize,
    pub max_objects: usize,
    pub placement_attempts: u32,
    pub player_size: f32,
    pub player_speed: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub max_fall_speed: f32,
    pub trap_penalty_ticks: u64,
    pub trap_speed_factor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            movement: MovementModel::Dungeon,
            room_width: 20,
            room_height: 12,
            tile_size: 40.0,
            wall_perturb_permille: 100,
            extra_door_permille: 350,
            min_objects: 2,
            max_objects: 5,
            placement_attempts: 64,
            player_size: 30.0,
            player_speed: 5.0,
            gravity: 0.5,
            jump_power: -10.0,
            max_fall_speed: 15.0,
            trap_penalty_ticks: 120,
            trap_speed_factor: 0.5,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("room must be at least {min}x{min} tiles, got {width}x{height}")]
    RoomTooSmall { width: usize, height: usize, min: usize },
    #[error("tile size must be a positive number, got {0}")]
    InvalidTileSize(f32),
    #[error("player size {player} must be positive and fit through a {tile} px door")]
    PlayerDoesNotFit { player: f32, tile: f32 },
    #[error("{what} of {value} px per tick must be positive and below the tile size {tile}")]
    StepTooLarge { what: &'static str, value: f32, tile: f32 },
    #[error("object count range {min}..={max} is inverted")]
    InvertedObjectRange { min: usize, max: usize },
    #[error("{what} is {value} permille, above 1000")]
    PermilleOutOfRange { what: &'static str, value: u16 },
    #[error("trap speed factor must be within (0, 1], got {0}")]
    InvalidSpeedFactor(f32),
    #[error("failed to read config: {0}")]
    Io(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl GameConfig {
    pub fn with_movement(mut self, movement: MovementModel) -> Self {
        self.movement = movement;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_width < MIN_ROOM_SIDE || self.room_height < MIN_ROOM_SIDE {
            return Err(ConfigError::RoomTooSmall {
                width: self.room_width,
                height: self.room_height,
                min: MIN_ROOM_SIDE,
            });
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if !(self.player_size > 0.0 && self.player_size <= self.tile_size) {
            return Err(ConfigError::PlayerDoesNotFit {
                player: self.player_size,
                tile: self.tile_size,
            });
        }
        // A step of a full tile or more could tunnel through a one-tile wall.
        for (what, value) in [
            ("player speed", self.player_speed),
            ("gravity", self.gravity),
            ("max fall speed", self.max_fall_speed),
            ("jump power", -self.jump_power),
        ] {
            if !(value > 0.0 && value < self.tile_size) {
                return Err(ConfigError::StepTooLarge { what, value, tile: self.tile_size });
            }
        }
        if self.min_objects > self.max_objects {
            return Err(ConfigError::InvertedObjectRange {
                min: self.min_objects,
                max: self.max_objects,
            });
        }
        for (what, value) in [
            ("wall perturbation", self.wall_perturb_permille),
            ("extra door chance", self.extra_door_permille),
        ] {
            if value > PERMILLE_MAX {
                return Err(ConfigError::PermilleOutOfRange { what, value });
            }
        }
        if !(self.trap_speed_factor > 0.0 && self.trap_speed_factor <= 1.0) {
            return Err(ConfigError::InvalidSpeedFactor(self.trap_speed_factor));
        }
        Ok(())
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_json(&raw)
    }

    pub(crate) fn room_pixel_size(&self) -> (f32, f32) {
        (self.room_width as f32 * self.tile_size, self.room_height as f32 * self.tile_size)
    }
}
