//! The explicit game-session context: player, rooms, tick counter, event log and weather.
//! This module exists so all per-run state is owned by one value the front end drives tick by tick.
//! It does not own input devices or drawing.

mod hash;
mod tiles;
mod transition;

#[cfg(test)]
mod test_support;

use std::collections::VecDeque;

use crate::cache::{RoomCache, RoomId};
use crate::config::{ConfigError, GameConfig};
use crate::environment::ParticleField;
use crate::input::{InputSource, InputState};
use crate::mapgen::{GenerationContext, RoomGenerator};
use crate::movement::{MovementParams, Player, step_dungeon, step_platformer};
use crate::room::{Room, RoomProfile};
use crate::types::*;

const WEATHER_SEED_SALT: u64 = 0x5745_4154_4845_5221;
/// Oldest events are dropped once the log holds this many.
pub const LOG_CAPACITY: usize = 256;

pub struct Session {
    seed: u64,
    config: GameConfig,
    params: MovementParams,
    tick: u64,
    generator: RoomGenerator,
    cache: RoomCache,
    current: RoomId,
    player: Player,
    status: SessionStatus,
    items_collected: u32,
    log: VecDeque<SessionEvent>,
    weather: ParticleField,
}

impl Session {
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let generator = RoomGenerator::new(seed, &config);
        let mut cache = RoomCache::new();
        let current =
            cache.get_or_create(RoomCoord::ORIGIN, &GenerationContext::default(), &generator);

        let room = &cache[current];
        let mut player = Player::new(config.player_size, config.player_speed);
        player.place_on_cell(room.anchor(), config.tile_size);
        let weather = weather_for(room, &config, seed);

        Ok(Self {
            seed,
            params: MovementParams::from_config(&config),
            config,
            tick: 0,
            generator,
            cache,
            current,
            player,
            status: SessionStatus::Exploring,
            items_collected: 0,
            log: VecDeque::new(),
            weather,
        })
    }

    /// Advances one tick from one frame of input. A defeated session no longer advances.
    pub fn tick(&mut self, input: &InputState) -> TickOutcome {
        if self.status == SessionStatus::Defeated {
            return TickOutcome::Defeated;
        }

        self.tick += 1;
        if self.player.restore_speed(self.tick) {
            self.record(SessionEvent::SpeedRestored { tick: self.tick });
        }

        let room = &self.cache[self.current];
        match self.config.movement {
            MovementModel::Dungeon => {
                step_dungeon(room, &mut self.player, input, &self.params);
            }
            MovementModel::Platformer => {
                // A press while airborne is dropped, not held until landing.
                let jump = input.jump_pressed && self.player.on_ground;
                let report = step_platformer(room, &mut self.player, input, jump, &self.params);
                if report.landed {
                    self.record(SessionEvent::Landed { tick: self.tick });
                }
            }
        }

        self.weather.update();
        self.resolve_contact()
    }

    /// Polls `input` until `max_ticks` have run or the player is defeated.
    /// Returns how many ticks were simulated.
    pub fn run(&mut self, input: &mut impl InputSource, max_ticks: u32) -> u32 {
        let mut ticks = 0;
        while ticks < max_ticks && self.status == SessionStatus::Exploring {
            let frame = input.poll();
            self.tick(&frame);
            ticks += 1;
        }
        ticks
    }

    pub fn current_room(&self) -> &Room {
        &self.cache[self.current]
    }

    pub fn current_coord(&self) -> RoomCoord {
        self.current_room().coord
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Most recent events, oldest first, up to `LOG_CAPACITY` of them.
    pub fn log(&self) -> &VecDeque<SessionEvent> {
        &self.log
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn items_collected(&self) -> u32 {
        self.items_collected
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn weather(&self) -> &ParticleField {
        &self.weather
    }

    pub fn rooms_generated(&self) -> usize {
        self.cache.len()
    }

    pub fn rooms(&self) -> &RoomCache {
        &self.cache
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn record(&mut self, event: SessionEvent) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(event);
    }
}

fn weather_for(room: &Room, config: &GameConfig, seed: u64) -> ParticleField {
    let (width, height) = config.room_pixel_size();
    ParticleField::new(
        room.environment,
        width,
        height,
        ground_line(room.profile, config),
        seed ^ WEATHER_SEED_SALT,
    )
}

/// Pixel row where falling particles hit the ground.
fn ground_line(profile: RoomProfile, config: &GameConfig) -> f32 {
    match profile {
        RoomProfile::SideScroller => (config.room_height - 1) as f32 * config.tile_size,
        RoomProfile::Dungeon => config.room_height as f32 * config.tile_size,
    }
}
