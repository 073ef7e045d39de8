//! Room environments and the decorative particle systems each one owns.
//! This module exists so weather is chosen by dispatching on one enum instead of scattered checks.
//! It does not own drawing; the app turns particles into pixels.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::room::RoomProfile;

const SPLASHES_PER_DROP: usize = 5;
const SPLASH_GRAVITY: f32 = 0.1;
const SPLASH_FADE: f32 = 0.05;
const STAR_TWINKLE_RATE: f32 = 0.02;
const STAR_MIN_ALPHA: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Environment {
    Clear,
    RainyForest,
    SnowyHill,
    Foggy,
    Starlit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Rain,
    Splash,
    Snow,
    Fog,
    Star,
}

/// Spawn parameters for one particle system; each range is `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    pub kind: ParticleKind,
    pub count: usize,
    pub speed: (f32, f32),
    pub size: (f32, f32),
    pub alpha: (f32, f32),
}

const RAIN: ParticleConfig = ParticleConfig {
    kind: ParticleKind::Rain,
    count: 150,
    speed: (4.0, 10.0),
    size: (10.0, 25.0),
    alpha: (0.3, 0.8),
};

const SNOW: ParticleConfig = ParticleConfig {
    kind: ParticleKind::Snow,
    count: 120,
    speed: (0.5, 2.0),
    size: (1.0, 3.5),
    alpha: (0.6, 1.0),
};

const FOG: ParticleConfig = ParticleConfig {
    kind: ParticleKind::Fog,
    count: 14,
    speed: (0.2, 0.6),
    size: (60.0, 140.0),
    alpha: (0.04, 0.12),
};

const STARS: ParticleConfig = ParticleConfig {
    kind: ParticleKind::Star,
    count: 100,
    speed: (0.0, 0.5),
    size: (0.0, 2.0),
    alpha: (STAR_MIN_ALPHA, 1.0),
};

impl Environment {
    pub fn pool(profile: RoomProfile) -> &'static [Environment] {
        match profile {
            RoomProfile::Dungeon => &[Self::Clear, Self::Clear, Self::Foggy],
            RoomProfile::SideScroller => &[Self::RainyForest, Self::SnowyHill, Self::Foggy],
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::Clear => 0,
            Self::RainyForest => 1,
            Self::SnowyHill => 2,
            Self::Foggy => 3,
            Self::Starlit => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::RainyForest => "Rainy Forest",
            Self::SnowyHill => "Snowy Hill",
            Self::Foggy => "Foggy",
            Self::Starlit => "Starlit",
        }
    }

    pub const fn background(self) -> Rgb {
        match self {
            Self::Clear => Rgb { r: 0x22, g: 0x22, b: 0x2a },
            Self::RainyForest => Rgb { r: 0xB4, g: 0xD9, b: 0xD5 },
            Self::SnowyHill => Rgb { r: 0xD6, g: 0xE6, b: 0xF2 },
            Self::Foggy => Rgb { r: 0x5a, g: 0x63, b: 0x6b },
            Self::Starlit => Rgb { r: 0x05, g: 0x05, b: 0x12 },
        }
    }

    /// Darkened screen edges.
    pub const fn has_vignette(self) -> bool {
        matches!(self, Self::RainyForest | Self::Foggy)
    }

    pub fn particle_systems(self) -> &'static [ParticleConfig] {
        match self {
            Self::Clear => &[],
            Self::RainyForest => &[RAIN],
            Self::SnowyHill => &[SNOW],
            Self::Foggy => &[FOG],
            Self::Starlit => &[STARS],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    /// Fall speed for rain and snow, vertical velocity for splashes, twinkle rate for stars.
    pub vy: f32,
    pub size: f32,
    pub alpha: f32,
}

#[derive(Clone)]
pub struct ParticleField {
    environment: Environment,
    width: f32,
    height: f32,
    ground_y: f32,
    rng: ChaCha8Rng,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(
        environment: Environment,
        width: f32,
        height: f32,
        ground_y: f32,
        seed: u64,
    ) -> Self {
        let mut field = Self {
            environment,
            width,
            height,
            ground_y,
            rng: ChaCha8Rng::seed_from_u64(seed),
            particles: Vec::new(),
        };
        field.populate();
        field
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Replaces every particle with a fresh population for `environment`.
    pub fn switch_to(&mut self, environment: Environment) {
        self.environment = environment;
        self.populate();
    }

    pub fn resize(&mut self, width: f32, height: f32, ground_y: f32) {
        self.width = width;
        self.height = height;
        self.ground_y = ground_y;
        self.populate();
    }

    pub fn update(&mut self) {
        let mut splashes = Vec::new();
        for index in 0..self.particles.len() {
            let mut particle = self.particles[index];
            match particle.kind {
                ParticleKind::Rain => {
                    particle.y += particle.vy;
                    if particle.y >= self.ground_y {
                        splashes.push((particle.x, self.ground_y));
                        particle.y = 0.0;
                        particle.x = self.unit() * self.width;
                    }
                }
                ParticleKind::Splash => {
                    particle.x += particle.vx;
                    particle.y += particle.vy;
                    particle.vy += SPLASH_GRAVITY;
                    particle.alpha -= SPLASH_FADE;
                }
                ParticleKind::Snow => {
                    particle.y += particle.vy;
                    particle.x = (particle.x + particle.vx).rem_euclid(self.width.max(1.0));
                    if particle.y >= self.ground_y {
                        particle.y = 0.0;
                        particle.x = self.unit() * self.width;
                    }
                }
                ParticleKind::Fog => {
                    particle.x += particle.vx;
                    if particle.x - particle.size > self.width {
                        particle.x = -particle.size;
                    }
                }
                ParticleKind::Star => {
                    particle.alpha += particle.vy * STAR_TWINKLE_RATE;
                    if particle.alpha >= 1.0 {
                        particle.alpha = 1.0;
                        particle.vy = -particle.vy.abs();
                    } else if particle.alpha <= STAR_MIN_ALPHA {
                        particle.alpha = STAR_MIN_ALPHA;
                        particle.vy = particle.vy.abs();
                    }
                }
            }
            self.particles[index] = particle;
        }

        self.particles
            .retain(|particle| particle.kind != ParticleKind::Splash || particle.alpha > 0.0);
        for (x, y) in splashes {
            for _ in 0..SPLASHES_PER_DROP {
                let vx = (self.unit() - 0.5) * 2.0;
                let vy = self.unit() * -2.0;
                self.particles.push(Particle {
                    kind: ParticleKind::Splash,
                    x,
                    y,
                    vx,
                    vy,
                    size: 2.0,
                    alpha: 1.0,
                });
            }
        }
    }

    fn populate(&mut self) {
        self.particles.clear();
        for config in self.environment.particle_systems() {
            for _ in 0..config.count {
                let particle = self.spawn(config);
                self.particles.push(particle);
            }
        }
    }

    fn spawn(&mut self, config: &ParticleConfig) -> Particle {
        let x = self.unit() * self.width;
        let y = self.unit() * self.height;
        let speed = self.between(config.speed);
        let size = self.between(config.size);
        let alpha = self.between(config.alpha);
        let vx = match config.kind {
            ParticleKind::Snow => self.unit() - 0.5,
            ParticleKind::Fog => speed,
            _ => 0.0,
        };
        let vy = match config.kind {
            ParticleKind::Fog => 0.0,
            ParticleKind::Star if self.unit() < 0.5 => -speed,
            _ => speed,
        };
        Particle { kind: config.kind, x, y: y.min(self.ground_y), vx, vy, size, alpha }
    }

    fn between(&mut self, (min, max): (f32, f32)) -> f32 {
        min + self.unit() * (max - min)
    }

    fn unit(&mut self) -> f32 {
        (self.rng.next_u64() >> 40) as f32 / (1_u64 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(field: &ParticleField, kind: ParticleKind) -> usize {
        field.particles().iter().filter(|particle| particle.kind == kind).count()
    }

    #[test]
    fn each_environment_owns_its_particle_population() {
        let rainy = ParticleField::new(Environment::RainyForest, 800.0, 480.0, 440.0, 1);
        assert_eq!(count(&rainy, ParticleKind::Rain), 150);

        let clear = ParticleField::new(Environment::Clear, 800.0, 480.0, 440.0, 1);
        assert!(clear.particles().is_empty());

        let stars = ParticleField::new(Environment::Starlit, 800.0, 480.0, 480.0, 1);
        assert_eq!(count(&stars, ParticleKind::Star), 100);
    }

    #[test]
    fn rain_reaching_the_ground_splashes_and_respawns_at_the_top() {
        let mut field = ParticleField::new(Environment::RainyForest, 800.0, 480.0, 440.0, 7);
        field.particles.truncate(1);
        field.particles[0].y = 439.0;
        field.particles[0].vy = 5.0;

        field.update();

        assert_eq!(field.particles[0].y, 0.0);
        assert_eq!(count(&field, ParticleKind::Splash), SPLASHES_PER_DROP);
        assert!(field.particles().iter().all(|particle| particle.y <= 440.0));
    }

    #[test]
    fn splashes_fade_out_and_are_removed() {
        let mut field = ParticleField::new(Environment::RainyForest, 800.0, 480.0, 440.0, 7);
        field.particles.clear();
        field.particles.push(Particle {
            kind: ParticleKind::Splash,
            x: 10.0,
            y: 440.0,
            vx: 0.5,
            vy: -1.0,
            size: 2.0,
            alpha: 1.0,
        });

        for _ in 0..19 {
            field.update();
        }
        assert_eq!(count(&field, ParticleKind::Splash), 1);
        for _ in 0..2 {
            field.update();
        }
        assert_eq!(count(&field, ParticleKind::Splash), 0);
    }

    #[test]
    fn star_opacity_stays_between_bounds() {
        let mut field = ParticleField::new(Environment::Starlit, 800.0, 480.0, 480.0, 3);
        for _ in 0..2_000 {
            field.update();
            for star in field.particles() {
                assert!((STAR_MIN_ALPHA..=1.0).contains(&star.alpha), "alpha {}", star.alpha);
            }
        }
    }

    #[test]
    fn fog_wraps_back_to_the_left_edge() {
        let mut field = ParticleField::new(Environment::Foggy, 800.0, 480.0, 480.0, 5);
        field.particles.truncate(1);
        field.particles[0].x = 900.0;
        field.particles[0].size = 60.0;
        field.particles[0].vx = 0.5;
        field.update();
        assert_eq!(field.particles[0].x, -60.0);
    }

    #[test]
    fn switching_environment_replaces_the_population() {
        let mut field = ParticleField::new(Environment::SnowyHill, 800.0, 480.0, 440.0, 9);
        assert_eq!(count(&field, ParticleKind::Snow), 120);
        field.switch_to(Environment::Foggy);
        assert_eq!(count(&field, ParticleKind::Snow), 0);
        assert_eq!(count(&field, ParticleKind::Fog), 14);
    }

    #[test]
    fn same_seed_gives_the_same_sky() {
        let a = ParticleField::new(Environment::RainyForest, 800.0, 480.0, 440.0, 11);
        let b = ParticleField::new(Environment::RainyForest, 800.0, 480.0, 440.0, 11);
        assert_eq!(a.particles(), b.particles());
    }
}
