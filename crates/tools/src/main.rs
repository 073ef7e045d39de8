use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use roomwalk_core::{
    Direction, GameConfig, GenerationContext, MovementModel, RoomCoord, RoomGenerator, TileKind,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Dungeon,
    Platformer,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    North,
    South,
    East,
    West,
}

impl From<Side> for Direction {
    fn from(side: Side) -> Self {
        match side {
            Side::North => Direction::North,
            Side::South => Direction::South,
            Side::East => Direction::East,
            Side::West => Direction::West,
        }
    }
}

/// Print one generated room as ASCII along with its fingerprint.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    x: i32,
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    y: i32,
    /// Overrides the movement model from `--config`
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,
    /// Side the player walks in through; that door is always present
    #[arg(short, long, value_enum)]
    arriving: Option<Side>,
    /// Path to a GameConfig JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(mode) = args.mode {
        config = config.with_movement(match mode {
            Mode::Dungeon => MovementModel::Dungeon,
            Mode::Platformer => MovementModel::Platformer,
        });
    }
    config.validate().context("Config rejected")?;

    let context = match args.arriving {
        Some(side) => GenerationContext::arriving_from(side.into()),
        None => GenerationContext::default(),
    };
    let coord = RoomCoord::new(args.x, args.y);
    let room = RoomGenerator::new(args.seed, &config).generate(coord, &context);

    println!(
        "Room ({}, {}) seed={} profile={:?} environment={}",
        coord.x,
        coord.y,
        args.seed,
        room.profile,
        room.environment.label()
    );
    print!("{}", room.to_ascii());

    let doors: Vec<String> = Direction::ALL
        .into_iter()
        .filter(|side| room.has_door(*side))
        .map(|side| format!("{side:?}").to_lowercase())
        .collect();
    println!("Doors: {}", doors.join(" "));
    println!(
        "Objects: items={} traps={} monsters={} obstacles={}",
        room.count(TileKind::Item),
        room.count(TileKind::Trap),
        room.count(TileKind::Monster),
        room.count(TileKind::Obstacle)
    );
    println!("Fingerprint: 0x{:016x}", room.fingerprint());

    Ok(())
}
