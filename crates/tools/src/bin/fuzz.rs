use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use roomwalk_core::{
    Direction, GameConfig, InputState, MovementModel, Session, TickOutcome,
    movement::overlaps_solid,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Dungeon,
    Platformer,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u32,
    #[arg(short, long, value_enum, default_value_t = Mode::Dungeon)]
    mode: Mode,
}

fn random_input(rng: &mut ChaCha8Rng) -> InputState {
    let bits = rng.next_u64();
    InputState {
        up: bits & 1 != 0,
        down: bits & 2 != 0,
        left: bits & 4 != 0,
        right: bits & 8 != 0,
        jump_pressed: bits & 16 != 0,
    }
}

fn check_neighbours(session: &Session) -> Result<()> {
    let rooms = session.rooms();
    for coord in rooms.coords() {
        let Some(room) = rooms.at(coord) else {
            continue;
        };
        for side in Direction::ALL {
            let Some(neighbour) = rooms.at(coord.step(side)) else {
                continue;
            };
            if room.has_door(side) != neighbour.has_door(side.opposite()) {
                bail!("Invariant failed: door mismatch between {coord:?} and its {side:?} side");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let movement = match args.mode {
        Mode::Dungeon => MovementModel::Dungeon,
        Mode::Platformer => MovementModel::Platformer,
    };

    println!(
        "Starting fuzz walker on seed {} for {} ticks ({movement:?})...",
        args.seed, args.ticks
    );
    let config = GameConfig::default().with_movement(movement);
    let tile = config.tile_size;
    let mut session = Session::new(args.seed, config.clone())?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut held = InputState::IDLE;
    let mut transitions = 0u32;
    let mut defeats = 0u32;

    for _ in 0..args.ticks {
        // Hold each input for a stretch so the walker crosses rooms.
        if rng.next_u64() % 12 == 0 {
            held = random_input(&mut rng);
        }

        match session.tick(&held) {
            TickOutcome::Continued => {}
            TickOutcome::RoomChanged { to, .. } => {
                transitions += 1;
                if session.current_coord() != to {
                    bail!("Invariant failed: session reports {to:?} but sits elsewhere");
                }
                let room = session.current_room();
                if room.door_count() == 0 {
                    bail!("Invariant failed: room {to:?} has no door");
                }
                check_neighbours(&session)?;
            }
            TickOutcome::Defeated => {
                defeats += 1;
                check_neighbours(&session)?;
                session = Session::new(rng.next_u64(), config.clone())?;
                continue;
            }
        }

        if overlaps_solid(session.current_room(), session.player(), tile) {
            bail!(
                "Invariant failed: player inside a solid tile at tick {} in {:?}",
                session.tick_count(),
                session.current_coord()
            );
        }
    }

    check_neighbours(&session)?;
    println!("Fuzzing completed: {transitions} room changes, {defeats} defeats.");
    Ok(())
}
