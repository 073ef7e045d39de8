//! Room generation orchestration that composes doors, perturbation, lanes and objects.

use crate::config::GameConfig;
use crate::environment::Environment;
use crate::room::{Room, RoomProfile};
use crate::types::RoomCoord;

use super::GenerationContext;
use super::grid::walled_grid;
use super::layout::{carve_lanes, choose_door_sides, perturb_interior};
use super::objects::{PlacementContext, place_objects};
use super::seed::{SeedStream, derive_room_seed};

#[derive(Clone, Debug)]
pub struct RoomGenerator {
    run_seed: u64,
    profile: RoomProfile,
    width: usize,
    height: usize,
    wall_perturb_permille: u16,
    extra_door_permille: u16,
    min_objects: usize,
    max_objects: usize,
    placement_attempts: u32,
}

impl RoomGenerator {
    pub fn new(run_seed: u64, config: &GameConfig) -> Self {
        Self {
            run_seed,
            profile: RoomProfile::for_movement(config.movement),
            width: config.room_width,
            height: config.room_height,
            wall_perturb_permille: config.wall_perturb_permille,
            extra_door_permille: config.extra_door_permille,
            min_objects: config.min_objects,
            max_objects: config.max_objects,
            placement_attempts: config.placement_attempts,
        }
    }

    pub fn profile(&self) -> RoomProfile {
        self.profile
    }

    pub fn generate(&self, coord: RoomCoord, context: &GenerationContext) -> Room {
        let room_seed = derive_room_seed(self.run_seed, coord, self.profile);
        let mut stream = SeedStream::new(room_seed);
        let mut tiles = walled_grid(self.width, self.height);

        let open_sides =
            choose_door_sides(self.profile, context, &mut stream, self.extra_door_permille);
        perturb_interior(
            &mut tiles,
            self.width,
            self.height,
            &mut stream,
            self.wall_perturb_permille,
        );
        let reserved = carve_lanes(&mut tiles, self.width, self.height, self.profile, &open_sides);

        place_objects(
            &mut PlacementContext {
                tiles: &mut tiles,
                reserved: &reserved,
                width: self.width,
                height: self.height,
                min_objects: self.min_objects,
                max_objects: self.max_objects,
                placement_attempts: self.placement_attempts,
            },
            &mut stream,
        );

        let pool = Environment::pool(self.profile);
        let environment = pool[stream.below(pool.len())];

        Room {
            coord,
            width: self.width,
            height: self.height,
            tiles,
            profile: self.profile,
            environment,
        }
    }
}
