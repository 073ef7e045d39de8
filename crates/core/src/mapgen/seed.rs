//! Deterministic seed mixing and pseudo-random stream helpers for room generation.

use crate::room::RoomProfile;
use crate::types::RoomCoord;

pub(super) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub(super) fn derive_room_seed(run_seed: u64, coord: RoomCoord, profile: RoomProfile) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (coord.x as u32 as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= (coord.y as u32 as u64).wrapping_mul(0x94D0_49BB_1331_11EB).rotate_left(29);
    mixed ^= profile.code().wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Sequential draws from one room seed. Each draw consumes its own stream index.
pub(super) struct SeedStream {
    seed: u64,
    next_stream: u64,
}

impl SeedStream {
    pub(super) fn new(seed: u64) -> Self {
        Self { seed, next_stream: 0 }
    }

    fn next_u64(&mut self) -> u64 {
        let value = mix_seed_stream(self.seed, self.next_stream);
        self.next_stream += 1;
        value
    }

    pub(super) fn range(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let range_size = (max_value - min_value) as u64 + 1;
        min_value + (self.next_u64() % range_size) as usize
    }

    pub(super) fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.next_u64() % bound as u64) as usize
    }

    pub(super) fn chance_permille(&mut self, permille: u16) -> bool {
        self.next_u64() % 1000 < u64::from(permille)
    }
}
