//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own the room fingerprint format.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u8(match self.status {
            SessionStatus::Exploring => 0,
            SessionStatus::Defeated => 1,
        });
        hasher.write_u32(self.items_collected);
        hasher.write_u64(self.cache.len() as u64);

        let coord = self.current_coord();
        hasher.write_i32(coord.x);
        hasher.write_i32(coord.y);
        hasher.write_u64(self.current_room().fingerprint());

        let player = &self.player;
        hasher.write_u32(player.x.to_bits());
        hasher.write_u32(player.y.to_bits());
        hasher.write_u32(player.velocity_y.to_bits());
        hasher.write_u8(u8::from(player.on_ground));
        if let Some(penalty) = player.penalty {
            hasher.write_u64(penalty.until_tick);
            hasher.write_u32(penalty.factor.to_bits());
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn hash_changes_when_the_player_moves() {
        let mut session = open_dungeon_session();
        let before = session.snapshot_hash();
        session.tick(&RIGHT);
        assert_ne!(before, session.snapshot_hash());
    }

    #[test]
    fn identical_runs_hash_identically() {
        let run = || {
            let mut session = Session::new(31, GameConfig::default()).expect("valid config");
            for step in 0..120 {
                let input = if step % 40 < 20 { RIGHT } else { LEFT };
                session.tick(&input);
            }
            session.snapshot_hash()
        };
        assert_eq!(run(), run());
    }
}
