pub mod app_loop;
pub mod camera;
pub mod launch_args;
pub mod settings_file;

use roomwalk_core::{Direction, SessionStatus};

pub const APP_NAME: &str = "Roomwalk";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Map a `SessionStatus` to its status code string.
pub fn status_code(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Exploring => "EXPLORING",
        SessionStatus::Defeated => "DEFEATED_BY_MONSTER",
    }
}

pub fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "north",
        Direction::South => "south",
        Direction::East => "east",
        Direction::West => "west",
    }
}
