use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use roomwalk_core::MovementModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchArgs {
    pub seed: SeedChoice,
    /// Overrides the movement model from the settings file when present.
    pub movement: Option<MovementModel>,
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

pub fn resolve_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchArgs, String> {
    let mut selected_seed = None;
    let mut movement = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();

        let (flag, inline_value) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument, None),
        };
        let value = match (flag, inline_value) {
            ("--seed" | "--mode", Some(value)) => value,
            ("--seed" | "--mode", None) => {
                let Some(value) = args.get(index + 1) else {
                    return Err(format!("missing value for {flag}"));
                };
                index += 1;
                value.as_str()
            }
            _ => {
                index += 1;
                continue;
            }
        };
        index += 1;

        if flag == "--seed" {
            if selected_seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            selected_seed = Some(parse_seed_value(value)?);
        } else {
            if movement.is_some() {
                return Err("mode provided more than once".to_string());
            }
            movement = Some(parse_mode_value(value)?);
        }
    }

    let seed = match selected_seed {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(generated_seed),
    };
    Ok(LaunchArgs { seed, movement })
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn parse_mode_value(raw_value: &str) -> Result<MovementModel, String> {
    match raw_value {
        "dungeon" => Ok(MovementModel::Dungeon),
        "platformer" => Ok(MovementModel::Platformer),
        _ => Err(format!("mode '{raw_value}' must be 'dungeon' or 'platformer'")),
    }
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn uses_generated_seed_when_seed_flag_is_absent() {
        let args = as_args(&["roomwalk"]);
        let launch = resolve_launch_args(&args, 9_876_543).expect("no flags should resolve");
        assert_eq!(launch.seed, SeedChoice::Generated(9_876_543));
        assert_eq!(launch.movement, None);
    }

    #[test]
    fn parses_seed_flag_with_separate_value() {
        let args = as_args(&["roomwalk", "--seed", "4242"]);
        let launch = resolve_launch_args(&args, 1).expect("valid --seed should parse");
        assert_eq!(launch.seed, SeedChoice::Cli(4_242));
    }

    #[test]
    fn parses_seed_flag_with_inline_value() {
        let args = as_args(&["roomwalk", "--seed=2026"]);
        let launch = resolve_launch_args(&args, 1).expect("valid --seed should parse");
        assert_eq!(launch.seed.value(), 2_026);
    }

    #[test]
    fn parses_mode_in_both_spellings() {
        let separate = as_args(&["roomwalk", "--mode", "platformer"]);
        let inline = as_args(&["roomwalk", "--mode=dungeon", "--seed", "5"]);
        assert_eq!(
            resolve_launch_args(&separate, 1).expect("mode parses").movement,
            Some(MovementModel::Platformer)
        );
        let launch = resolve_launch_args(&inline, 1).expect("mode and seed parse");
        assert_eq!(launch.movement, Some(MovementModel::Dungeon));
        assert_eq!(launch.seed, SeedChoice::Cli(5));
    }

    #[test]
    fn errors_when_seed_flag_has_no_value() {
        let args = as_args(&["roomwalk", "--seed"]);
        let err = resolve_launch_args(&args, 1).expect_err("missing seed value should error");
        assert!(err.contains("missing"), "error should explain missing value: {err}");
    }

    #[test]
    fn errors_when_seed_value_is_not_a_number() {
        let args = as_args(&["roomwalk", "--seed=abc"]);
        let err = resolve_launch_args(&args, 1).expect_err("non-numeric seed value should error");
        assert!(err.contains("number"), "error should explain numeric requirement: {err}");
    }

    #[test]
    fn errors_on_unknown_mode() {
        let args = as_args(&["roomwalk", "--mode", "racing"]);
        let err = resolve_launch_args(&args, 1).expect_err("unknown mode should error");
        assert!(err.contains("platformer"), "error should list the valid modes: {err}");
    }

    #[test]
    fn errors_when_seed_is_provided_more_than_once() {
        let args = as_args(&["roomwalk", "--seed=1", "--seed", "2"]);
        let err =
            resolve_launch_args(&args, 1).expect_err("duplicate seed flags should be rejected");
        assert!(err.contains("more than once"), "error should explain duplicate seed: {err}");
    }

    #[test]
    fn unrelated_arguments_are_ignored() {
        let args = as_args(&["roomwalk", "--fullscreen", "--seed", "3"]);
        let launch = resolve_launch_args(&args, 1).expect("unknown flags are skipped");
        assert_eq!(launch.seed, SeedChoice::Cli(3));
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}
