pub mod cache;
pub mod config;
pub mod environment;
pub mod input;
pub mod mapgen;
pub mod movement;
pub mod room;
pub mod session;
pub mod types;

pub use cache::{RoomCache, RoomId};
pub use config::{ConfigError, GameConfig};
pub use environment::{Environment, Particle, ParticleField, ParticleKind, Rgb};
pub use input::{InputSource, InputState, ScriptedInput};
pub use mapgen::{GenerationContext, RoomGenerator, SideConstraint, generate_room};
pub use movement::{MovementParams, Player, SpeedPenalty};
pub use room::{Room, RoomProfile};
pub use session::Session;
pub use types::*;
