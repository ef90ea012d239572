//! Engine-neutral building blocks shared by the game and its tooling:
//! frame animation, input tracking, fixed-step timing and configuration.

pub mod animation;
pub mod config;
pub mod input;
pub mod time;

pub use animation::Animation;
pub use config::{load_config_from_path, GameConfig};
pub use input::{InputState, Key, MouseBtn};
pub use time::TimeState;
