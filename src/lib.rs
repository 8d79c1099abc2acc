/// Dino Runner — a side-scrolling reflex game.
///
/// Core modules:
/// - `config`: fixed start-up constants
/// - `entities`: player, ground obstacle and pursuer state machines
/// - `sprites`: per-pixel opacity masks for the built-in sprite art
/// - `compute`: spawn scheduling and collision resolution
/// - `session`: the frame loop and its collaborator traits

pub mod compute;
pub mod config;
pub mod entities;
pub mod session;
pub mod sprites;

pub use config::Config;
pub use session::{GameSession, InputEvent, SessionState};
