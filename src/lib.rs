//! Dodge Football - a single-screen dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, timers, spawning, game state)
//! - `scene`: Start / Game / Game Over flow and high score bookkeeping
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `persistence`: Versioned JSON save envelope
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use scene::{RunSummary, Scene, Session, UiAction};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sprite sizes in pixels
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const SKELETON_SIZE: f32 = 24.0;
    pub const POWER_UP_SIZE: f32 = 28.0;

    /// World size used when there is no window to measure
    pub const DEFAULT_WORLD_WIDTH: f32 = 800.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
}

/// Center of a world of the given size
#[inline]
pub fn world_center(world: Vec2) -> Vec2 {
    world * 0.5
}

/// Inclusive integer range sample, matching the arcade "between" helper
#[inline]
pub fn random_between<R: rand::Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}
