//! Wolf Run - An endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering of run snapshots
//! - `platform`: Browser/native input sampling
//! - `persistence`: Best score storage
//! - `tuning`: Data-driven game balance
//! - `audio`: Procedural sound effects (Web Audio)

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical play field size (CSS pixels before DPR scaling)
    pub const FIELD_WIDTH: f32 = 880.0;
    pub const FIELD_HEIGHT: f32 = 340.0;
    /// Player top edge when standing (y grows downward)
    pub const GROUND_Y: f32 = 245.0;

    /// Player defaults - the wolf never moves horizontally
    pub const PLAYER_X: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 46.0;
    pub const PLAYER_HEIGHT: f32 = 36.0;

    /// Spacing of the scrolling ground dashes
    pub const GROUND_DASH_SPACING: f32 = 40.0;
    pub const GROUND_DASH_LENGTH: f32 = 18.0;
}
