//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, rect_hits_circle, rect_hits_rect};
pub use physics::integrate;
pub use spawn::{Spawned, spawn_step};
pub use state::{
    Coin, GameEvent, GamePhase, GameState, Obstacle, PlayField, Player, RunSnapshot, World,
};
pub use tick::{TickInput, tick};
