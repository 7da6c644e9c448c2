//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be replayed or rebalanced
//! without touching simulation code. Values are validated once on load.

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

/// Gameplay constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World speed at the start of every run (units/tick)
    pub initial_speed: f32,
    /// Added to vertical velocity every tick (units/tick²)
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_velocity: f32,

    /// Coin timer must exceed this many ticks before a coin spawns
    pub coin_spawn_ticks: u32,
    /// Obstacle timer must exceed this many ticks before a spawn roll
    pub obstacle_spawn_ticks: u32,
    /// Chance an obstacle actually spawns once its timer elapses
    pub obstacle_chance: f32,

    /// Speed goes up every time score hits a multiple of this
    pub score_step: u64,
    /// Speed gained per score step
    pub speed_increment: f32,

    /// Coins left of this x are dropped
    pub coin_exit_x: f32,
    /// Obstacles left of this x are dropped
    pub obstacle_exit_x: f32,

    /// Coins appear this far past the right edge
    pub coin_spawn_offset: f32,
    pub coin_radius: f32,
    /// Coin center heights relative to the ground line (ground, low air, high air)
    pub coin_heights: [f32; 3],

    /// Obstacles appear this far past the right edge
    pub obstacle_spawn_offset: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Obstacle top edge relative to the ground line
    pub obstacle_ground_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_speed: 3.0,
            gravity: 0.5,
            jump_velocity: -10.0,

            coin_spawn_ticks: 60,
            obstacle_spawn_ticks: 110,
            obstacle_chance: 0.7,

            score_step: 5,
            speed_increment: 0.25,

            coin_exit_x: -50.0,
            obstacle_exit_x: -50.0,

            coin_spawn_offset: 30.0,
            coin_radius: 12.0,
            coin_heights: [6.0, -40.0, -90.0],

            obstacle_spawn_offset: 40.0,
            obstacle_width: 32.0,
            obstacle_height: 28.0,
            obstacle_ground_offset: 8.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key for balance overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "wolf_run_tuning";

    /// Reject values that would put NaN or runaway numbers into the sim
    pub fn validate(&self) -> anyhow::Result<()> {
        let floats = [
            ("initial_speed", self.initial_speed),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("obstacle_chance", self.obstacle_chance),
            ("speed_increment", self.speed_increment),
            ("coin_exit_x", self.coin_exit_x),
            ("obstacle_exit_x", self.obstacle_exit_x),
            ("coin_spawn_offset", self.coin_spawn_offset),
            ("coin_radius", self.coin_radius),
            ("obstacle_spawn_offset", self.obstacle_spawn_offset),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_ground_offset", self.obstacle_ground_offset),
        ];
        for (name, value) in floats {
            ensure!(value.is_finite(), "{name} must be finite, got {value}");
        }
        for (i, h) in self.coin_heights.iter().enumerate() {
            ensure!(h.is_finite(), "coin_heights[{i}] must be finite, got {h}");
        }

        ensure!(self.initial_speed >= 0.0, "initial_speed must not be negative");
        ensure!(self.gravity > 0.0, "gravity must pull downward (> 0)");
        ensure!(self.jump_velocity < 0.0, "jump_velocity must point upward (< 0)");
        ensure!(
            (0.0..=1.0).contains(&self.obstacle_chance),
            "obstacle_chance must be within [0, 1], got {}",
            self.obstacle_chance
        );
        ensure!(self.coin_spawn_ticks > 0, "coin_spawn_ticks must be positive");
        ensure!(self.obstacle_spawn_ticks > 0, "obstacle_spawn_ticks must be positive");
        ensure!(self.score_step > 0, "score_step must be positive");
        ensure!(self.speed_increment >= 0.0, "speed_increment must not be negative");
        ensure!(self.coin_radius > 0.0, "coin_radius must be positive");
        ensure!(
            self.obstacle_width > 0.0 && self.obstacle_height > 0.0,
            "obstacle size must be positive"
        );
        ensure!(
            self.coin_exit_x < 0.0 && self.obstacle_exit_x < 0.0,
            "exit thresholds must lie left of the field"
        );
        Ok(())
    }

    /// Parse a JSON override; missing fields fall back to defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("malformed tuning JSON")?;
        tuning.validate().context("invalid tuning values")?;
        Ok(tuning)
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning overrides: {e:#}"),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        let tuning = Tuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("gravity"));

        let tuning = Tuning {
            coin_heights: [6.0, f32::INFINITY, -90.0],
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let upward_gravity = Tuning {
            gravity: -0.5,
            ..Default::default()
        };
        assert!(upward_gravity.validate().is_err());

        let downward_jump = Tuning {
            jump_velocity: 4.0,
            ..Default::default()
        };
        assert!(downward_jump.validate().is_err());

        let certain_plus = Tuning {
            obstacle_chance: 1.5,
            ..Default::default()
        };
        assert!(certain_plus.validate().is_err());

        let no_step = Tuning {
            score_step: 0,
            ..Default::default()
        };
        assert!(no_step.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "speed_increment": 0.3, "score_step": 6 }"#).unwrap();
        assert_eq!(tuning.score_step, 6);
        assert!((tuning.speed_increment - 0.3).abs() < f32::EPSILON);
        // Untouched fields keep their defaults
        assert_eq!(tuning.coin_spawn_ticks, 60);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Tuning::from_json("not json").is_err());
        assert!(Tuning::from_json(r#"{ "obstacle_chance": -1.0 }"#).is_err());
    }
}
