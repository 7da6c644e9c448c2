//! Game state and core simulation types
//!
//! One `GameState` owns everything a run mutates. Nothing in here touches
//! the browser.

use anyhow::Context;
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Rect};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first jump/tap
    Start,
    /// Active gameplay
    Play,
    /// Everything frozen in place
    Pause,
    /// Hit an obstacle
    Over,
}

/// Something the host may want to react to (sounds, storage)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    Jumped,
    CoinCollected { score: u64 },
    SpeedUp { speed: f32 },
    Crashed { score: u64 },
    /// Best score beaten; the host should flush it to storage
    NewBest { best: u64 },
    Paused,
    Resumed,
    Restarted,
}

/// Play field supplied by the display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
    /// Player top edge when standing
    pub ground_y: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            ground_y: GROUND_Y,
        }
    }
}

/// The wolf
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative = up)
    pub vel_y: f32,
    pub grounded: bool,
}

impl Player {
    pub fn new(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, ground_y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            grounded: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub center: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
            collected: false,
        }
    }

    pub fn bounds(&self) -> Circle {
        Circle {
            center: self.center,
            radius: self.radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

/// Scalars that drive the run
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// Horizontal scroll rate, never decreases within a run
    pub speed: f32,
    /// Accumulated scroll distance (ground decoration). Kept in f64 so the
    /// dash phase stays exact over long runs.
    pub scroll_offset: f64,
    pub coin_timer: u32,
    pub obstacle_timer: u32,
    pub score: u64,
    /// Survives restarts
    pub best_score: u64,
}

impl World {
    pub fn new(initial_speed: f32, best_score: u64) -> Self {
        Self {
            speed: initial_speed,
            scroll_offset: 0.0,
            coin_timer: 0,
            obstacle_timer: 0,
            score: 0,
            best_score,
        }
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    pub world: World,
    pub field: PlayField,
    pub tuning: Tuning,
    /// Spawn randomness; keeps advancing across restarts
    pub rng: Pcg32,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a run in the Start phase with default field and tuning
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self::build(seed, best_score, PlayField::default(), Tuning::default())
    }

    /// Create a run with explicit field and tuning. Tuning that fails
    /// validation is rejected.
    pub fn with_config(
        seed: u64,
        best_score: u64,
        field: PlayField,
        tuning: Tuning,
    ) -> anyhow::Result<Self> {
        tuning.validate().context("tuning rejected for new run")?;
        Ok(Self::build(seed, best_score, field, tuning))
    }

    fn build(seed: u64, best_score: u64, field: PlayField, tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Start,
            player: Player::new(field.ground_y),
            coins: Vec::new(),
            obstacles: Vec::new(),
            world: World::new(tuning.initial_speed, best_score),
            field,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Start -> Play. Ignored in any other phase.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Start {
            self.phase = GamePhase::Play;
            self.events.push(GameEvent::Started);
            log::info!("Run started");
        }
    }

    /// Over -> Start with everything but the best score reset.
    /// Ignored in any other phase.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::Over {
            return;
        }
        self.player = Player::new(self.field.ground_y);
        self.coins.clear();
        self.obstacles.clear();
        self.world = World::new(self.tuning.initial_speed, self.world.best_score);
        self.phase = GamePhase::Start;
        self.events.push(GameEvent::Restarted);
        log::info!("Run reset (best {})", self.world.best_score);
    }

    /// Play <-> Pause. Ignored in Start and Over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Play => {
                self.phase = GamePhase::Pause;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Pause => {
                self.phase = GamePhase::Play;
                self.events.push(GameEvent::Resumed);
            }
            GamePhase::Start | GamePhase::Over => {}
        }
    }

    /// End the run, keeping the higher of score and best
    pub fn crash(&mut self) {
        self.phase = GamePhase::Over;
        let score = self.world.score;
        self.events.push(GameEvent::Crashed { score });
        if score > self.world.best_score {
            self.world.best_score = score;
            self.events.push(GameEvent::NewBest { best: score });
            log::info!("Game over - new best {}", score);
        } else {
            log::info!("Game over - score {} (best {})", score, self.world.best_score);
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the render stage
    pub fn snapshot(&self) -> RunSnapshot<'_> {
        RunSnapshot {
            phase: self.phase,
            player: &self.player,
            coins: &self.coins,
            obstacles: &self.obstacles,
            world: &self.world,
            field: self.field,
        }
    }
}

/// What the render stage and HUD get to see after a tick
#[derive(Debug, Clone, Copy)]
pub struct RunSnapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub coins: &'a [Coin],
    pub obstacles: &'a [Obstacle],
    pub world: &'a World,
    pub field: PlayField,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let state = GameState::new(1, 10);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_X, GROUND_Y));
        assert!(state.player.grounded);
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.coins.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.world.score, 0);
        assert_eq!(state.world.best_score, 10);
        assert!((state.world.speed - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_restart_only_from_over() {
        let mut state = GameState::new(1, 0);
        state.restart();
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.events.is_empty());

        state.start();
        state.world.score = 3;
        state.restart();
        assert_eq!(state.phase, GamePhase::Play);
        assert_eq!(state.world.score, 3);
    }

    #[test]
    fn test_crash_keeps_higher_best() {
        let mut state = GameState::new(1, 10);
        state.start();
        state.world.score = 12;
        state.crash();
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.world.best_score, 12);
        assert!(state.events.contains(&GameEvent::NewBest { best: 12 }));

        let mut state = GameState::new(1, 10);
        state.start();
        state.world.score = 7;
        state.crash();
        assert_eq!(state.world.best_score, 10);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::NewBest { .. }))
        );
    }

    #[test]
    fn test_pause_ignored_outside_play() {
        let mut state = GameState::new(1, 0);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Start);

        state.phase = GamePhase::Over;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_with_config_validates_tuning() {
        let tuning = Tuning {
            gravity: f32::NAN,
            ..Tuning::default()
        };
        assert!(GameState::with_config(1, 0, PlayField::default(), tuning).is_err());

        let tuning = Tuning {
            obstacle_chance: 1.0,
            ..Tuning::default()
        };
        let state = GameState::with_config(1, 3, PlayField::default(), tuning)
            .expect("valid tuning");
        assert_eq!(state.world.best_score, 3);
        assert_eq!(state.tuning.obstacle_chance, 1.0);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1, 0);
        state.start();
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(1, 4);
        state.coins.push(Coin::new(300.0, 200.0, 12.0));
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Start);
        assert_eq!(snap.coins.len(), 1);
        assert_eq!(snap.world.best_score, 4);
        assert_eq!(snap.field, PlayField::default());
    }
}
