//! One simulation tick
//!
//! Handles phase transitions from the sampled input, then, while playing,
//! runs physics, spawning, scrolling, scoring and collisions in that order.

use super::collision::{rect_hits_circle, rect_hits_rect};
use super::physics::integrate;
use super::spawn::spawn_step;
use super::state::{GameEvent, GamePhase, GameState};

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump held (key or pointer down)
    pub jump: bool,
    /// Pause toggle (edge)
    pub pause: bool,
    /// Restart request (edge)
    pub restart: bool,
    /// Start request (edge, tap/Enter)
    pub start: bool,
}

/// Advance the run by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Start => {
            if input.start || input.jump {
                state.start();
            }
            return;
        }
        GamePhase::Over => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::Play => {
            if input.pause {
                state.toggle_pause();
                return;
            }
        }
        GamePhase::Pause => {
            if !input.pause {
                return;
            }
            // Resume and carry on with this tick
            state.toggle_pause();
        }
    }

    step(state, input.jump);
}

/// The Play-phase step
fn step(state: &mut GameState, jump: bool) {
    let speed = state.world.speed;
    state.world.scroll_offset += f64::from(speed);

    if integrate(&mut state.player, jump, &state.tuning, state.field.ground_y) {
        state.events.push(GameEvent::Jumped);
    }

    let spawned = spawn_step(&mut state.world, &state.tuning, &state.field, &mut state.rng);

    // Existing entities scroll first so new ones sit exactly on the spawn line
    for coin in &mut state.coins {
        coin.center.x -= speed;
    }
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    state.coins.extend(spawned.coin);
    state.obstacles.extend(spawned.obstacle);

    collect_coins(state);
    check_obstacles(state);

    let (coin_exit, obstacle_exit) = (state.tuning.coin_exit_x, state.tuning.obstacle_exit_x);
    state
        .coins
        .retain(|c| !c.collected && c.center.x >= coin_exit);
    state.obstacles.retain(|o| o.pos.x >= obstacle_exit);
}

fn collect_coins(state: &mut GameState) {
    let player = state.player.bounds();
    for coin in &mut state.coins {
        if coin.collected || !rect_hits_circle(&player, &coin.bounds()) {
            continue;
        }
        coin.collected = true;
        state.world.score += 1;
        let score = state.world.score;
        state.events.push(GameEvent::CoinCollected { score });

        if score.is_multiple_of(state.tuning.score_step) {
            state.world.speed += state.tuning.speed_increment;
            let speed = state.world.speed;
            state.events.push(GameEvent::SpeedUp { speed });
            log::debug!("Speed up to {:.2} at score {}", speed, score);
        }
    }
}

fn check_obstacles(state: &mut GameState) {
    let player = state.player.bounds();
    if state
        .obstacles
        .iter()
        .any(|o| rect_hits_rect(&player, &o.bounds()))
    {
        state.crash();
    }
}
