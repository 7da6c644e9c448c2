//! Timer-driven spawning of coins and obstacles at the right edge

use rand::Rng;

use super::state::{Coin, Obstacle, PlayField, World};
use crate::tuning::Tuning;

/// Entities created by one spawner step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spawned {
    pub coin: Option<Coin>,
    pub obstacle: Option<Obstacle>,
}

/// Advance both spawn timers by one tick and emit whatever is due.
///
/// A coin always spawns when its timer elapses. An obstacle timer elapsing
/// only earns a roll against `obstacle_chance`; the timer resets either way.
pub fn spawn_step<R: Rng + ?Sized>(
    world: &mut World,
    tuning: &Tuning,
    field: &PlayField,
    rng: &mut R,
) -> Spawned {
    let mut spawned = Spawned::default();

    world.coin_timer += 1;
    if world.coin_timer > tuning.coin_spawn_ticks {
        world.coin_timer = 0;
        spawned.coin = Some(spawn_coin(tuning, field, rng));
    }

    world.obstacle_timer += 1;
    if world.obstacle_timer > tuning.obstacle_spawn_ticks {
        world.obstacle_timer = 0;
        if rng.random::<f32>() < tuning.obstacle_chance {
            spawned.obstacle = Some(spawn_obstacle(tuning, field));
        }
    }

    spawned
}

/// Coin at the right spawn boundary, at one of the three lanes
pub fn spawn_coin<R: Rng + ?Sized>(tuning: &Tuning, field: &PlayField, rng: &mut R) -> Coin {
    let lane = ((rng.random::<f32>() * 3.0) as usize).min(2);
    let y = field.ground_y + tuning.coin_heights[lane];
    log::debug!("Spawned coin in lane {}", lane);
    Coin::new(field.width + tuning.coin_spawn_offset, y, tuning.coin_radius)
}

/// Obstacle at the right spawn boundary, top aligned just below the ground line
pub fn spawn_obstacle(tuning: &Tuning, field: &PlayField) -> Obstacle {
    log::debug!("Spawned obstacle");
    Obstacle::new(
        field.width + tuning.obstacle_spawn_offset,
        field.ground_y + tuning.obstacle_ground_offset,
        tuning.obstacle_width,
        tuning.obstacle_height,
    )
}

#[cfg(test)]
pub(crate) mod test_rng {
    use rand::RngCore;

    /// Returns the same word forever: 0 rolls ~0.0, u32::MAX rolls ~1.0
    pub struct ConstRng(pub u32);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(4) {
                let bytes = self.0.to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_rng::ConstRng;
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fresh_world() -> World {
        World::new(3.0, 0)
    }

    #[test]
    fn test_coin_spawns_after_threshold() {
        let tuning = Tuning::default();
        let field = PlayField::default();
        let mut world = fresh_world();
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..tuning.coin_spawn_ticks {
            assert!(spawn_step(&mut world, &tuning, &field, &mut rng).coin.is_none());
        }
        let coin = spawn_step(&mut world, &tuning, &field, &mut rng)
            .coin
            .expect("coin due on tick 61");
        assert_eq!(world.coin_timer, 0);
        assert_eq!(coin.center.x, field.width + 30.0);
        assert!(
            tuning
                .coin_heights
                .iter()
                .any(|h| coin.center.y == field.ground_y + h)
        );
        assert!(!coin.collected);
    }

    #[test]
    fn test_coin_lanes_cover_all_heights() {
        let tuning = Tuning::default();
        let field = PlayField::default();

        let low = spawn_coin(&tuning, &field, &mut ConstRng(0));
        assert_eq!(low.center.y, field.ground_y + 6.0);

        let high = spawn_coin(&tuning, &field, &mut ConstRng(u32::MAX));
        assert_eq!(high.center.y, field.ground_y - 90.0);

        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let coin = spawn_coin(&tuning, &field, &mut rng);
            let lane = tuning
                .coin_heights
                .iter()
                .position(|h| coin.center.y == field.ground_y + h)
                .expect("coin outside the lanes");
            seen[lane] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_obstacle_spawn_roll_succeeds() {
        let tuning = Tuning::default();
        let field = PlayField::default();
        let mut world = fresh_world();
        world.obstacle_timer = tuning.obstacle_spawn_ticks;

        let spawned = spawn_step(&mut world, &tuning, &field, &mut ConstRng(0));
        let obstacle = spawned.obstacle.expect("roll of 0.0 should spawn");
        assert_eq!(world.obstacle_timer, 0);
        assert_eq!(obstacle.pos.x, field.width + 40.0);
        assert_eq!(obstacle.pos.y, field.ground_y + 8.0);
        assert_eq!(obstacle.size.x, 32.0);
        assert_eq!(obstacle.size.y, 28.0);
    }

    #[test]
    fn test_obstacle_timer_resets_on_failed_roll() {
        let tuning = Tuning::default();
        let field = PlayField::default();
        let mut world = fresh_world();
        world.obstacle_timer = tuning.obstacle_spawn_ticks;

        let spawned = spawn_step(&mut world, &tuning, &field, &mut ConstRng(u32::MAX));
        assert!(spawned.obstacle.is_none());
        assert_eq!(world.obstacle_timer, 0);
    }

    #[test]
    fn test_obstacle_rate_roughly_matches_chance() {
        let tuning = Tuning::default();
        let field = PlayField::default();
        let mut world = fresh_world();
        let mut rng = Pcg32::seed_from_u64(2024);

        let rolls = 1000;
        let mut hits = 0;
        for _ in 0..rolls {
            world.obstacle_timer = tuning.obstacle_spawn_ticks;
            if spawn_step(&mut world, &tuning, &field, &mut rng)
                .obstacle
                .is_some()
            {
                hits += 1;
            }
        }
        let rate = hits as f32 / rolls as f32;
        assert!((0.62..0.78).contains(&rate), "rate {rate}");
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let tuning = Tuning::default();
        let field = PlayField::default();
        let (mut w1, mut w2) = (fresh_world(), fresh_world());
        let mut r1 = Pcg32::seed_from_u64(99);
        let mut r2 = Pcg32::seed_from_u64(99);

        for _ in 0..1000 {
            assert_eq!(
                spawn_step(&mut w1, &tuning, &field, &mut r1),
                spawn_step(&mut w2, &tuning, &field, &mut r2)
            );
        }
    }
}
