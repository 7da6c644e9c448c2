//! Vertical motion for the player: jump launch, gravity, ground clamp

use super::state::Player;
use crate::tuning::Tuning;

/// Advance the player one tick. Returns true if a jump launched this tick.
///
/// Jump intent is a level: holding it while airborne does nothing, and it
/// only launches again once the player is back on the ground.
pub fn integrate(player: &mut Player, jump: bool, tuning: &Tuning, ground_y: f32) -> bool {
    let launched = jump && player.grounded;
    if launched {
        player.vel_y = tuning.jump_velocity;
        player.grounded = false;
    }

    player.vel_y += tuning.gravity;
    player.pos.y += player.vel_y;

    if player.pos.y >= ground_y {
        player.pos.y = ground_y;
        player.vel_y = 0.0;
        player.grounded = true;
    } else {
        player.grounded = false;
    }

    launched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_Y;
    use proptest::prelude::*;

    #[test]
    fn test_jump_from_ground() {
        let tuning = Tuning::default();
        let mut player = Player::new(GROUND_Y);

        assert!(integrate(&mut player, true, &tuning, GROUND_Y));
        assert!(!player.grounded);
        assert_eq!(player.vel_y, tuning.jump_velocity + tuning.gravity);
        assert_eq!(player.pos.y, GROUND_Y + (tuning.jump_velocity + tuning.gravity));
    }

    #[test]
    fn test_idle_on_ground_stays_clamped() {
        let tuning = Tuning::default();
        let mut player = Player::new(GROUND_Y);

        for _ in 0..10 {
            assert!(!integrate(&mut player, false, &tuning, GROUND_Y));
            assert!(player.grounded);
            assert_eq!(player.pos.y, GROUND_Y);
            assert_eq!(player.vel_y, 0.0);
        }
    }

    #[test]
    fn test_holding_jump_while_airborne_does_nothing() {
        let tuning = Tuning::default();
        let mut held = Player::new(GROUND_Y);
        let mut tapped = Player::new(GROUND_Y);

        integrate(&mut held, true, &tuning, GROUND_Y);
        integrate(&mut tapped, true, &tuning, GROUND_Y);

        // Same arc whether jump stays held or is released
        while !tapped.grounded {
            assert!(!integrate(&mut held, true, &tuning, GROUND_Y));
            integrate(&mut tapped, false, &tuning, GROUND_Y);
            assert_eq!(held, tapped);
        }
        assert!(held.grounded);

        // Back on the ground, the held input launches again
        assert!(integrate(&mut held, true, &tuning, GROUND_Y));
    }

    #[test]
    fn test_full_jump_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new(GROUND_Y);
        integrate(&mut player, true, &tuning, GROUND_Y);

        let mut ticks = 1;
        let mut apex = player.pos.y;
        while !player.grounded {
            integrate(&mut player, false, &tuning, GROUND_Y);
            apex = apex.min(player.pos.y);
            ticks += 1;
            assert!(ticks < 100, "player never landed");
        }
        assert_eq!(player.pos.y, GROUND_Y);
        // -10 launch at 0.5 gravity peaks roughly 100 units up
        assert!(GROUND_Y - apex > 90.0 && GROUND_Y - apex < 110.0);
    }

    proptest! {
        #[test]
        fn prop_airborne_fall_follows_gravity(
            height in 1.0f32..200.0,
            vel in -12.0f32..12.0,
        ) {
            let tuning = Tuning::default();
            let mut player = Player::new(GROUND_Y);
            player.pos.y = GROUND_Y - height;
            player.vel_y = vel;
            player.grounded = false;

            let before = player.pos.y;
            integrate(&mut player, false, &tuning, GROUND_Y);
            let expected = before + (vel + tuning.gravity);

            if expected >= GROUND_Y {
                prop_assert!(player.grounded);
                prop_assert_eq!(player.pos.y, GROUND_Y);
                prop_assert_eq!(player.vel_y, 0.0);
            } else {
                prop_assert!(!player.grounded);
                prop_assert_eq!(player.pos.y, expected);
                prop_assert_eq!(player.vel_y, vel + tuning.gravity);
            }
        }
    }
}
