//! Shape generation for 2D primitives
//!
//! Everything is built in play-field coordinates (origin top-left, y down);
//! the pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Palette, Vertex};
use crate::consts::{GROUND_DASH_LENGTH, GROUND_DASH_SPACING};
use crate::sim::{Coin, Obstacle, Player, RunSnapshot};

/// Segments used for coins and the wolf's head
const CIRCLE_SEGMENTS: u32 = 20;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Ground line plus dashes that scroll with the world
pub fn ground(
    ground_line: f32,
    field_width: f32,
    scroll_offset: f64,
    palette: &Palette,
) -> Vec<Vertex> {
    let mut vertices = rect(
        Vec2::new(0.0, ground_line),
        Vec2::new(field_width, 2.0),
        palette.ground,
    );

    let dash_y = ground_line + 6.0;
    let mut x = -((scroll_offset % f64::from(GROUND_DASH_SPACING)) as f32);
    while x < field_width {
        vertices.extend(rect(
            Vec2::new(x, dash_y),
            Vec2::new(GROUND_DASH_LENGTH, 1.0),
            palette.ground_dash,
        ));
        x += GROUND_DASH_SPACING;
    }

    vertices
}

/// Coin disc with a darker stripe for the mark
pub fn coin(coin: &Coin, palette: &Palette) -> Vec<Vertex> {
    let mut vertices = circle(coin.center, coin.radius, palette.coin, CIRCLE_SEGMENTS);
    let mark = Vec2::new(coin.radius * 0.25, coin.radius);
    vertices.extend(rect(coin.center - mark * 0.5, mark, palette.coin_mark));
    vertices
}

/// Spike: triangle filling the obstacle's box
pub fn obstacle(obstacle: &Obstacle, palette: &Palette) -> Vec<Vertex> {
    let (min, size) = (obstacle.pos, obstacle.size);
    triangle(
        Vec2::new(min.x, min.y + size.y),
        Vec2::new(min.x + size.x / 2.0, min.y),
        Vec2::new(min.x + size.x, min.y + size.y),
        palette.obstacle,
    )
}

/// The wolf: body, head, ears, legs and tail laid out in the player's box
pub fn wolf(player: &Player, palette: &Palette) -> Vec<Vertex> {
    let o = player.pos;
    let color = palette.wolf;
    let mut vertices = Vec::with_capacity(128);

    // body
    vertices.extend(rect(o + Vec2::new(12.0, 12.0), Vec2::new(26.0, 18.0), color));
    // head
    vertices.extend(circle(o + Vec2::new(10.0, 18.0), 8.0, color, CIRCLE_SEGMENTS));
    // ears
    vertices.extend(triangle(
        o + Vec2::new(4.0, 12.0),
        o + Vec2::new(6.0, 2.0),
        o + Vec2::new(10.0, 11.0),
        color,
    ));
    vertices.extend(triangle(
        o + Vec2::new(10.0, 11.0),
        o + Vec2::new(14.0, 3.0),
        o + Vec2::new(16.0, 13.0),
        color,
    ));
    // legs (tucked while airborne)
    let leg_len = if player.grounded { 6.0 } else { 3.0 };
    for leg_x in [14.0, 32.0] {
        vertices.extend(rect(o + Vec2::new(leg_x, 30.0), Vec2::new(4.0, leg_len), color));
    }
    // tail
    vertices.extend(triangle(
        o + Vec2::new(38.0, 14.0),
        o + Vec2::new(46.0, 10.0),
        o + Vec2::new(38.0, 20.0),
        color,
    ));
    // eye
    vertices.extend(circle(o + Vec2::new(7.0, 16.0), 1.5, palette.wolf_eye, 8));

    vertices
}

/// Full frame for a snapshot, back to front
pub fn scene(snapshot: &RunSnapshot<'_>, palette: &Palette, reduced_motion: bool) -> Vec<Vertex> {
    let field = snapshot.field;
    let ground_line = field.ground_y + snapshot.player.size.y;
    let scroll = if reduced_motion {
        0.0
    } else {
        snapshot.world.scroll_offset
    };

    let mut vertices = ground(ground_line, field.width, scroll, palette);
    for c in snapshot.coins {
        vertices.extend(coin(c, palette));
    }
    for o in snapshot.obstacles {
        vertices.extend(obstacle(o, palette));
    }
    vertices.extend(wolf(snapshot.player, palette));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|&x| x == 1.0 || x == 4.0));
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(10.0, 10.0);
        let v = circle(center, 5.0, [1.0; 4], 16);
        assert_eq!(v.len(), 16 * 3);
        for vert in v {
            let p = Vec2::from(vert.position);
            assert!(p.distance(center) <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_ground_dashes_scroll() {
        let palette = Palette::NORMAL;
        let still = ground(281.0, 880.0, 0.0, &palette);
        let moved = ground(281.0, 880.0, 10.0, &palette);
        // First dash starts 10 units further left once scrolled
        assert_eq!(still[6].position[0], 0.0);
        assert_eq!(moved[6].position[0], -10.0);
    }

    #[test]
    fn test_ground_dash_phase_survives_long_runs() {
        let palette = Palette::NORMAL;
        // Roughly a week of play at 60 ticks per second
        let far = ground(281.0, 880.0, 36_288_000.0 * 4.0 + 10.0, &palette);
        assert_eq!(far[6].position[0], -10.0);
    }

    #[test]
    fn test_scene_includes_every_entity() {
        let mut state = GameState::new(1, 0);
        let palette = Palette::NORMAL;
        let empty = scene(&state.snapshot(), &palette, false).len();

        state.coins.push(Coin::new(400.0, 200.0, 12.0));
        state.obstacles.push(Obstacle::new(500.0, 253.0, 32.0, 28.0));
        let full = scene(&state.snapshot(), &palette, false).len();

        let coin_len = coin(&state.coins[0], &palette).len();
        let obstacle_len = obstacle(&state.obstacles[0], &palette).len();
        assert_eq!(full, empty + coin_len + obstacle_len);
    }
}
