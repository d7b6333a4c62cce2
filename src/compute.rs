/// Pure physics and collision functions.
///
/// One call to [`integrate_bird`] is one fixed simulation step; nothing here
/// is scaled by wall-clock time, so the same inputs always give the same
/// trajectory.

use crate::entities::{Bird, Obstacle, Rect};

// ── Bird physics ──────────────────────────────────────────────────────────────

/// Advance the bird by one tick: gravity first, then position.
pub fn integrate_bird(bird: &mut Bird, gravity: f32) {
    bird.velocity_y += gravity;
    bird.y += bird.velocity_y;
}

/// Flap. Resets the vertical velocity instead of adding to it, so repeated
/// flaps never stack.
pub fn apply_impulse(bird: &mut Bird, jump_strength: f32) {
    bird.velocity_y = -jump_strength;
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// True if the bird has left `[0, play_height]` vertically.
pub fn out_of_bounds(bird: &Rect, play_height: f32) -> bool {
    bird.top() < 0.0 || bird.bottom() > play_height
}

/// True if the bird hits the ceiling, the floor, or either pipe of any
/// obstacle.  Touching an edge is not a hit.
pub fn collides<'a>(
    bird: &Rect,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    play_height: f32,
) -> bool {
    if out_of_bounds(bird, play_height) {
        return true;
    }
    obstacles.into_iter().any(|obstacle| {
        bird.overlaps(&obstacle.top_rect()) || bird.overlaps(&obstacle.bottom_rect(play_height))
    })
}
