//! Collision response against static obstacles
//!
//! Bodies are moved first, then resolved against each obstacle in turn with
//! a two-pass rule: land on top if the feet crossed the obstacle's top edge
//! this step, otherwise push out sideways toward the side the body came from.

use glam::Vec2;

use super::rect::Rect;
use super::world::Obstacle;

/// Result of resolving one body against the obstacle set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Body came to rest on top of an obstacle
    pub landed: bool,
    /// Number of obstacles that pushed the body out sideways
    pub side_pushes: u32,
}

/// A moving box: where it was before integration and where it is now
#[derive(Debug)]
pub struct Body<'a> {
    pub pos: &'a mut Vec2,
    pub vel: &'a mut Vec2,
    pub size: Vec2,
    pub prev: Vec2,
}

impl Body<'_> {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(*self.pos, self.size)
    }
}

/// Landing test: feet were at or above the top edge before the move, are at
/// or below it after, and the body overlaps the obstacle horizontally.
#[inline]
pub fn crossed_top(prev_bottom: f32, rect: &Rect, obstacle: &Rect) -> bool {
    prev_bottom <= obstacle.y && rect.bottom() >= obstacle.y && rect.overlaps_x(obstacle)
}

/// Resolve a body against every obstacle in order
pub fn resolve_obstacles(body: &mut Body<'_>, obstacles: &[Obstacle]) -> CollisionResult {
    let mut result = CollisionResult::default();
    let prev_bottom = body.prev.y + body.size.y;
    let prev_right = body.prev.x + body.size.x;

    for obstacle in obstacles {
        let ob = &obstacle.rect;

        if crossed_top(prev_bottom, &body.rect(), ob) {
            body.pos.y = ob.y - body.size.y;
            body.vel.y = 0.0;
            result.landed = true;
        }

        if body.rect().intersects(ob) {
            if prev_right <= ob.x {
                // Came from the left
                body.pos.x = ob.x - body.size.x;
                result.side_pushes += 1;
            } else if body.prev.x >= ob.right() {
                // Came from the right
                body.pos.x = ob.right();
                result.side_pushes += 1;
            }
        }
    }

    result
}

/// Snap a body onto the ground line if its feet passed it.
/// Returns true when the body is now resting on the ground.
pub fn resolve_ground(pos: &mut Vec2, vel: &mut Vec2, height: f32, ground_y: f32) -> bool {
    if pos.y + height >= ground_y {
        pos.y = ground_y - height;
        vel.y = 0.0;
        true
    } else {
        false
    }
}
