//! Collision detection between the player and obstacle columns
//!
//! Everything here is a pure predicate over boxes. Boxes that only share an
//! edge do not collide.

use super::aabb::Aabb;
use super::obstacle::{ObstacleId, ObstaclePair};

/// True if the interiors of `a` and `b` intersect
#[inline]
pub fn overlap(a: &Aabb, b: &Aabb) -> bool {
    !(a.right() <= b.left()
        || a.left() >= b.right()
        || a.bottom() <= b.top()
        || a.top() >= b.bottom())
}

/// First obstacle whose upper or lower column overlaps `player`
pub fn first_collision(player: &Aabb, obstacles: &[ObstaclePair]) -> Option<ObstacleId> {
    obstacles
        .iter()
        .find(|pair| overlap(player, &pair.upper_box()) || overlap(player, &pair.lower_box()))
        .map(|pair| pair.id)
}

/// True if `player` overlaps any live obstacle
pub fn check_collision(player: &Aabb, obstacles: &[ObstaclePair]) -> bool {
    first_collision(player, obstacles).is_some()
}
