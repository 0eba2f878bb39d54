use serde::{Deserialize, Serialize};

use super::Vector2;

/// Axis-aligned box described by its min and max corners.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Box2 {
    pub min: Vector2,
    pub max: Vector2,
}

impl Box2 {
    #[inline]
    pub const fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    /// Box spanning two arbitrary corners, normalized so `min <= max`.
    #[inline]
    pub fn from_points(a: Vector2, b: Vector2) -> Self {
        Self {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub fn size(self) -> Vector2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(self) -> Vector2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Closed containment: points on the edges are inside.
    #[inline]
    pub fn contains_point(self, p: Vector2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn intersects(self, other: Box2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    #[inline]
    pub fn union(self, other: Box2) -> Box2 {
        Box2::new(
            Vector2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Vector2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }
}
