use serde::{Deserialize, Serialize};

use crate::coords::{Box2, Vector2};
use crate::error::SceneError;
use crate::render::Surface;

use super::Shape;

/// Axis-aligned box in local coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub bounds: Box2,
}

impl BoxShape {
    pub const TYPE_NAME: &'static str = "box";

    #[inline]
    pub fn new(bounds: Box2) -> Self {
        Self { bounds }
    }

    /// Box of the given size centered on the local origin.
    #[inline]
    pub fn centered(width: f64, height: f64) -> Self {
        let half = Vector2::new(width / 2.0, height / 2.0);
        Self::new(Box2::new(-half, half))
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(Self::deserialize(value)?)
    }
}

impl Shape for BoxShape {
    fn is_inside(&self, point: Vector2) -> bool {
        self.bounds.contains_point(point)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.rect(self.bounds);
        surface.fill();
        surface.stroke();
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn to_value(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }

    fn bounds(&self) -> Box2 {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_box_contains_origin() {
        let b = BoxShape::centered(10.0, 4.0);
        assert!(b.is_inside(Vector2::zero()));
        assert!(b.is_inside(Vector2::new(5.0, 2.0)));
        assert!(!b.is_inside(Vector2::new(5.1, 0.0)));
    }

    #[test]
    fn value_round_trip() {
        let b = BoxShape::centered(8.0, 6.0);
        assert_eq!(BoxShape::from_value(&b.to_value().unwrap()).unwrap(), b);
    }
}
