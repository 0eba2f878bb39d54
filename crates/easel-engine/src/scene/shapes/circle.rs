use core::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::coords::{Box2, Vector2};
use crate::error::SceneError;
use crate::render::Surface;

use super::Shape;

/// Circle centered on the local origin.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub radius: f64,
}

impl CircleShape {
    pub const TYPE_NAME: &'static str = "circle";

    #[inline]
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self, SceneError> {
        let shape = Self::deserialize(value)?;
        if !shape.radius.is_finite() || shape.radius < 0.0 {
            return Err(SceneError::malformed(format!("circle radius {}", shape.radius)));
        }
        Ok(shape)
    }
}

impl Shape for CircleShape {
    fn is_inside(&self, point: Vector2) -> bool {
        point.length() <= self.radius
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.arc(Vector2::zero(), self.radius, 0.0, TAU);
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
        let r = Vector2::new(self.radius, self.radius);
        Box2::new(-r, r)
    }
}
