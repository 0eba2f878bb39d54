use serde::{Deserialize, Serialize};

use crate::coords::{Box2, Vector2};
use crate::error::SceneError;

use super::Mask;

/// Rectangular mask.
///
/// With `invert` set the mask cuts a hole instead: points inside `bounds`
/// are rejected.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxMask {
    pub bounds: Box2,
    #[serde(default)]
    pub invert: bool,
}

impl BoxMask {
    pub const TYPE_NAME: &'static str = "box_mask";

    #[inline]
    pub fn new(bounds: Box2) -> Self {
        Self { bounds, invert: false }
    }

    #[inline]
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(Self::deserialize(value)?)
    }
}

impl Mask for BoxMask {
    fn is_inside(&self, point: Vector2) -> bool {
        self.bounds.contains_point(point) != self.invert
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn to_value(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }

    fn clip_bounds(&self) -> Option<Box2> {
        if self.invert { None } else { Some(self.bounds) }
    }
}
