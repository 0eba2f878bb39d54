//! Leaf shapes.
//!
//! Extending the scene:
//! - add a new shape module under `scene::shapes::*`
//! - implement [`Shape`] for it
//! - register a constructor in [`crate::persist::TypeRegistry`] so scenes
//!   containing it can be parsed back

pub(crate) mod box_shape;
pub(crate) mod circle;

use std::fmt;

use crate::coords::{Box2, Vector2};
use crate::error::SceneError;
use crate::render::Surface;

pub use box_shape::BoxShape;
pub use circle::CircleShape;

/// Capability set of a leaf node kind.
///
/// All geometry is expressed in the node's local frame. The surface passed to
/// [`Shape::draw`] already carries the node transform.
pub trait Shape: fmt::Debug {
    /// Point containment in local coordinates.
    fn is_inside(&self, point: Vector2) -> bool;

    /// Emits the shape's geometry to `surface`.
    fn draw(&self, surface: &mut dyn Surface);

    /// Registry key used by [`crate::persist`].
    fn type_name(&self) -> &'static str;

    /// Shape parameters for persistence.
    fn to_value(&self) -> Result<serde_json::Value, SceneError>;

    /// Local-space bounding box.
    fn bounds(&self) -> Box2;
}
