//! Coordinate and geometry types shared by the scene, dispatcher and renderer.
//!
//! Canonical space:
//! - `f64` scene units
//! - Origin top-left
//! - +X right, +Y down, positive rotation is clockwise

mod box2;
mod matrix;
mod size;
mod vec2;

pub use box2::Box2;
pub use matrix::Matrix;
pub use size::Size;
pub use vec2::Vector2;
