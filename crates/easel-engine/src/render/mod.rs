//! Drawing.
//!
//! Shapes emit geometry to a backend-agnostic [`Surface`]; the [`Renderer`]
//! walks the scene in paint order and sets up transforms and mask clips for
//! each node.
//!
//! Convention:
//! - surface coordinates are pixels (top-left origin, +Y down)
//! - the surface transform is replaced per node, never accumulated

mod renderer;
mod surface;

pub use renderer::Renderer;
pub use surface::Surface;
