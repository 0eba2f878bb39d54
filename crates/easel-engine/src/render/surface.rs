use crate::coords::{Box2, Matrix, Size, Vector2};

/// Immediate-mode 2D drawing surface.
///
/// This is the seam to a concrete backend (canvas, raster library, recorder
/// in tests). Path calls follow the usual canvas model: `begin_path`, add
/// geometry, then `fill`, `stroke` or `clip`. Styling is left to the backend.
pub trait Surface {
    /// Current surface size in surface pixels.
    fn size(&self) -> Size;

    /// Clears the whole surface.
    fn clear(&mut self);

    /// Pushes the current transform and clip state.
    fn save(&mut self);

    /// Pops the state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Replaces the current transform.
    fn set_transform(&mut self, matrix: &Matrix);

    fn begin_path(&mut self);

    fn rect(&mut self, rect: Box2);

    /// Adds a circular arc, angles in radians.
    fn arc(&mut self, center: Vector2, radius: f64, start: f64, end: f64);

    fn fill(&mut self);

    fn stroke(&mut self);

    /// Intersects the clip region with the current path.
    fn clip(&mut self);
}
