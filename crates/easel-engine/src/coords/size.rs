use super::Vector2;

/// Drawing surface size in surface pixels.
///
/// Used by [`crate::viewport::Viewport::center_on`] to find the middle of the
/// visible area.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn half(self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}
