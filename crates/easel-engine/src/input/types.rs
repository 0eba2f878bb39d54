use std::fmt;
use std::time::Instant;

use crate::coords::Vector2;

/// Pointer button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Left,
    Middle,
    Right,
    Back,
    Forward,
    /// Platform-dependent button not represented above.
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic pointer events, in surface pixels.
///
/// A platform layer translates its own events into these and feeds them to
/// [`super::Pointer::apply_event`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Moved {
        position: Vector2,
    },

    /// Button transition. The position is included so a press without a
    /// preceding move still lands where it happened.
    Button {
        button: PointerButton,
        state: ButtonState,
        position: Vector2,
        /// Used for double-click detection.
        time: Instant,
    },

    /// Pointer left the surface.
    Left,
}

impl PointerEvent {
    #[inline]
    pub fn moved(x: f64, y: f64) -> Self {
        Self::Moved { position: Vector2::new(x, y) }
    }

    /// Press of `button` at `(x, y)`, stamped with `time`.
    #[inline]
    pub fn pressed(button: PointerButton, x: f64, y: f64, time: Instant) -> Self {
        Self::Button { button, state: ButtonState::Pressed, position: Vector2::new(x, y), time }
    }

    #[inline]
    pub fn released(button: PointerButton, x: f64, y: f64, time: Instant) -> Self {
        Self::Button { button, state: ButtonState::Released, position: Vector2::new(x, y), time }
    }
}

impl fmt::Display for PointerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
