use std::collections::HashSet;

use crate::coords::Vector2;

use super::types::{PointerButton, PointerEvent};

/// Per-frame pointer deltas.
///
/// [`super::Pointer`] holds the current state (position, held buttons);
/// `PointerFrame` holds what changed since the last `end_frame`.
#[derive(Debug, Default)]
pub struct PointerFrame {
    /// Raw events in arrival order.
    pub events: Vec<PointerEvent>,

    /// Buttons pressed this frame.
    pub buttons_pressed: HashSet<PointerButton>,

    /// Buttons released this frame.
    pub buttons_released: HashSet<PointerButton>,

    /// Presses this frame that completed a double click.
    pub double_clicked: HashSet<PointerButton>,

    /// Accumulated movement in surface pixels.
    pub delta: Vector2,
}

impl PointerFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.double_clicked.clear();
        self.delta = Vector2::zero();
    }

    pub fn push_event(&mut self, ev: PointerEvent) {
        self.events.push(ev);
    }
}
