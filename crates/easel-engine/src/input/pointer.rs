use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::coords::Vector2;

use super::frame::PointerFrame;
use super::types::{ButtonState, PointerButton, PointerEvent};

/// Double-click thresholds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerConfig {
    /// Maximum time between two presses of the same button.
    pub double_click_time: Duration,
    /// Maximum distance in surface pixels between the two presses.
    pub double_click_distance: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            double_click_time: Duration::from_millis(300),
            double_click_distance: 5.0,
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct LastPress {
    button: PointerButton,
    position: Vector2,
    time: Instant,
}

/// Pointer state for one surface.
///
/// Events are folded in with [`Pointer::apply_event`] as they arrive; the
/// frame consumer reads the edge queries and calls [`Pointer::end_frame`]
/// once it is done.
#[derive(Debug, Default)]
pub struct Pointer {
    config: PointerConfig,

    /// Position in surface pixels; `None` while the pointer is off the surface.
    position: Option<Vector2>,

    /// Currently held buttons.
    buttons_down: HashSet<PointerButton>,

    frame: PointerFrame,
    last_press: Option<LastPress>,
}

impl Pointer {
    pub fn new(config: PointerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[inline]
    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Applies a pointer event to the current state and records the edges
    /// for this frame.
    pub fn apply_event(&mut self, ev: PointerEvent) {
        match ev {
            PointerEvent::Moved { position } => self.move_to(position),

            PointerEvent::Left => {
                self.position = None;
            }

            PointerEvent::Button { button, state, position, time } => {
                self.move_to(position);
                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(button) {
                            self.frame.buttons_pressed.insert(button);
                            self.track_press(button, position, time);
                        }
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(&button) {
                            self.frame.buttons_released.insert(button);
                        }
                    }
                }
            }
        }

        self.frame.push_event(ev);
    }

    fn move_to(&mut self, position: Vector2) {
        if let Some(prev) = self.position {
            self.frame.delta += position - prev;
        }
        self.position = Some(position);
    }

    fn track_press(&mut self, button: PointerButton, position: Vector2, time: Instant) {
        let is_double = self.last_press.is_some_and(|last| {
            last.button == button
                && time.saturating_duration_since(last.time) <= self.config.double_click_time
                && last.position.distance(position) <= self.config.double_click_distance
        });

        if is_double {
            self.frame.double_clicked.insert(button);
            // The next press starts a new sequence.
            self.last_press = None;
        } else {
            self.last_press = Some(LastPress { button, position, time });
        }
    }

    /// Clears per-frame edges and the accumulated delta.
    pub fn end_frame(&mut self) {
        self.frame.clear();
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Option<Vector2> {
        self.position
    }

    /// Movement since the last [`Pointer::end_frame`], in surface pixels.
    #[inline]
    pub fn delta(&self) -> Vector2 {
        self.frame.delta
    }

    #[inline]
    pub fn frame(&self) -> &PointerFrame {
        &self.frame
    }

    /// Button is currently held.
    pub fn button_pressed(&self, button: PointerButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn button_just_pressed(&self, button: PointerButton) -> bool {
        self.frame.buttons_pressed.contains(&button)
    }

    pub fn button_just_released(&self, button: PointerButton) -> bool {
        self.frame.buttons_released.contains(&button)
    }

    pub fn button_double_clicked(&self, button: PointerButton) -> bool {
        self.frame.double_clicked.contains(&button)
    }
}
