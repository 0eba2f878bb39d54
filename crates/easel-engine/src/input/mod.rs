//! Pointer input.
//!
//! Public API is platform-agnostic and does not expose windowing types.
//! A platform layer is responsible for translating its events into `PointerEvent`s.

mod frame;
mod pointer;
mod types;

pub use frame::PointerFrame;
pub use pointer::{Pointer, PointerConfig};
pub use types::{ButtonState, PointerButton, PointerEvent};
