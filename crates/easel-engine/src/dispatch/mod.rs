//! Pointer dispatch.
//!
//! Once per frame the dispatcher picks a single hit target from the
//! attached tree and translates pointer state into node callbacks: hover
//! enter/leave/over, button down/pressed/up, double click and drag.

mod dispatcher;

use crate::coords::Vector2;
use crate::input::PointerButton;
use crate::scene::NodeId;

pub use dispatcher::PointerDispatcher;

/// Pointer position handed to node callbacks.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerInfo {
    /// Surface pixels.
    pub screen: Vector2,
    /// Scene space (the camera is skipped for `ignore_viewport` nodes).
    pub scene: Vector2,
    /// The receiving node's local frame.
    pub local: Vector2,
    /// Raw pointer movement this frame, in surface pixels.
    pub delta: Vector2,
}

/// Dispatcher policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Button driving down/pressed/up, double click and drag.
    pub primary_button: PointerButton,
    /// Ancestor masks restrict hit-testing of descendants.
    pub inherit_masks: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { primary_button: PointerButton::Left, inherit_masks: true }
    }
}

/// What a dispatch pass did. Used for logging and tests.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// The node the pointer interacted with this frame.
    pub target: Option<NodeId>,
    /// Node that became the hit target this frame.
    pub entered: Option<NodeId>,
    /// Node that stopped being the hit target this frame.
    pub left: Option<NodeId>,
    /// Dragged node and the delta it received, in its parent's space.
    pub drag: Option<(NodeId, Vector2)>,
}
