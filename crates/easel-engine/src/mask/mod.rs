//! Masks: point predicates restricting where a node is visible and hit-testable.
//!
//! A mask is an independent capability, not a kind of node. Nodes hold
//! [`MaskBinding`]s which pair a shared mask with the coordinate frame it is
//! evaluated in. All masks on a node must accept a point for the node to be
//! considered there.

mod box_mask;

use std::fmt;
use std::rc::Rc;

use crate::coords::{Box2, Vector2};
use crate::error::SceneError;
use crate::scene::{NodeId, Scene};

pub use box_mask::BoxMask;

/// Point-containment predicate evaluated in the mask's own frame.
pub trait Mask: fmt::Debug {
    /// Returns `true` when `point` passes the mask.
    fn is_inside(&self, point: Vector2) -> bool;

    /// Registry key used by [`crate::persist`].
    fn type_name(&self) -> &'static str;

    /// Mask parameters for persistence.
    fn to_value(&self) -> Result<serde_json::Value, SceneError>;

    /// Axis-aligned region kept visible, when the mask can express one.
    ///
    /// Renderers use this to clip drawing; `None` means the mask only
    /// affects hit-testing.
    fn clip_bounds(&self) -> Option<Box2> {
        None
    }
}

/// Which coordinate frame a mask is evaluated in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaskFrame {
    /// The local frame of the node the mask is attached to.
    Owner,
    /// The local frame of another node in the same scene.
    Node(NodeId),
}

/// A mask attached to a node.
#[derive(Debug, Clone)]
pub struct MaskBinding {
    pub mask: Rc<dyn Mask>,
    pub frame: MaskFrame,
}

impl MaskBinding {
    #[inline]
    pub fn owner(mask: Rc<dyn Mask>) -> Self {
        Self { mask, frame: MaskFrame::Owner }
    }

    #[inline]
    pub fn in_frame(mask: Rc<dyn Mask>, frame: NodeId) -> Self {
        Self { mask, frame: MaskFrame::Node(frame) }
    }
}

/// Returns `true` when every mask bound to `id` accepts `scene_point`.
///
/// Each binding is evaluated in its own frame. With `inherit` set the masks
/// of all ancestors must accept the point too. Bindings whose frame node no
/// longer exists are skipped.
pub fn accepts(scene: &Scene, id: NodeId, scene_point: Vector2, inherit: bool) -> bool {
    let mut current = Some(id);
    while let Some(owner_id) = current {
        let Some(owner) = scene.get(owner_id) else { return true };
        for binding in &owner.masks {
            let frame = match binding.frame {
                MaskFrame::Owner => Some(owner),
                MaskFrame::Node(node) => scene.get(node),
            };
            let Some(frame) = frame else { continue };
            if !binding.mask.is_inside(frame.to_local(scene_point)) {
                return false;
            }
        }
        if !inherit {
            break;
        }
        current = owner.parent();
    }
    true
}
