use std::rc::Rc;

use uuid::Uuid;

use crate::coords::{Matrix, Vector2};
use crate::dispatch::PointerInfo;
use crate::mask::{Mask, MaskBinding};

use super::callbacks::{Callbacks, LifecycleHook, PointerHook};
use super::shapes::Shape;
use super::NodeId;

/// A scene-graph node.
///
/// Nodes live inside a [`super::Scene`] arena. Tree links (`parent`,
/// `children`, `level`) are maintained by the scene; everything else is
/// owned by the node.
///
/// Transform parameters are private: every setter re-arms
/// `matrix_needs_update`, and [`super::Scene::update_transforms`] clears it
/// after recomputing. A node without a [`Shape`] is a plain group.
///
/// ```rust,ignore
/// let id = scene.add(scene.root(), Object2D::new()
///     .with_shape(BoxShape::centered(40.0, 20.0))
///     .with_position(Vector2::new(100.0, 50.0))
///     .draggable(true)
///     .on_pointer_enter(|node, _| node.layer = 1))?;
/// ```
pub struct Object2D {
    uuid: Uuid,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) level: u32,

    /// Secondary paint-order key. Lower layers paint first.
    pub layer: i32,

    position: Vector2,
    origin: Vector2,
    scale: Vector2,
    rotation: f64,

    matrix: Matrix,
    global_matrix: Matrix,
    inverse_global_matrix: Matrix,
    matrix_needs_update: bool,

    pub masks: Vec<MaskBinding>,
    pub shape: Option<Box<dyn Shape>>,

    pub visible: bool,
    /// When `false` the node is never a hit target; its children still can be.
    pub pointer_events: bool,
    pub draggable: bool,
    /// Screen-fixed node: the camera transform is not applied to it.
    pub ignore_viewport: bool,
    /// Passed through to the renderer: `save()` before drawing.
    pub save_context_state: bool,
    /// Passed through to the renderer: `restore()` after drawing.
    pub restore_context_state: bool,

    pub(crate) pointer_inside: bool,
    pub(crate) being_dragged: bool,

    pub callbacks: Callbacks,
}

impl Object2D {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            parent: None,
            children: Vec::new(),
            level: 0,
            layer: 0,
            position: Vector2::zero(),
            origin: Vector2::zero(),
            scale: Vector2::one(),
            rotation: 0.0,
            matrix: Matrix::identity(),
            global_matrix: Matrix::identity(),
            inverse_global_matrix: Matrix::identity(),
            matrix_needs_update: true,
            masks: Vec::new(),
            shape: None,
            visible: true,
            pointer_events: true,
            draggable: false,
            ignore_viewport: false,
            save_context_state: true,
            restore_context_state: true,
            pointer_inside: false,
            being_dragged: false,
            callbacks: Callbacks::default(),
        }
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn with_shape(mut self, shape: impl Shape + 'static) -> Self {
        self.shape = Some(Box::new(shape));
        self
    }
    pub fn with_position(mut self, v: Vector2) -> Self { self.set_position(v); self }
    pub fn with_origin(mut self, v: Vector2) -> Self { self.set_origin(v); self }
    pub fn with_scale(mut self, v: Vector2) -> Self { self.set_scale(v); self }
    pub fn with_rotation(mut self, v: f64) -> Self { self.set_rotation(v); self }
    pub fn with_layer(mut self, v: i32) -> Self { self.layer = v; self }
    pub fn with_mask(mut self, mask: Rc<dyn Mask>) -> Self {
        self.masks.push(MaskBinding::owner(mask));
        self
    }
    pub fn visible(mut self, v: bool) -> Self { self.visible = v; self }
    pub fn pointer_events(mut self, v: bool) -> Self { self.pointer_events = v; self }
    pub fn draggable(mut self, v: bool) -> Self { self.draggable = v; self }
    pub fn ignore_viewport(mut self, v: bool) -> Self { self.ignore_viewport = v; self }

    pub fn on_add(mut self, f: impl FnMut(&mut Object2D, NodeId) + 'static) -> Self {
        self.callbacks.on_add = Some(Box::new(f));
        self
    }
    pub fn on_remove(mut self, f: impl FnMut(&mut Object2D, NodeId) + 'static) -> Self {
        self.callbacks.on_remove = Some(Box::new(f));
        self
    }
    pub fn on_update(mut self, f: impl FnMut(&mut Object2D) + 'static) -> Self {
        self.callbacks.on_update = Some(Box::new(f));
        self
    }
    pub fn on_pointer_enter(mut self, f: impl FnMut(&mut Object2D, &PointerInfo) + 'static) -> Self {
        self.callbacks.on_pointer_enter = Some(Box::new(f));
        self
    }
    pub fn on_pointer_leave(mut self, f: impl FnMut(&mut Object2D, &PointerInfo) + 'static) -> Self {
        self.callbacks.on_pointer_leave = Some(Box::new(f));
        self
    }
    pub fn on_pointer_over(mut self, f: impl FnMut(&mut Object2D, &PointerInfo) + 'static) -> Self {
        self.callbacks.on_pointer_over = Some(Box::new(f));
        self
    }
    pub fn on_button_pressed(mut self, f: impl FnMut(&mut Object2D, &PointerInfo) + 'static) -> Self {
        self.callbacks.on_button_pressed = Some(Box::new(f));
        self
    }
    pub fn on_button_down(mut self, f: impl FnMut(&mut Object2D, &PointerInfo) + 'static) -> Self {
        self.callbacks.on_button_down = Some(Box::new(f));
        self
    }
    pub fn on_button_up(mut self, f: impl FnMut(&mut Object2D, &PointerInfo) + 'static) -> Self {
        self.callbacks.on_button_up = Some(Box::new(f));
        self
    }
    pub fn on_double_click(mut self, f: impl FnMut(&mut Object2D, &PointerInfo) + 'static) -> Self {
        self.callbacks.on_double_click = Some(Box::new(f));
        self
    }
    pub fn on_pointer_drag(
        mut self,
        f: impl FnMut(&mut Object2D, &PointerInfo, Vector2) + 'static,
    ) -> Self {
        self.callbacks.on_pointer_drag = Some(Box::new(f));
        self
    }

    // ── identity & tree links ─────────────────────────────────────────────

    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Used by persistence to keep identities stable across a round trip.
    pub(crate) fn set_uuid(&mut self, uuid: Uuid) {
        self.uuid = uuid;
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    // ── transform parameters ──────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    #[inline]
    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_position(&mut self, v: Vector2) {
        self.position = v;
        self.matrix_needs_update = true;
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.position += delta;
        self.matrix_needs_update = true;
    }

    pub fn set_origin(&mut self, v: Vector2) {
        self.origin = v;
        self.matrix_needs_update = true;
    }

    pub fn set_scale(&mut self, v: Vector2) {
        self.scale = v;
        self.matrix_needs_update = true;
    }

    pub fn set_rotation(&mut self, v: f64) {
        self.rotation = v;
        self.matrix_needs_update = true;
    }

    #[inline]
    pub fn matrix_needs_update(&self) -> bool {
        self.matrix_needs_update
    }

    /// Forces a recompute on the next transform refresh.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.matrix_needs_update = true;
    }

    // ── cached transforms ─────────────────────────────────────────────────

    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[inline]
    pub fn global_matrix(&self) -> &Matrix {
        &self.global_matrix
    }

    #[inline]
    pub fn inverse_global_matrix(&self) -> &Matrix {
        &self.inverse_global_matrix
    }

    /// Recomposes the local matrix and derives the global and inverse-global
    /// matrices from `parent_global`, then clears the dirty flag.
    pub fn update_matrix(&mut self, parent_global: Option<&Matrix>) {
        self.matrix = Matrix::compose(self.position, self.scale, self.origin, self.rotation);
        self.global_matrix = match parent_global {
            Some(parent) => self.matrix.premultiply(parent),
            None => self.matrix,
        };
        self.inverse_global_matrix = self.global_matrix.invert();
        self.matrix_needs_update = false;
    }

    /// Maps a scene-space point into this node's local frame.
    #[inline]
    pub fn to_local(&self, scene_point: Vector2) -> Vector2 {
        self.inverse_global_matrix.transform_point(scene_point)
    }

    // ── interaction state ─────────────────────────────────────────────────

    /// Local-space containment. A bare group contains nothing.
    pub fn is_inside(&self, point: Vector2) -> bool {
        self.shape.as_ref().is_some_and(|shape| shape.is_inside(point))
    }

    #[inline]
    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    #[inline]
    pub fn being_dragged(&self) -> bool {
        self.being_dragged
    }

    // ── callback dispatch ─────────────────────────────────────────────────
    //
    // Callbacks receive `&mut Object2D`, so the slot is taken out for the
    // duration of the call and put back unless the callback installed a
    // replacement.

    pub(crate) fn fire_lifecycle(&mut self, hook: LifecycleHook, parent: NodeId) {
        let Some(mut f) = self.callbacks.lifecycle_slot(hook).take() else { return };
        f(self, parent);
        restore(self.callbacks.lifecycle_slot(hook), f);
    }

    pub(crate) fn fire_update(&mut self) {
        let Some(mut f) = self.callbacks.on_update.take() else { return };
        f(self);
        restore(&mut self.callbacks.on_update, f);
    }

    /// Returns `true` when a callback was set.
    pub(crate) fn fire_pointer(&mut self, hook: PointerHook, info: &PointerInfo) -> bool {
        let Some(mut f) = self.callbacks.pointer_slot(hook).take() else { return false };
        f(self, info);
        restore(self.callbacks.pointer_slot(hook), f);
        true
    }

    pub(crate) fn fire_drag(&mut self, info: &PointerInfo, delta: Vector2) {
        match self.callbacks.on_pointer_drag.take() {
            Some(mut f) => {
                f(self, info, delta);
                restore(&mut self.callbacks.on_pointer_drag, f);
            }
            None => self.translate(delta),
        }
    }
}

fn restore<T>(slot: &mut Option<T>, f: T) {
    if slot.is_none() {
        *slot = Some(f);
    }
}

impl Default for Object2D {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Object2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object2D")
            .field("uuid", &self.uuid)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("level", &self.level)
            .field("layer", &self.layer)
            .field("position", &self.position)
            .field("origin", &self.origin)
            .field("scale", &self.scale)
            .field("rotation", &self.rotation)
            .field("shape", &self.shape)
            .field("masks", &self.masks.len())
            .field("visible", &self.visible)
            .field("pointer_events", &self.pointer_events)
            .field("draggable", &self.draggable)
            .finish_non_exhaustive()
    }
}
