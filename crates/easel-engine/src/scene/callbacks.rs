use crate::coords::Vector2;
use crate::dispatch::PointerInfo;

use super::{NodeId, Object2D};

/// Lifecycle hook receiving the parent the node was attached to or detached from.
pub type LifecycleFn = Box<dyn FnMut(&mut Object2D, NodeId)>;
/// Per-frame hook run before transforms are refreshed.
pub type UpdateFn = Box<dyn FnMut(&mut Object2D)>;
/// Pointer hook receiving the pointer position in screen, scene and local space.
pub type PointerFn = Box<dyn FnMut(&mut Object2D, &PointerInfo)>;
/// Drag hook receiving the pointer delta expressed in the node's parent space.
pub type DragFn = Box<dyn FnMut(&mut Object2D, &PointerInfo, Vector2)>;

/// Lifecycle hooks fired by [`super::Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleHook {
    Add,
    Remove,
}

/// Pointer hooks fired by [`crate::dispatch::PointerDispatcher`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerHook {
    Enter,
    Leave,
    Over,
    ButtonPressed,
    ButtonDown,
    ButtonUp,
    DoubleClick,
}

/// Optional callback slots of a node. An empty slot is simply skipped.
#[derive(Default)]
pub struct Callbacks {
    pub on_add: Option<LifecycleFn>,
    pub on_remove: Option<LifecycleFn>,
    pub on_update: Option<UpdateFn>,
    pub on_pointer_enter: Option<PointerFn>,
    pub on_pointer_leave: Option<PointerFn>,
    pub on_pointer_over: Option<PointerFn>,
    pub on_button_pressed: Option<PointerFn>,
    pub on_button_down: Option<PointerFn>,
    pub on_button_up: Option<PointerFn>,
    pub on_double_click: Option<PointerFn>,
    /// When empty, dragging translates the node by the delta.
    pub on_pointer_drag: Option<DragFn>,
}

impl Callbacks {
    pub(crate) fn lifecycle_slot(&mut self, hook: LifecycleHook) -> &mut Option<LifecycleFn> {
        match hook {
            LifecycleHook::Add => &mut self.on_add,
            LifecycleHook::Remove => &mut self.on_remove,
        }
    }

    pub(crate) fn pointer_slot(&mut self, hook: PointerHook) -> &mut Option<PointerFn> {
        match hook {
            PointerHook::Enter => &mut self.on_pointer_enter,
            PointerHook::Leave => &mut self.on_pointer_leave,
            PointerHook::Over => &mut self.on_pointer_over,
            PointerHook::ButtonPressed => &mut self.on_button_pressed,
            PointerHook::ButtonDown => &mut self.on_button_down,
            PointerHook::ButtonUp => &mut self.on_button_up,
            PointerHook::DoubleClick => &mut self.on_double_click,
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = |slot: bool| if slot { "set" } else { "-" };
        f.debug_struct("Callbacks")
            .field("on_add", &set(self.on_add.is_some()))
            .field("on_remove", &set(self.on_remove.is_some()))
            .field("on_update", &set(self.on_update.is_some()))
            .field("on_pointer_enter", &set(self.on_pointer_enter.is_some()))
            .field("on_pointer_leave", &set(self.on_pointer_leave.is_some()))
            .field("on_pointer_over", &set(self.on_pointer_over.is_some()))
            .field("on_button_pressed", &set(self.on_button_pressed.is_some()))
            .field("on_button_down", &set(self.on_button_down.is_some()))
            .field("on_button_up", &set(self.on_button_up.is_some()))
            .field("on_double_click", &set(self.on_double_click.is_some()))
            .field("on_pointer_drag", &set(self.on_pointer_drag.is_some()))
            .finish()
    }
}
