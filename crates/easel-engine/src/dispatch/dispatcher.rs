use crate::coords::Vector2;
use crate::input::Pointer;
use crate::mask;
use crate::scene::{NodeId, PaintOrder, PointerHook, Scene};
use crate::viewport::Viewport;

use super::{DispatchConfig, DispatchReport, PointerInfo};

/// Routes pointer state to scene nodes, one frame at a time.
///
/// Holds the cross-frame interaction state: which node is hovered, which
/// one is being dragged and which one took the last press. Transforms (scene and camera) must be refreshed
/// before [`PointerDispatcher::dispatch`] runs.
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    config: DispatchConfig,
    order: PaintOrder,
    hovered: Option<NodeId>,
    dragging: Option<NodeId>,
    last_press: Option<NodeId>,
}

impl PointerDispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[inline]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    #[inline]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    #[inline]
    pub fn dragging(&self) -> Option<NodeId> {
        self.dragging
    }

    /// Runs one dispatch pass.
    pub fn dispatch(
        &mut self,
        scene: &mut Scene,
        viewport: &Viewport,
        pointer: &Pointer,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        let button = self.config.primary_button;

        self.order.rebuild(scene);
        self.drop_stale(scene);

        let screen = pointer.position();
        let target = match (screen, self.dragging) {
            (None, _) => None,
            (Some(_), Some(dragged)) => Some(dragged),
            (Some(p), None) => self.hit_test(scene, viewport, p),
        };
        report.target = target;

        let screen = screen.unwrap_or_default();
        let delta = pointer.delta();

        // ── hover ─────────────────────────────────────────────────────────

        if target != self.hovered {
            if let Some(old) = self.hovered.take() {
                let info = pointer_info(scene, viewport, old, screen, delta);
                if let Some(node) = scene.get_mut(old) {
                    node.pointer_inside = false;
                    node.fire_pointer(PointerHook::Leave, &info);
                }
                log::trace!("pointer leave {old}");
                report.left = Some(old);
            }
            if let Some(new) = target {
                let info = pointer_info(scene, viewport, new, screen, delta);
                let node = &mut scene[new];
                node.pointer_inside = true;
                node.fire_pointer(PointerHook::Enter, &info);
                log::trace!("pointer enter {new}");
                report.entered = Some(new);
            }
            self.hovered = target;
        }

        let Some(target) = target else {
            if pointer.button_just_pressed(button) {
                self.last_press = None;
            }
            self.release_drag(scene, pointer);
            return report;
        };

        let info = pointer_info(scene, viewport, target, screen, delta);
        scene[target].fire_pointer(PointerHook::Over, &info);

        // ── buttons ───────────────────────────────────────────────────────

        let just_pressed = pointer.button_just_pressed(button);
        if just_pressed {
            // Both presses of a double click must land on the same node.
            let double = pointer.button_double_clicked(button) && self.last_press == Some(target);
            self.last_press = Some(target);
            let node = &mut scene[target];
            if double {
                node.fire_pointer(PointerHook::DoubleClick, &info);
            } else {
                node.fire_pointer(PointerHook::ButtonDown, &info);
                node.fire_pointer(PointerHook::ButtonPressed, &info);
            }
            if node.draggable && self.dragging.is_none() {
                node.being_dragged = true;
                self.dragging = Some(target);
                log::debug!("drag start {target}");
            }
        } else if pointer.button_pressed(button) {
            scene[target].fire_pointer(PointerHook::ButtonPressed, &info);
        }

        if pointer.button_just_released(button) {
            scene[target].fire_pointer(PointerHook::ButtonUp, &info);
        }

        // ── drag ──────────────────────────────────────────────────────────

        if let Some(dragged) = self.dragging {
            if !just_pressed && pointer.button_pressed(button) && delta != Vector2::zero() {
                let moved = drag_delta(scene, viewport, dragged, delta);
                let info = pointer_info(scene, viewport, dragged, screen, delta);
                scene[dragged].fire_drag(&info, moved);
                report.drag = Some((dragged, moved));
            }
        }
        self.release_drag(scene, pointer);

        report
    }

    /// Frontmost node that is interactive, visible, inside its shape and
    /// accepted by its masks.
    fn hit_test(&self, scene: &Scene, viewport: &Viewport, screen: Vector2) -> Option<NodeId> {
        self.order.front_to_back().find(|&id| {
            let node = &scene[id];
            if !node.pointer_events || !node.visible {
                return false;
            }
            let point = scene_point(viewport, node.ignore_viewport, screen);
            node.is_inside(node.to_local(point))
                && mask::accepts(scene, id, point, self.config.inherit_masks)
        })
    }

    /// Ends the drag once the primary button is no longer held.
    fn release_drag(&mut self, scene: &mut Scene, pointer: &Pointer) {
        if pointer.button_pressed(self.config.primary_button) {
            return;
        }
        if let Some(dragged) = self.dragging.take() {
            if let Some(node) = scene.get_mut(dragged) {
                node.being_dragged = false;
            }
            log::debug!("drag stop {dragged}");
        }
    }

    /// Forgets nodes that were removed or detached since the last pass.
    fn drop_stale(&mut self, scene: &mut Scene) {
        if let Some(dragged) = self.dragging {
            if !scene.is_attached(dragged) {
                log::warn!("drag target {dragged} left the scene, dropping drag");
                if let Some(node) = scene.get_mut(dragged) {
                    node.being_dragged = false;
                }
                self.dragging = None;
            }
        }
        if let Some(hovered) = self.hovered {
            if !scene.is_attached(hovered) {
                if let Some(node) = scene.get_mut(hovered) {
                    node.pointer_inside = false;
                }
                self.hovered = None;
            }
        }
        if self.last_press.is_some_and(|id| !scene.is_attached(id)) {
            self.last_press = None;
        }
    }
}

#[inline]
fn scene_point(viewport: &Viewport, ignore_viewport: bool, screen: Vector2) -> Vector2 {
    if ignore_viewport { screen } else { viewport.screen_to_scene(screen) }
}

fn pointer_info(
    scene: &Scene,
    viewport: &Viewport,
    id: NodeId,
    screen: Vector2,
    delta: Vector2,
) -> PointerInfo {
    let Some(node) = scene.get(id) else {
        return PointerInfo { screen, delta, ..PointerInfo::default() };
    };
    let scene_pos = scene_point(viewport, node.ignore_viewport, screen);
    PointerInfo { screen, scene: scene_pos, local: node.to_local(scene_pos), delta }
}

/// Maps a raw pointer delta into the space the node's `position` lives in.
fn drag_delta(scene: &Scene, viewport: &Viewport, id: NodeId, raw: Vector2) -> Vector2 {
    let node = &scene[id];
    let mut delta = raw;
    if !node.ignore_viewport {
        delta = viewport.inverse_matrix().transform_vector(delta);
    }
    if let Some(parent) = node.parent().and_then(|p| scene.get(p)) {
        delta = parent.inverse_global_matrix().transform_vector(delta);
    }
    delta
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::coords::Box2;
    use crate::input::{PointerButton, PointerEvent};
    use crate::mask::BoxMask;
    use crate::scene::Object2D;
    use crate::scene::shapes::BoxShape;

    const LEFT: PointerButton = PointerButton::Left;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorded(log: &Log, name: &'static str) -> Object2D {
        let hook = |log: &Log, what: &'static str| {
            let log = log.clone();
            move |_: &mut Object2D, _: &PointerInfo| log.borrow_mut().push(format!("{name} {what}"))
        };
        Object2D::new()
            .with_shape(BoxShape::new(Box2::new(Vector2::zero(), Vector2::new(10.0, 10.0))))
            .on_pointer_enter(hook(log, "enter"))
            .on_pointer_leave(hook(log, "leave"))
            .on_pointer_over(hook(log, "over"))
            .on_button_down(hook(log, "down"))
            .on_button_pressed(hook(log, "pressed"))
            .on_button_up(hook(log, "up"))
            .on_double_click(hook(log, "double"))
    }

    /// Log entries without the per-frame `over` noise.
    fn events(log: &Log) -> Vec<String> {
        log.borrow().iter().filter(|e| !e.ends_with(" over")).cloned().collect()
    }

    struct Harness {
        scene: Scene,
        viewport: Viewport,
        pointer: Pointer,
        dispatcher: PointerDispatcher,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                scene: Scene::new(),
                viewport: Viewport::new(),
                pointer: Pointer::default(),
                dispatcher: PointerDispatcher::default(),
            }
        }

        fn frame(&mut self, events: &[PointerEvent]) -> DispatchReport {
            for ev in events {
                self.pointer.apply_event(*ev);
            }
            self.scene.update_transforms();
            self.viewport.update_matrix();
            let report = self.dispatcher.dispatch(&mut self.scene, &self.viewport, &self.pointer);
            self.pointer.end_frame();
            report
        }
    }

    #[test]
    fn deeper_node_wins_over_its_parent() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let outer = h.scene.add(h.scene.root(), recorded(&log, "outer")).unwrap();
        let inner = h.scene.add(outer, recorded(&log, "inner")).unwrap();

        let report = h.frame(&[PointerEvent::moved(5.0, 5.0)]);
        assert_eq!(report.target, Some(inner));
        assert!(h.scene[inner].pointer_inside());
        assert!(!h.scene[outer].pointer_inside());
    }

    #[test]
    fn non_interactive_node_is_skipped() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let below = h.scene.add(h.scene.root(), recorded(&log, "below")).unwrap();
        h.scene.add(h.scene.root(), recorded(&log, "above").pointer_events(false)).unwrap();

        let report = h.frame(&[PointerEvent::moved(5.0, 5.0)]);
        assert_eq!(report.target, Some(below));
    }

    #[test]
    fn enter_and_leave_fire_on_transitions_only() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let node = h.scene.add(h.scene.root(), recorded(&log, "a")).unwrap();

        let report = h.frame(&[PointerEvent::moved(5.0, 5.0)]);
        assert_eq!(report.entered, Some(node));
        h.frame(&[PointerEvent::moved(6.0, 6.0)]);
        let report = h.frame(&[PointerEvent::moved(50.0, 50.0)]);
        assert_eq!(report.left, Some(node));
        assert_eq!(events(&log), ["a enter", "a leave"]);
    }

    #[test]
    fn pointer_leaving_surface_clears_hover() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let node = h.scene.add(h.scene.root(), recorded(&log, "a")).unwrap();
        h.frame(&[PointerEvent::moved(5.0, 5.0)]);
        let report = h.frame(&[PointerEvent::Left]);
        assert_eq!(report.target, None);
        assert_eq!(report.left, Some(node));
    }

    #[test]
    fn button_sequence() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        h.scene.add(h.scene.root(), recorded(&log, "a")).unwrap();
        let t0 = Instant::now();

        h.frame(&[PointerEvent::pressed(LEFT, 5.0, 5.0, t0)]);
        h.frame(&[]);
        h.frame(&[PointerEvent::released(LEFT, 5.0, 5.0, t0)]);
        assert_eq!(events(&log), ["a enter", "a down", "a pressed", "a pressed", "a up"]);
    }

    #[test]
    fn double_click_replaces_down_and_pressed() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        h.scene.add(h.scene.root(), recorded(&log, "a")).unwrap();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(100);

        h.frame(&[
            PointerEvent::pressed(LEFT, 5.0, 5.0, t0),
            PointerEvent::released(LEFT, 5.0, 5.0, t0),
        ]);
        log.borrow_mut().clear();
        h.frame(&[
            PointerEvent::pressed(LEFT, 5.0, 5.0, t1),
            PointerEvent::released(LEFT, 5.0, 5.0, t1),
        ]);
        assert_eq!(events(&log), ["a double", "a up"]);
    }

    #[test]
    fn over_fires_every_frame_while_hovered() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        h.scene.add(h.scene.root(), recorded(&log, "a")).unwrap();

        h.frame(&[PointerEvent::moved(5.0, 5.0)]);
        h.frame(&[]);
        h.frame(&[PointerEvent::moved(6.0, 6.0)]);
        h.frame(&[PointerEvent::moved(50.0, 50.0)]);
        h.frame(&[]);
        assert_eq!(*log.borrow(), ["a enter", "a over", "a over", "a over", "a leave"]);
    }

    #[test]
    fn presses_on_neighbours_are_not_a_double_click() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        h.scene.add(h.scene.root(), recorded(&log, "a")).unwrap();
        h.scene
            .add(
                h.scene.root(),
                recorded(&log, "b")
                    .with_shape(BoxShape::new(Box2::new(
                        Vector2::new(10.5, 0.0),
                        Vector2::new(20.0, 10.0),
                    ))),
            )
            .unwrap();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(100);

        h.frame(&[
            PointerEvent::pressed(LEFT, 9.0, 5.0, t0),
            PointerEvent::released(LEFT, 9.0, 5.0, t0),
        ]);
        h.frame(&[
            PointerEvent::pressed(LEFT, 12.0, 5.0, t1),
            PointerEvent::released(LEFT, 12.0, 5.0, t1),
        ]);
        assert_eq!(
            events(&log),
            ["a enter", "a down", "a pressed", "a up", "a leave", "b enter", "b down", "b pressed", "b up"]
        );
    }

    #[test]
    fn masked_out_region_is_not_hit() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let mask = Rc::new(BoxMask::new(Box2::new(Vector2::zero(), Vector2::new(5.0, 5.0))));
        let node = h.scene.add(h.scene.root(), recorded(&log, "a").with_mask(mask)).unwrap();

        assert_eq!(h.frame(&[PointerEvent::moved(2.0, 2.0)]).target, Some(node));
        assert_eq!(h.frame(&[PointerEvent::moved(8.0, 8.0)]).target, None);
    }

    #[test]
    fn drag_follows_pointer() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let node = h.scene.add(h.scene.root(), recorded(&log, "a").draggable(true)).unwrap();
        let t0 = Instant::now();

        h.frame(&[PointerEvent::pressed(LEFT, 5.0, 5.0, t0)]);
        assert!(h.scene[node].being_dragged());

        let report = h.frame(&[PointerEvent::moved(8.0, 9.0)]);
        assert_eq!(report.drag, Some((node, Vector2::new(3.0, 4.0))));
        assert_eq!(h.scene[node].position(), Vector2::new(3.0, 4.0));

        h.frame(&[PointerEvent::released(LEFT, 8.0, 9.0, t0)]);
        assert!(!h.scene[node].being_dragged());
        assert_eq!(h.dispatcher.dragging(), None);
    }

    #[test]
    fn drag_keeps_capture_outside_the_shape() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let node = h.scene.add(h.scene.root(), recorded(&log, "a").draggable(true)).unwrap();
        let t0 = Instant::now();

        h.frame(&[PointerEvent::pressed(LEFT, 9.0, 9.0, t0)]);
        // Jump far past the node's bounds within one frame.
        let report = h.frame(&[PointerEvent::moved(60.0, 9.0)]);
        assert_eq!(report.target, Some(node));
        assert_eq!(h.scene[node].position(), Vector2::new(51.0, 0.0));
    }

    #[test]
    fn custom_drag_handler_replaces_translation() {
        let mut h = Harness::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let node = h
            .scene
            .add(
                h.scene.root(),
                Object2D::new()
                    .with_shape(BoxShape::new(Box2::new(Vector2::zero(), Vector2::new(10.0, 10.0))))
                    .draggable(true)
                    .on_pointer_drag(move |_, _, delta| sink.borrow_mut().push(delta)),
            )
            .unwrap();
        h.viewport.set_scale(2.0);
        let t0 = Instant::now();

        h.frame(&[PointerEvent::pressed(LEFT, 10.0, 10.0, t0)]);
        let report = h.frame(&[PointerEvent::moved(16.0, 18.0)]);

        assert_eq!(report.drag, Some((node, Vector2::new(3.0, 4.0))));
        assert_eq!(*seen.borrow(), [Vector2::new(3.0, 4.0)]);
        assert_eq!(h.scene[node].position(), Vector2::zero());
    }

    #[test]
    fn detaching_the_dragged_node_drops_the_drag() {
        let log: Log = Rc::default();
        let mut h = Harness::new();
        let root = h.scene.root();
        let node = h.scene.add(root, recorded(&log, "a").draggable(true)).unwrap();
        let t0 = Instant::now();

        h.frame(&[PointerEvent::pressed(LEFT, 5.0, 5.0, t0)]);
        assert!(h.scene.detach(root, node));
        let report = h.frame(&[PointerEvent::moved(7.0, 7.0)]);
        assert_eq!(report.drag, None);
        assert!(!h.scene[node].being_dragged());
        assert_eq!(h.scene[node].position(), Vector2::zero());
    }
}
