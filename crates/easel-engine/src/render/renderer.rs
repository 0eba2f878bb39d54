use crate::coords::Matrix;
use crate::mask::MaskFrame;
use crate::scene::{Object2D, PaintOrder, Scene};
use crate::viewport::Viewport;

use super::Surface;

/// Paints a scene onto a [`Surface`].
///
/// Owns the paint-order buffer so repeated frames do not reallocate.
/// With `inherit_masks` set (the default) a node is clipped by its
/// ancestors' masks as well as its own, matching hit-testing.
#[derive(Debug)]
pub struct Renderer {
    order: PaintOrder,
    pub inherit_masks: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { order: PaintOrder::default(), inherit_masks: true }
    }
}

impl Renderer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_inherited_masks(inherit_masks: bool) -> Self {
        Self { inherit_masks, ..Self::default() }
    }

    /// Clears `surface` and paints every visible attached node back-to-front.
    ///
    /// Scene and camera transforms are refreshed first. Returns the number
    /// of shapes drawn. An invisible node is skipped on its own; its
    /// children are still painted.
    pub fn render(
        &mut self,
        scene: &mut Scene,
        viewport: &mut Viewport,
        surface: &mut dyn Surface,
    ) -> usize {
        viewport.update_matrix();
        scene.update_transforms();
        self.order.rebuild(scene);

        surface.clear();

        let camera = *viewport.matrix();
        let mut painted = 0;
        for id in self.order.back_to_front() {
            let node = &scene[id];
            if !node.visible {
                continue;
            }
            paint_node(scene, node, &camera, self.inherit_masks, surface);
            if node.shape.is_some() {
                painted += 1;
            }
        }
        painted
    }
}

fn paint_node(
    scene: &Scene,
    node: &Object2D,
    camera: &Matrix,
    inherit_masks: bool,
    surface: &mut dyn Surface,
) {
    if node.save_context_state {
        surface.save();
    }

    let transform = |n: &Object2D| {
        if n.ignore_viewport { *n.global_matrix() } else { camera.multiply(n.global_matrix()) }
    };

    let own = transform(node);
    let mut clipped = false;
    let mut owner = Some(node);
    while let Some(current) = owner {
        for binding in &current.masks {
            let Some(bounds) = binding.mask.clip_bounds() else { continue };
            let frame = match binding.frame {
                MaskFrame::Owner => Some(current),
                MaskFrame::Node(other) => scene.get(other),
            };
            let Some(frame) = frame else { continue };
            surface.set_transform(&transform(frame));
            surface.begin_path();
            surface.rect(bounds);
            surface.clip();
            clipped = true;
        }
        if !inherit_masks {
            break;
        }
        owner = current.parent().and_then(|p| scene.get(p));
    }

    if clipped || node.shape.is_some() {
        surface.set_transform(&own);
    }
    if let Some(shape) = &node.shape {
        shape.draw(surface);
    }

    if node.restore_context_state {
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::coords::{Box2, Size, Vector2};
    use crate::mask::BoxMask;
    use crate::scene::shapes::{BoxShape, CircleShape};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Save,
        Restore,
        Transform(Matrix),
        BeginPath,
        Rect(Box2),
        Arc(f64),
        Fill,
        Stroke,
        Clip,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Surface for Recorder {
        fn size(&self) -> Size {
            Size::new(800.0, 600.0)
        }
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn save(&mut self) {
            self.calls.push(Call::Save);
        }
        fn restore(&mut self) {
            self.calls.push(Call::Restore);
        }
        fn set_transform(&mut self, matrix: &Matrix) {
            self.calls.push(Call::Transform(*matrix));
        }
        fn begin_path(&mut self) {
            self.calls.push(Call::BeginPath);
        }
        fn rect(&mut self, rect: Box2) {
            self.calls.push(Call::Rect(rect));
        }
        fn arc(&mut self, _center: Vector2, radius: f64, _start: f64, _end: f64) {
            self.calls.push(Call::Arc(radius));
        }
        fn fill(&mut self) {
            self.calls.push(Call::Fill);
        }
        fn stroke(&mut self) {
            self.calls.push(Call::Stroke);
        }
        fn clip(&mut self) {
            self.calls.push(Call::Clip);
        }
    }

    #[test]
    fn paints_visible_nodes_in_order() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, Object2D::new().with_shape(CircleShape::new(3.0))).unwrap();
        scene.add(root, Object2D::new().visible(false)).unwrap();
        scene.add(a, Object2D::new().with_shape(CircleShape::new(1.0))).unwrap();

        let mut viewport = Viewport::new();
        let mut surface = Recorder::default();
        let painted = Renderer::new().render(&mut scene, &mut viewport, &mut surface);

        assert_eq!(painted, 2);
        let arcs: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Arc(r) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![3.0, 1.0]);
        assert_eq!(surface.calls.first(), Some(&Call::Clear));
    }

    #[test]
    fn camera_applies_unless_ignored() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene
            .add(root, Object2D::new().with_shape(BoxShape::centered(2.0, 2.0)))
            .unwrap();
        scene
            .add(
                root,
                Object2D::new()
                    .with_shape(BoxShape::centered(2.0, 2.0))
                    .with_layer(1)
                    .ignore_viewport(true),
            )
            .unwrap();

        let mut viewport = Viewport::new();
        viewport.set_position(Vector2::new(10.0, 20.0));
        let mut surface = Recorder::default();
        Renderer::new().render(&mut scene, &mut viewport, &mut surface);

        let transforms: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Transform(m) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(
            transforms,
            vec![Matrix::translation(Vector2::new(10.0, 20.0)), Matrix::identity()]
        );
    }

    #[test]
    fn owner_mask_clips_before_drawing() {
        let mut scene = Scene::new();
        let bounds = Box2::new(Vector2::zero(), Vector2::new(4.0, 4.0));
        scene
            .add(
                scene.root(),
                Object2D::new()
                    .with_shape(BoxShape::centered(10.0, 10.0))
                    .with_mask(Rc::new(BoxMask::new(bounds))),
            )
            .unwrap();

        let mut viewport = Viewport::new();
        let mut surface = Recorder::default();
        Renderer::new().render(&mut scene, &mut viewport, &mut surface);

        let clip_at = surface.calls.iter().position(|c| *c == Call::Clip).unwrap();
        let fill_at = surface.calls.iter().position(|c| *c == Call::Fill).unwrap();
        assert!(clip_at < fill_at);
        assert_eq!(surface.calls[clip_at - 1], Call::Rect(bounds));
    }

    fn child_clips(inherit_masks: bool) -> Vec<Call> {
        let mut scene = Scene::new();
        let window = Box2::new(Vector2::zero(), Vector2::new(10.0, 10.0));
        let parent = scene
            .add(scene.root(), Object2D::new().with_mask(Rc::new(BoxMask::new(window))))
            .unwrap();
        scene
            .add(
                parent,
                Object2D::new().with_shape(BoxShape::new(Box2::new(
                    Vector2::new(50.0, 50.0),
                    Vector2::new(60.0, 60.0),
                ))),
            )
            .unwrap();

        let mut viewport = Viewport::new();
        let mut surface = Recorder::default();
        Renderer::with_inherited_masks(inherit_masks).render(&mut scene, &mut viewport, &mut surface);

        // The child paints last; its calls start at the final save.
        let child_start = surface.calls.iter().rposition(|c| *c == Call::Save).unwrap();
        surface.calls[child_start..].to_vec()
    }

    #[test]
    fn ancestor_mask_clips_descendants() {
        let calls = child_clips(true);
        let clip_at = calls.iter().position(|c| *c == Call::Clip).unwrap();
        let fill_at = calls.iter().position(|c| *c == Call::Fill).unwrap();
        assert!(clip_at < fill_at);
        assert_eq!(calls[clip_at - 1], Call::Rect(Box2::new(Vector2::zero(), Vector2::new(10.0, 10.0))));
    }

    #[test]
    fn ancestor_mask_ignored_without_inheritance() {
        let calls = child_clips(false);
        assert!(calls.contains(&Call::Fill));
        assert!(!calls.contains(&Call::Clip));
    }

    #[test]
    fn context_flags_are_honoured() {
        let mut scene = Scene::new();
        let mut node = Object2D::new();
        node.save_context_state = false;
        node.restore_context_state = false;
        let root = scene.root();
        scene.add(root, node).unwrap();
        scene[root].save_context_state = false;
        scene[root].restore_context_state = false;

        let mut viewport = Viewport::new();
        let mut surface = Recorder::default();
        Renderer::new().render(&mut scene, &mut viewport, &mut surface);
        assert!(!surface.calls.iter().any(|c| matches!(c, Call::Save | Call::Restore)));
    }
}
