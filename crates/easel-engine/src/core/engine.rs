use crate::dispatch::{DispatchConfig, DispatchReport, PointerDispatcher};
use crate::input::{Pointer, PointerConfig, PointerEvent};
use crate::render::{Renderer, Surface};
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Engine configuration.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub pointer: PointerConfig,
    pub dispatch: DispatchConfig,
}

/// One scene, one camera, one pointer.
///
/// Fields are public: hosts build and mutate the scene directly between
/// frames.
#[derive(Debug, Default)]
pub struct Engine {
    pub scene: Scene,
    pub viewport: Viewport,
    pub pointer: Pointer,
    pub dispatcher: PointerDispatcher,
    pub renderer: Renderer,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: Scene::new(),
            viewport: Viewport::new(),
            pointer: Pointer::new(config.pointer),
            dispatcher: PointerDispatcher::new(config.dispatch),
            renderer: Renderer::with_inherited_masks(config.dispatch.inherit_masks),
        }
    }

    /// Queues a pointer event for the next frame.
    #[inline]
    pub fn apply_event(&mut self, ev: PointerEvent) {
        self.pointer.apply_event(ev);
    }

    /// Runs one frame:
    /// 1) `on_update` for every attached node
    /// 2) camera and scene transform refresh
    /// 3) pointer dispatch
    /// 4) render (refreshes again so drag moves show this frame)
    /// 5) pointer frame reset
    pub fn frame(&mut self, surface: &mut dyn Surface) -> DispatchReport {
        self.update();

        let report = self.dispatcher.dispatch(&mut self.scene, &self.viewport, &self.pointer);
        let painted = self.renderer.render(&mut self.scene, &mut self.viewport, surface);
        log::trace!("frame: target {:?}, painted {painted}", report.target);

        self.pointer.end_frame();
        report
    }

    /// Stages 1 and 2 of [`Engine::frame`], for hosts that do not render.
    pub fn update(&mut self) {
        let root = self.scene.root();
        self.scene.traverse_mut(root, |_, node| node.fire_update());
        self.viewport.update_matrix();
        self.scene.update_transforms();
    }
}
