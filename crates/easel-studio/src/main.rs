//! Headless playground: builds a small scene, replays a scripted pointer
//! session through the engine and prints what happened.
//!
//! Usage: `easel-studio [scene.json]`. When a path is given the final scene
//! is written there as JSON.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use easel_engine::coords::{Box2, Matrix, Size, Vector2};
use easel_engine::input::{PointerButton, PointerEvent};
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::mask::BoxMask;
use easel_engine::persist::{to_json, TypeRegistry};
use easel_engine::render::Surface;
use easel_engine::scene::shapes::{BoxShape, CircleShape};
use easel_engine::scene::{NodeId, Object2D};
use easel_engine::{Engine, EngineConfig};

const SURFACE: Size = Size::new(800.0, 600.0);

/// Surface that only counts and logs what it is asked to draw.
#[derive(Default)]
struct TraceSurface {
    paths: usize,
    clips: usize,
}

impl Surface for TraceSurface {
    fn size(&self) -> Size {
        SURFACE
    }
    fn clear(&mut self) {
        self.paths = 0;
        self.clips = 0;
    }
    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn set_transform(&mut self, matrix: &Matrix) {
        log::trace!("set_transform {:?}", matrix.m);
    }
    fn begin_path(&mut self) {
        self.paths += 1;
    }
    fn rect(&mut self, rect: Box2) {
        log::trace!("rect {:?}..{:?}", rect.min, rect.max);
    }
    fn arc(&mut self, center: Vector2, radius: f64, _start: f64, _end: f64) {
        log::trace!("arc {center:?} r={radius}");
    }
    fn fill(&mut self) {}
    fn stroke(&mut self) {}
    fn clip(&mut self) {
        self.clips += 1;
    }
}

struct Demo {
    board: NodeId,
    card: NodeId,
    token: NodeId,
    double_clicks: Rc<Cell<u32>>,
}

fn build(engine: &mut Engine) -> Result<Demo> {
    let root = engine.scene.root();
    let double_clicks = Rc::new(Cell::new(0));

    let board = engine
        .scene
        .add(
            root,
            Object2D::new()
                .with_shape(BoxShape::new(Box2::new(Vector2::zero(), Vector2::new(400.0, 300.0))))
                .with_position(Vector2::new(100.0, 100.0))
                .with_mask(Rc::new(BoxMask::new(Box2::new(
                    Vector2::zero(),
                    Vector2::new(400.0, 300.0),
                )))),
        )
        .context("adding board")?;

    let counter = double_clicks.clone();
    let card = engine
        .scene
        .add(
            board,
            Object2D::new()
                .with_shape(BoxShape::centered(80.0, 50.0))
                .with_position(Vector2::new(120.0, 90.0))
                .with_rotation(0.2)
                .draggable(true)
                .on_pointer_enter(|node, _| node.layer = 1)
                .on_pointer_leave(|node, _| node.layer = 0)
                .on_double_click(move |node, _| {
                    counter.set(counter.get() + 1);
                    node.set_rotation(0.0);
                }),
        )
        .context("adding card")?;

    let token = engine
        .scene
        .add(
            board,
            Object2D::new()
                .with_shape(CircleShape::new(15.0))
                .with_position(Vector2::new(300.0, 200.0))
                .draggable(true)
                .on_pointer_drag(|node, _, delta| {
                    // Horizontal rail.
                    node.translate(Vector2::new(delta.x, 0.0));
                }),
        )
        .context("adding token")?;

    Ok(Demo { board, card, token, double_clicks })
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║             EASEL STUDIO v0.1          ║");
    println!("  ║   headless scene graph playground      ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let mut engine = Engine::new(EngineConfig::default());
    let mut surface = TraceSurface::default();
    let demo = build(&mut engine)?;

    engine.update();
    anyhow::ensure!(
        engine.viewport.center_on_node(&engine.scene, demo.board, SURFACE),
        "board vanished before centering"
    );
    engine.viewport.update_matrix();

    let card_screen = engine
        .scene
        .global_position(demo.card)
        .map(|p| engine.viewport.matrix().transform_point(p))
        .context("card has no position")?;
    let t0 = Instant::now();
    let left = PointerButton::Left;

    // ── hover + drag the card ─────────────────────────────────────────────
    let at = |dx: f64, dy: f64| (card_screen.x + dx, card_screen.y + dy);
    let (x0, y0) = at(0.0, 0.0);
    let (x1, y1) = at(40.0, 10.0);
    let (x2, y2) = at(60.0, 30.0);
    let script = [
        PointerEvent::moved(x0, y0),
        PointerEvent::pressed(left, x0, y0, t0),
        PointerEvent::moved(x1, y1),
        PointerEvent::moved(x2, y2),
        PointerEvent::released(left, x2, y2, t0),
    ];
    for (i, ev) in script.into_iter().enumerate() {
        engine.apply_event(ev);
        let report = engine.frame(&mut surface);
        println!(
            "  frame {i}: target={:?} entered={:?} left={:?} drag={:?} paths={} clips={}",
            report.target, report.entered, report.left, report.drag, surface.paths, surface.clips
        );
    }

    // ── double click resets the card's rotation ───────────────────────────
    for t in [t0 + Duration::from_millis(500), t0 + Duration::from_millis(600)] {
        engine.apply_event(PointerEvent::pressed(left, x2, y2, t));
        engine.frame(&mut surface);
        engine.apply_event(PointerEvent::released(left, x2, y2, t));
        engine.frame(&mut surface);
    }
    println!(
        "  card: position={:?} rotation={} double_clicks={}",
        engine.scene[demo.card].position(),
        engine.scene[demo.card].rotation(),
        demo.double_clicks.get()
    );

    // ── railed token only moves horizontally ──────────────────────────────
    let token_screen = engine
        .scene
        .global_position(demo.token)
        .map(|p| engine.viewport.matrix().transform_point(p))
        .context("token has no position")?;
    let t1 = t0 + Duration::from_secs(2);
    engine.apply_event(PointerEvent::pressed(left, token_screen.x, token_screen.y, t1));
    engine.frame(&mut surface);
    engine.apply_event(PointerEvent::moved(token_screen.x + 25.0, token_screen.y + 25.0));
    engine.frame(&mut surface);
    engine.apply_event(PointerEvent::released(left, token_screen.x + 25.0, token_screen.y + 25.0, t1));
    engine.frame(&mut surface);
    println!("  token: position={:?}", engine.scene[demo.token].position());

    // ── persistence round trip ────────────────────────────────────────────
    let data = engine.scene.serialize(demo.board, true).context("serializing board")?;
    let json = to_json(&data).context("encoding scene")?;

    let mut copy = Engine::new(EngineConfig::default());
    let copy_root = copy.scene.root();
    copy.scene
        .parse(&data, copy_root, &TypeRegistry::with_defaults())
        .context("parsing scene back")?;
    println!("  round trip: {} node(s), {} bytes of json", copy.scene.len() - 1, json.len());

    if let Some(path) = std::env::args().nth(1) {
        std::fs::write(&path, &json).with_context(|| format!("writing {path}"))?;
        println!("  scene written to {path}");
    }

    println!();
    Ok(())
}
