//! Easel engine crate.
//!
//! A retained-mode 2D scene graph: nodes with cached hierarchical
//! transforms, a camera, masks, pointer dispatch and a backend-agnostic
//! renderer. Everything is single-threaded and frame-driven.
//!
//! ```rust,ignore
//! let mut engine = Engine::new(EngineConfig::default());
//! let root = engine.scene.root();
//! engine.scene.add(root, Object2D::new()
//!     .with_shape(BoxShape::centered(80.0, 40.0))
//!     .with_position(Vector2::new(200.0, 120.0))
//!     .draggable(true))?;
//!
//! engine.apply_event(PointerEvent::moved(200.0, 120.0));
//! let report = engine.frame(&mut surface);
//! ```

pub mod coords;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod logging;
pub mod mask;
pub mod persist;
pub mod render;
pub mod scene;
pub mod viewport;

pub use crate::core::{Engine, EngineConfig};
pub use error::SceneError;
