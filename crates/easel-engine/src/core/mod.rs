//! Frame driver.
//!
//! Ties the scene, camera, pointer, dispatcher and renderer together behind
//! one per-frame entry point so hosts (studio, tests, a platform loop) run
//! the stages in the same order.

mod engine;

pub use engine::{Engine, EngineConfig};
