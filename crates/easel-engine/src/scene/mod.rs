//! Scene graph.
//!
//! Responsibilities:
//! - own the node arena and keep tree links consistent (`Scene`)
//! - cache local/global transforms per node, refreshed parents-first
//! - provide deterministic paint order (level + layer + pre-order index)
//! - keep shape-specific geometry isolated per shape file under `scene::shapes`

mod callbacks;
mod id;
mod key;
mod node;
mod order;
mod tree;

pub mod shapes;

pub use callbacks::{
    Callbacks, DragFn, LifecycleFn, LifecycleHook, PointerFn, PointerHook, UpdateFn,
};
pub use id::NodeId;
pub use key::SortKey;
pub use node::Object2D;
pub use order::{OrderEntry, PaintOrder};
pub use tree::Scene;
