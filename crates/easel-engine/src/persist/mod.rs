//! Scene persistence.
//!
//! Nodes are captured as plain serde data ([`NodeData`]) and rebuilt through
//! an explicit [`TypeRegistry`] that maps type names to shape and mask
//! constructors. JSON is the only wire format.

mod data;
mod io;
mod registry;

use crate::error::SceneError;

pub use data::{MaskData, NodeData, NodeFlags};
pub use registry::{MaskCtor, ShapeCtor, TypeRegistry};

/// Pretty-printed JSON for `data`.
pub fn to_json(data: &NodeData) -> Result<String, SceneError> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn from_json(text: &str) -> Result<NodeData, SceneError> {
    Ok(serde_json::from_str(text)?)
}
