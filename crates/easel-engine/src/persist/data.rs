use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coords::Vector2;

/// Persisted form of a node and (optionally) its subtree.
///
/// Cached matrices and transient interaction state are not stored; they are
/// derived again after parsing. Callbacks cannot be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub uuid: Uuid,
    /// Registry key of the shape; `None` for a bare group.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub shape: serde_json::Value,

    pub position: Vector2,
    pub origin: Vector2,
    pub scale: Vector2,
    pub rotation: f64,
    #[serde(default)]
    pub layer: i32,

    #[serde(default)]
    pub flags: NodeFlags,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub masks: Vec<MaskData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeData>,
}

/// Boolean node flags, with the same defaults as a fresh node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFlags {
    pub visible: bool,
    pub pointer_events: bool,
    pub draggable: bool,
    pub ignore_viewport: bool,
    pub save_context_state: bool,
    pub restore_context_state: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            visible: true,
            pointer_events: true,
            draggable: false,
            ignore_viewport: false,
            save_context_state: true,
            restore_context_state: true,
        }
    }
}

/// Persisted mask binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskData {
    #[serde(rename = "type")]
    pub type_name: String,
    pub mask: serde_json::Value,
    /// Uuid of the node whose frame the mask is evaluated in; `None` for the
    /// masked node itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Uuid>,
}
