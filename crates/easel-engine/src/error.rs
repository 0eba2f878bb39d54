use std::fmt;

use uuid::Uuid;

use crate::scene::NodeId;

/// Errors reported by tree mutation and scene persistence.
///
/// Per-frame work (transform refresh, dispatch, rendering) never returns
/// these; numeric problems there are contained and logged instead.
#[derive(Debug)]
pub enum SceneError {
    /// The handle does not refer to a live node in this scene.
    UnknownNode(NodeId),
    /// Attaching `child` under `parent` would make a node its own ancestor.
    Cycle { parent: NodeId, child: NodeId },
    /// No shape or mask constructor is registered under this type name.
    UnknownType(String),
    /// A mask refers to a frame node that is not part of the parsed subtree.
    UnknownMaskFrame(Uuid),
    /// Persisted data is structurally valid JSON but not a valid payload.
    Malformed(String),
    Json(serde_json::Error),
}

impl SceneError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownNode(id) => write!(f, "unknown node {id:?}"),
            SceneError::Cycle { parent, child } => {
                write!(f, "attaching {child:?} under {parent:?} would create a cycle")
            }
            SceneError::UnknownType(name) => write!(f, "no constructor registered for type '{name}'"),
            SceneError::UnknownMaskFrame(uuid) => write!(f, "mask frame node {uuid} not found"),
            SceneError::Malformed(msg) => write!(f, "malformed scene data: {msg}"),
            SceneError::Json(err) => write!(f, "scene json error: {err}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::Json(err)
    }
}
