use std::fmt;

use slotmap::Key;

slotmap::new_key_type! {
    /// Handle of a node inside a [`super::Scene`].
    ///
    /// Handles are generational: a handle to a removed node never aliases a
    /// node inserted later.
    pub struct NodeId;
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.data().as_ffi())
    }
}
