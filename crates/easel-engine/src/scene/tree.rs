use core::ops::{Index, IndexMut};

use slotmap::SlotMap;
use uuid::Uuid;

use crate::coords::{Matrix, Vector2};
use crate::error::SceneError;

use super::callbacks::LifecycleHook;
use super::{NodeId, Object2D};

/// Owner of a node tree.
///
/// Nodes are stored in an arena and refer to each other by [`NodeId`]; the
/// parent link is a plain handle and never keeps anything alive. The scene
/// always has a root node at level 0. Nodes can also exist detached (inserted
/// but not attached, or detached later); they stay in the arena until
/// [`Scene::remove`] drops them.
///
/// Mutation requires `&mut Scene`, so the tree cannot change while a
/// dispatch or render pass is reading it.
#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeId, Object2D>,
    root: NodeId,
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Object2D::new());
        Self { nodes, root }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Object2D> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Object2D> {
        self.nodes.get_mut(id)
    }

    /// Inserts a standalone node (no parent, level 0).
    pub fn insert(&mut self, mut node: Object2D) -> NodeId {
        node.parent = None;
        node.children.clear();
        node.level = 0;
        self.nodes.insert(node)
    }

    /// Inserts `node` and attaches it under `parent`.
    pub fn add(&mut self, parent: NodeId, node: Object2D) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let id = self.insert(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    // ── structure ─────────────────────────────────────────────────────────

    /// Attaches `child` (and its subtree) as the last child of `parent`.
    ///
    /// A child that already has a parent is detached from it first. After
    /// linking, `on_add(parent)` fires for every node of the subtree in
    /// pre-order.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(SceneError::UnknownNode(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        self.detach_from_parent(child);

        let level = self.nodes[parent].level + 1;
        self.nodes[parent].children.push(child);
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.mark_dirty();
        }
        self.assign_levels(child, level);

        log::debug!("attach {child} under {parent} at level {level}");

        for id in self.descendants(child) {
            self.nodes[id].fire_lifecycle(LifecycleHook::Add, parent);
        }
        Ok(())
    }

    /// Detaches `child` from `parent`.
    ///
    /// Returns `false` (and does nothing) when `child` is not one of
    /// `parent`'s children. Otherwise the subtree keeps existing in the arena
    /// as a standalone tree rooted at `child`, and `on_remove(parent)` fires
    /// for each of its nodes in pre-order.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(index) = self
            .nodes
            .get(parent)
            .and_then(|p| p.children.iter().position(|&c| c == child))
        else {
            return false;
        };

        {
            let node = &mut self.nodes[child];
            node.parent = None;
            node.mark_dirty();
        }
        self.assign_levels(child, 0);

        log::debug!("detach {child} from {parent}");

        for id in self.descendants(child) {
            self.nodes[id].fire_lifecycle(LifecycleHook::Remove, parent);
        }

        self.nodes[parent].children.remove(index);
        true
    }

    /// Detaches `child` from whatever parent it has. Returns `false` for
    /// standalone nodes.
    pub fn detach_from_parent(&mut self, child: NodeId) -> bool {
        match self.nodes.get(child).and_then(|n| n.parent) {
            Some(parent) => self.detach(parent, child),
            None => false,
        }
    }

    /// Detaches `id` and drops it together with its whole subtree.
    ///
    /// The root cannot be removed. Returns the number of nodes dropped.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if id == self.root || !self.contains(id) {
            return 0;
        }
        self.detach_from_parent(id);
        let doomed = self.descendants(id);
        for node in &doomed {
            self.nodes.remove(*node);
        }
        doomed.len()
    }

    /// Returns `true` when `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Returns `true` when `id` is reachable from the scene root.
    #[inline]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_ancestor(self.root, id)
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn assign_levels(&mut self, top: NodeId, level: u32) {
        let mut stack = vec![(top, level)];
        while let Some((id, level)) = stack.pop() {
            let node = &mut self.nodes[id];
            node.level = level;
            stack.extend(node.children.iter().map(|&c| (c, level + 1)));
        }
    }

    // ── traversal ─────────────────────────────────────────────────────────

    /// Pre-order walk: a node is visited before its children, children in
    /// storage order.
    pub fn traverse(&self, from: NodeId, mut visit: impl FnMut(NodeId, &Object2D)) {
        if !self.contains(from) {
            return;
        }
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            visit(id, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Mutable pre-order walk. The visitor may change node data but not the
    /// tree structure.
    pub fn traverse_mut(&mut self, from: NodeId, mut visit: impl FnMut(NodeId, &mut Object2D)) {
        for id in self.descendants(from) {
            visit(id, &mut self.nodes[id]);
        }
    }

    /// `from` and all its descendants, in pre-order.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.traverse(from, |id, _| out.push(id));
        out
    }

    /// First node in pre-order below (and including) `from` with this uuid.
    pub fn find_by_uuid(&self, from: NodeId, uuid: Uuid) -> Option<NodeId> {
        let mut found = None;
        self.traverse(from, |id, node| {
            if found.is_none() && node.uuid() == uuid {
                found = Some(id);
            }
        });
        found
    }

    // ── transforms ────────────────────────────────────────────────────────

    /// Refreshes the transforms of the attached tree.
    pub fn update_transforms(&mut self) {
        self.update_subtree_transforms(self.root);
    }

    /// Refreshes the transforms of `top` and its subtree, parents first.
    ///
    /// A node recomputes when its own dirty flag is set or when its parent
    /// recomputed in this pass. Untouched subtrees are skipped.
    pub fn update_subtree_transforms(&mut self, top: NodeId) {
        let Some(node) = self.nodes.get(top) else { return };
        let parent_global = node.parent.map(|p| *self.nodes[p].global_matrix());

        let mut stack: Vec<(NodeId, Option<Matrix>, bool)> = vec![(top, parent_global, false)];
        while let Some((id, parent_global, parent_changed)) = stack.pop() {
            let node = &mut self.nodes[id];
            let changed = parent_changed || node.matrix_needs_update();
            if changed {
                node.update_matrix(parent_global.as_ref());
            }
            let global = *node.global_matrix();
            stack.extend(node.children.iter().map(|&c| (c, Some(global), changed)));
        }
    }

    /// The node's local origin in scene space, from its cached global matrix.
    pub fn global_position(&self, id: NodeId) -> Option<Vector2> {
        self.nodes
            .get(id)
            .map(|n| n.global_matrix().transform_point(Vector2::zero()))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for Scene {
    type Output = Object2D;

    /// # Panics
    /// Panics if `id` is not a live node of this scene.
    fn index(&self, id: NodeId) -> &Object2D {
        &self.nodes[id]
    }
}

impl IndexMut<NodeId> for Scene {
    fn index_mut(&mut self, id: NodeId) -> &mut Object2D {
        &mut self.nodes[id]
    }
}
